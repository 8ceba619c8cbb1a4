//! File-based storage.

use super::{BoxFuture, Storage, StorageError, StorageResult};
use crate::document::{from_json, to_json};
use crate::stroke::Stroke;
use std::fs;
use std::path::PathBuf;

/// Stores each stroke collection as a JSON file in a directory.
pub struct FileStorage {
    base_path: PathBuf,
}

impl FileStorage {
    /// Create a file storage rooted at `base_path`, creating the directory
    /// if needed.
    pub fn new(base_path: PathBuf) -> StorageResult<Self> {
        if !base_path.exists() {
            fs::create_dir_all(&base_path).map_err(|e| {
                StorageError::Io(format!("Failed to create storage directory: {}", e))
            })?;
        }
        Ok(Self { base_path })
    }

    /// Create file storage in the per-user default location.
    ///
    /// On Linux: `~/.local/share/geomatrix/documents/`
    /// On macOS: `~/Library/Application Support/geomatrix/documents/`
    /// On Windows: `%LOCALAPPDATA%\geomatrix\documents\`
    pub fn default_location() -> StorageResult<Self> {
        let base = dirs::data_local_dir()
            .or_else(dirs::home_dir)
            .ok_or_else(|| StorageError::Io("Could not determine home directory".to_string()))?;

        Self::new(base.join("geomatrix").join("documents"))
    }

    /// Get the file path for a document id.
    pub fn document_path(&self, id: &str) -> PathBuf {
        let safe_id: String = id
            .chars()
            .map(|c| {
                if c.is_alphanumeric() || c == '-' || c == '_' {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        self.base_path.join(format!("{}.json", safe_id))
    }

    pub fn base_path(&self) -> &PathBuf {
        &self.base_path
    }
}

impl Storage for FileStorage {
    fn save(&self, id: &str, strokes: &[Stroke]) -> BoxFuture<'_, StorageResult<()>> {
        let path = self.document_path(id);
        let json = match to_json(strokes) {
            Ok(j) => j,
            Err(e) => {
                return Box::pin(async move { Err(StorageError::Serialization(e.to_string())) });
            }
        };

        Box::pin(async move {
            // Replace atomically.
            let tmp = path.with_extension("json.tmp");
            fs::write(&tmp, json).map_err(|e| {
                StorageError::Io(format!("Failed to write {}: {}", tmp.display(), e))
            })?;
            fs::rename(&tmp, &path).map_err(|e| {
                StorageError::Io(format!("Failed to replace {}: {}", path.display(), e))
            })
        })
    }

    fn load(&self, id: &str) -> BoxFuture<'_, StorageResult<Vec<Stroke>>> {
        let path = self.document_path(id);
        let id_owned = id.to_string();

        Box::pin(async move {
            if !path.exists() {
                return Err(StorageError::NotFound(id_owned));
            }

            let json = fs::read_to_string(&path).map_err(|e| {
                StorageError::Io(format!("Failed to read {}: {}", path.display(), e))
            })?;

            from_json(&json).map_err(|e| {
                StorageError::Deserialization(format!("Failed to parse {}: {}", path.display(), e))
            })
        })
    }

    fn exists(&self, id: &str) -> BoxFuture<'_, StorageResult<bool>> {
        let path = self.document_path(id);
        Box::pin(async move { Ok(path.exists()) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stroke::SerializableColor;
    use kurbo::Point;
    use pollster::block_on;
    use tempfile::tempdir;

    fn sample() -> Vec<Stroke> {
        vec![Stroke::from_points(
            vec![Point::new(1.0, 2.0), Point::new(3.5, 4.25)],
            SerializableColor::new(10, 20, 30, 255),
            6.0,
        )]
    }

    #[test]
    fn test_file_storage_save_load() {
        let dir = tempdir().unwrap();
        let storage = FileStorage::new(dir.path().to_path_buf()).unwrap();

        let strokes = sample();
        block_on(storage.save("Document", &strokes)).unwrap();
        let loaded = block_on(storage.load("Document")).unwrap();

        assert_eq!(loaded, strokes);
        assert!(!storage.document_path("Document").with_extension("json.tmp").exists());
    }

    #[test]
    fn test_file_storage_not_found() {
        let dir = tempdir().unwrap();
        let storage = FileStorage::new(dir.path().to_path_buf()).unwrap();

        let result = block_on(storage.load("nonexistent"));
        assert!(matches!(result, Err(StorageError::NotFound(_))));
    }

    #[test]
    fn test_file_storage_corrupt_file() {
        let dir = tempdir().unwrap();
        let storage = FileStorage::new(dir.path().to_path_buf()).unwrap();
        fs::write(storage.document_path("Document"), "{ not json").unwrap();

        let result = block_on(storage.load("Document"));
        assert!(matches!(result, Err(StorageError::Deserialization(_))));
    }

    #[test]
    fn test_file_storage_save_replaces() {
        let dir = tempdir().unwrap();
        let storage = FileStorage::new(dir.path().to_path_buf()).unwrap();

        block_on(storage.save("Document", &sample())).unwrap();
        block_on(storage.save("Document", &[])).unwrap();

        assert!(block_on(storage.load("Document")).unwrap().is_empty());
    }

    #[test]
    fn test_file_storage_creates_directory() {
        let dir = tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        let storage = FileStorage::new(nested.clone()).unwrap();

        assert!(nested.is_dir());
        assert!(!block_on(storage.exists("Document")).unwrap());
    }

    #[test]
    fn test_file_storage_sanitizes_id() {
        let dir = tempdir().unwrap();
        let storage = FileStorage::new(dir.path().to_path_buf()).unwrap();

        let strokes = sample();
        block_on(storage.save("test/doc:with*special", &strokes)).unwrap();

        assert_eq!(
            storage.document_path("test/doc:with*special").file_name().unwrap(),
            "test_doc_with_special.json"
        );
        assert_eq!(block_on(storage.load("test/doc:with*special")).unwrap(), strokes);
    }
}
