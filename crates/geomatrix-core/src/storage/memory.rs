//! In-memory storage implementation.

use super::{BoxFuture, Storage, StorageError, StorageResult};
use crate::stroke::Stroke;
use std::collections::HashMap;
use std::sync::RwLock;
use std::sync::atomic::{AtomicUsize, Ordering};

/// In-memory storage for testing and ephemeral sessions.
#[derive(Default)]
pub struct MemoryStorage {
    documents: RwLock<HashMap<String, Vec<Stroke>>>,
    saves: AtomicUsize,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with `strokes` stored under `id`.
    pub fn with_document(id: &str, strokes: Vec<Stroke>) -> Self {
        let storage = Self::new();
        if let Ok(mut docs) = storage.documents.write() {
            docs.insert(id.to_string(), strokes);
        }
        storage
    }

    /// Number of completed saves.
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }
}

impl Storage for MemoryStorage {
    fn save(&self, id: &str, strokes: &[Stroke]) -> BoxFuture<'_, StorageResult<()>> {
        let id = id.to_string();
        let strokes = strokes.to_vec();
        Box::pin(async move {
            let mut docs = self
                .documents
                .write()
                .map_err(|e| StorageError::Other(format!("Lock error: {}", e)))?;
            docs.insert(id, strokes);
            self.saves.fetch_add(1, Ordering::SeqCst);
            Ok(())
        })
    }

    fn load(&self, id: &str) -> BoxFuture<'_, StorageResult<Vec<Stroke>>> {
        let id = id.to_string();
        Box::pin(async move {
            let docs = self
                .documents
                .read()
                .map_err(|e| StorageError::Other(format!("Lock error: {}", e)))?;
            docs.get(&id).cloned().ok_or(StorageError::NotFound(id))
        })
    }

    fn exists(&self, id: &str) -> BoxFuture<'_, StorageResult<bool>> {
        let id = id.to_string();
        Box::pin(async move {
            let docs = self
                .documents
                .read()
                .map_err(|e| StorageError::Other(format!("Lock error: {}", e)))?;
            Ok(docs.contains_key(&id))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stroke::SerializableColor;
    use kurbo::Point;
    use pollster::block_on;

    #[test]
    fn test_save_and_load() {
        let storage = MemoryStorage::new();
        let strokes = vec![Stroke::new(Point::new(1.0, 1.0), SerializableColor::black(), 4.0)];

        block_on(storage.save("test", &strokes)).unwrap();
        let loaded = block_on(storage.load("test")).unwrap();

        assert_eq!(loaded, strokes);
        assert_eq!(storage.save_count(), 1);
    }

    #[test]
    fn test_not_found() {
        let storage = MemoryStorage::new();
        let result = block_on(storage.load("nonexistent"));

        assert!(matches!(result, Err(StorageError::NotFound(_))));
    }

    #[test]
    fn test_exists() {
        let storage = MemoryStorage::new();

        assert!(!block_on(storage.exists("test")).unwrap());
        block_on(storage.save("test", &[])).unwrap();
        assert!(block_on(storage.exists("test")).unwrap());
    }

    #[test]
    fn test_with_document() {
        let strokes = vec![Stroke::new(Point::ZERO, SerializableColor::white(), 2.0)];
        let storage = MemoryStorage::with_document("doc", strokes.clone());

        assert_eq!(block_on(storage.load("doc")).unwrap(), strokes);
        assert_eq!(storage.save_count(), 0);
    }
}
