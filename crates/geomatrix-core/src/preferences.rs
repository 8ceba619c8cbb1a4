//! Tool preferences persisted across sessions.

use crate::smoothing::{MAX_SMOOTHING, MIN_SMOOTHING};
use crate::stroke::{DEFAULT_LINE_WIDTH, SerializableColor, sanitize_width};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PreferencesError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Format error: {0}")]
    Format(#[from] serde_json::Error),
}

/// Last selected color, width and smoothing grid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    pub color: SerializableColor,
    pub line_width: f64,
    pub smoothing_factor: f64,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            color: SerializableColor::black(),
            line_width: DEFAULT_LINE_WIDTH,
            smoothing_factor: 0.0,
        }
    }
}

impl Preferences {
    /// Pull every value into its selectable range.
    pub fn sanitized(self) -> Self {
        Self {
            color: self.color,
            line_width: sanitize_width(self.line_width),
            smoothing_factor: sanitize_smoothing(self.smoothing_factor),
        }
    }
}

fn sanitize_smoothing(grid: f64) -> f64 {
    if grid.is_finite() {
        grid.clamp(MIN_SMOOTHING, MAX_SMOOTHING)
    } else {
        MIN_SMOOTHING
    }
}

/// Preferences plus where they live. Every change is written through.
#[derive(Debug, Clone, Default)]
pub struct PreferenceStore {
    path: Option<PathBuf>,
    prefs: Preferences,
}

impl PreferenceStore {
    /// A store that never touches disk.
    pub fn in_memory(prefs: Preferences) -> Self {
        Self {
            path: None,
            prefs: prefs.sanitized(),
        }
    }

    /// Read preferences from `path`, falling back to defaults when the file
    /// is missing or unreadable.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let prefs = match read(&path) {
            Ok(prefs) => prefs.sanitized(),
            Err(PreferencesError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("No preferences at {}, using defaults", path.display());
                Preferences::default()
            }
            Err(e) => {
                log::warn!("Could not read preferences at {}: {}", path.display(), e);
                Preferences::default()
            }
        };
        Self {
            path: Some(path),
            prefs,
        }
    }

    /// `<config dir>/geomatrix/preferences.json`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("geomatrix").join("preferences.json"))
    }

    pub fn get(&self) -> &Preferences {
        &self.prefs
    }

    pub fn set_color(&mut self, color: SerializableColor) {
        self.prefs.color = color;
        self.persist();
    }

    pub fn set_line_width(&mut self, width: f64) {
        self.prefs.line_width = sanitize_width(width);
        self.persist();
    }

    pub fn set_smoothing_factor(&mut self, grid: f64) {
        self.prefs.smoothing_factor = sanitize_smoothing(grid);
        self.persist();
    }

    /// Write the preferences to disk, if this store has a path.
    pub fn save(&self) -> Result<(), PreferencesError> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, serde_json::to_string_pretty(&self.prefs)?)?;
        Ok(())
    }

    fn persist(&self) {
        if let Err(e) = self.save() {
            log::error!("Failed to save preferences: {}", e);
        }
    }
}

fn read(path: &Path) -> Result<Preferences, PreferencesError> {
    let json = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&json)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let prefs = Preferences::default();
        assert_eq!(prefs.color, SerializableColor::black());
        assert_eq!(prefs.line_width, 4.0);
        assert_eq!(prefs.smoothing_factor, 0.0);
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempdir().unwrap();
        let store = PreferenceStore::open(dir.path().join("preferences.json"));
        assert_eq!(*store.get(), Preferences::default());
    }

    #[test]
    fn test_changes_are_written_through() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("preferences.json");

        let mut store = PreferenceStore::open(&path);
        store.set_color(SerializableColor::new(1, 2, 3, 255));
        store.set_line_width(12.0);
        store.set_smoothing_factor(5.0);

        let reopened = PreferenceStore::open(&path);
        assert_eq!(reopened.get().color, SerializableColor::new(1, 2, 3, 255));
        assert_eq!(reopened.get().line_width, 12.0);
        assert_eq!(reopened.get().smoothing_factor, 5.0);
    }

    #[test]
    fn test_values_are_clamped() {
        let mut store = PreferenceStore::in_memory(Preferences::default());
        store.set_line_width(0.5);
        assert_eq!(store.get().line_width, 1.0);
        store.set_smoothing_factor(42.0);
        assert_eq!(store.get().smoothing_factor, 10.0);
        store.set_smoothing_factor(f64::NAN);
        assert_eq!(store.get().smoothing_factor, 0.0);
    }

    #[test]
    fn test_corrupt_file_gives_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("preferences.json");
        fs::write(&path, "line_width = 3").unwrap();

        let store = PreferenceStore::open(&path);
        assert_eq!(*store.get(), Preferences::default());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("preferences.json");
        fs::write(&path, r#"{"line_width": 30}"#).unwrap();

        let store = PreferenceStore::open(&path);
        assert_eq!(store.get().line_width, 20.0);
        assert_eq!(store.get().smoothing_factor, 0.0);
    }
}
