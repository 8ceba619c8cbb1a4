//! GeoMatrix Core Library
//!
//! Drawing state for a freehand canvas with an indirect trackpad cursor:
//! strokes, cursor history with undo/redo kept in step, grid smoothing,
//! path construction and debounced persistence.

pub mod config;
pub mod cursor;
pub mod document;
pub mod indicator;
pub mod path;
pub mod preferences;
pub mod session;
pub mod smoothing;
pub mod storage;
pub mod stroke;

pub use config::{CanvasMode, SessionConfig};
pub use cursor::{CursorController, GestureState};
pub use document::{DocumentChange, DocumentError, DrawingDocument};
pub use indicator::{IndicatorAnimation, IndicatorConfig};
pub use path::{Interpolation, PathBuilder, RenderedStroke};
pub use preferences::{PreferenceStore, Preferences, PreferencesError};
pub use session::{Command, Session, Surface};
pub use smoothing::{smooth_delta, smooth_number};
pub use storage::{FileStorage, MemoryStorage, Storage, StorageError, StorageResult};
pub use stroke::{SerializableColor, Stroke, StrokeId};
