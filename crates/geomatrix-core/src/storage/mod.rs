//! Storage abstraction for persistence.

mod autosave;
mod debounce;
mod file;
mod memory;

pub use autosave::{AutoSaver, DEFAULT_AUTOSAVE_DELAY};
pub use debounce::Debouncer;
pub use file::FileStorage;
pub use memory::MemoryStorage;

use crate::stroke::Stroke;
use std::future::Future;
use std::pin::Pin;
use thiserror::Error;

/// Key the drawing is stored under.
pub const DOCUMENT_KEY: &str = "Document";

/// Storage errors.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Document not found: {0}")]
    NotFound(String),
    #[error("Deserialization error: {0}")]
    Deserialization(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("IO error: {0}")]
    Io(String),
    #[error("Storage error: {0}")]
    Other(String),
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Boxed future for storage operations.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Trait for stroke storage backends.
///
/// A save always replaces the whole stored collection.
pub trait Storage: Send + Sync {
    /// Save the strokes under `id`.
    fn save(&self, id: &str, strokes: &[Stroke]) -> BoxFuture<'_, StorageResult<()>>;

    /// Load the strokes stored under `id`.
    fn load(&self, id: &str) -> BoxFuture<'_, StorageResult<Vec<Stroke>>>;

    /// Check if anything is stored under `id`.
    fn exists(&self, id: &str) -> BoxFuture<'_, StorageResult<bool>>;
}
