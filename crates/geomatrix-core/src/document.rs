//! Drawing document: the committed strokes of a session.

use crate::storage::{Storage, StorageError};
use crate::stroke::{Stroke, sanitize_width};
use kurbo::Point;
use std::sync::mpsc::{self, Receiver, Sender};
use thiserror::Error;

/// Document errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DocumentError {
    #[error("No strokes to remove")]
    EmptyHistory,
}

/// Mutation notifications sent to subscribers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentChange {
    Loaded { count: usize },
    StrokeAppended,
    StrokeExtended,
    StrokeRemoved,
    StrokeRestored,
    Cleared,
}

/// Ordered strokes, back to front. Later strokes paint over earlier ones.
#[derive(Debug, Default)]
pub struct DrawingDocument {
    strokes: Vec<Stroke>,
    /// Whether the document held strokes at any point this session.
    had_strokes: bool,
    revision: u64,
    subscribers: Vec<Sender<DocumentChange>>,
}

impl DrawingDocument {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a document holding `strokes`. Empty strokes are dropped and
    /// widths are clamped into the selectable range.
    pub fn with_strokes(strokes: Vec<Stroke>) -> Self {
        let mut doc = Self::new();
        doc.replace(strokes);
        doc
    }

    /// Load the strokes stored under `id`.
    ///
    /// Never fails: a missing document starts empty, an unreadable one is
    /// logged and also starts empty.
    pub fn load<S: Storage + ?Sized>(storage: &S, id: &str) -> Self {
        let strokes = match pollster::block_on(storage.load(id)) {
            Ok(strokes) => {
                log::info!("Loaded {} strokes from '{}'", strokes.len(), id);
                strokes
            }
            Err(StorageError::NotFound(_)) => {
                log::info!("No saved document '{}', starting empty", id);
                Vec::new()
            }
            Err(e) => {
                log::warn!("Could not load document '{}', starting empty: {}", id, e);
                Vec::new()
            }
        };
        Self::with_strokes(strokes)
    }

    fn replace(&mut self, strokes: Vec<Stroke>) {
        let before = strokes.len();
        self.strokes = strokes
            .into_iter()
            .filter(|s| !s.is_empty())
            .map(|mut s| {
                s.width = sanitize_width(s.width);
                s
            })
            .collect();
        if self.strokes.len() != before {
            log::warn!("Dropped {} empty strokes", before - self.strokes.len());
        }
        self.had_strokes = !self.strokes.is_empty();
        self.changed(DocumentChange::Loaded {
            count: self.strokes.len(),
        });
    }

    /// Receive a notification for every mutation from now on.
    pub fn subscribe(&mut self) -> Receiver<DocumentChange> {
        let (sender, receiver) = mpsc::channel();
        self.subscribers.push(sender);
        receiver
    }

    fn changed(&mut self, change: DocumentChange) {
        self.revision += 1;
        if !self.strokes.is_empty() {
            self.had_strokes = true;
        }
        self.subscribers.retain(|s| s.send(change).is_ok());
    }

    /// Add a stroke on top of the others.
    pub fn append_stroke(&mut self, stroke: Stroke) {
        self.strokes.push(stroke);
        self.changed(DocumentChange::StrokeAppended);
    }

    /// Add a point to the topmost stroke. Returns false if there is none.
    pub fn extend_last(&mut self, point: Point) -> bool {
        match self.strokes.last_mut() {
            Some(stroke) => {
                stroke.push(point);
                self.changed(DocumentChange::StrokeExtended);
                true
            }
            None => false,
        }
    }

    /// Remove the topmost stroke.
    pub fn remove_last_stroke(&mut self) -> Result<Stroke, DocumentError> {
        let stroke = self.strokes.pop().ok_or(DocumentError::EmptyHistory)?;
        self.changed(DocumentChange::StrokeRemoved);
        Ok(stroke)
    }

    /// Put a previously removed stroke back on top.
    pub fn restore_stroke(&mut self, stroke: Stroke) {
        self.strokes.push(stroke);
        self.changed(DocumentChange::StrokeRestored);
    }

    /// Drop the topmost stroke if it has no points. Returns true if it did.
    pub fn discard_last_if_empty(&mut self) -> bool {
        if self.strokes.last().is_some_and(Stroke::is_empty) {
            self.strokes.pop();
            self.changed(DocumentChange::StrokeRemoved);
            true
        } else {
            false
        }
    }

    /// Remove every stroke. Cannot be undone.
    pub fn clear_all(&mut self) {
        self.strokes.clear();
        self.changed(DocumentChange::Cleared);
    }

    pub fn strokes(&self) -> &[Stroke] {
        &self.strokes
    }

    pub fn last(&self) -> Option<&Stroke> {
        self.strokes.last()
    }

    pub fn len(&self) -> usize {
        self.strokes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strokes.is_empty()
    }

    /// Mutation counter.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// A copy of the strokes for handing to another thread.
    pub fn snapshot(&self) -> Vec<Stroke> {
        self.strokes.clone()
    }

    /// False while the document is empty and never held a stroke this
    /// session; saving then would clobber a stored drawing with nothing.
    pub fn should_persist(&self) -> bool {
        self.had_strokes
    }
}

/// Serialize strokes to JSON.
pub fn to_json(strokes: &[Stroke]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(strokes)
}

/// Deserialize strokes from JSON.
pub fn from_json(json: &str) -> Result<Vec<Stroke>, serde_json::Error> {
    serde_json::from_str(json)
}
