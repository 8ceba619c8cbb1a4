//! Drawing session: document, cursor and their shared undo history.
//!
//! The session is a plain state machine driven by [`Command`]s. A front end
//! dispatches commands with its current time, calls [`Session::tick`] from
//! its frame loop so the autosave timer can fire, and reads state back for
//! rendering. The session never reads the clock itself.

use crate::config::{CanvasMode, SessionConfig};
use crate::cursor::{CursorController, GestureState};
use crate::document::{DocumentChange, DrawingDocument};
use crate::indicator::IndicatorAnimation;
use crate::path::{PathBuilder, RenderedStroke};
use crate::preferences::{PreferenceStore, Preferences};
use crate::storage::{AutoSaver, Debouncer, Storage, StorageResult};
use crate::stroke::{SerializableColor, Stroke, StrokeId};
use kurbo::Point;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::Arc;
use std::sync::mpsc::Receiver;
use std::time::Instant;

/// Where a gesture happens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Surface {
    Canvas,
    Trackpad,
}

/// Everything a front end can ask of a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum Command {
    Begin { surface: Surface, x: f64, y: f64 },
    Move { x: f64, y: f64 },
    End,
    Undo,
    Redo,
    CursorBack,
    CursorForward,
    /// Destructive; confirm with the user first.
    ResetCursor,
    /// Destructive; confirm with the user first.
    ClearAll,
    SetColor { color: SerializableColor },
    SetLineWidth { width: f64 },
    SetSmoothing { grid: f64 },
    /// Save right away, e.g. when the host is about to be suspended.
    Save,
}

pub struct Session {
    config: SessionConfig,
    document: DrawingDocument,
    cursor: CursorController,
    /// Strokes taken off the document by undo, newest last.
    undone: Vec<Stroke>,
    /// Strokes whose gesture recorded a cursor history entry.
    cursor_linked: HashSet<StrokeId>,
    preferences: PreferenceStore,
    builder: PathBuilder,
    indicator: Option<IndicatorAnimation>,
    autosave: Debouncer,
    seen_revision: u64,
    saver: AutoSaver,
}

impl Session {
    /// Load the drawing from `storage` and start the autosave writer.
    pub fn new<S: Storage + 'static>(
        config: SessionConfig,
        storage: Arc<S>,
        preferences: PreferenceStore,
    ) -> StorageResult<Self> {
        let document = DrawingDocument::load(storage.as_ref(), &config.document_id);
        let saver = AutoSaver::spawn(storage, config.document_id.clone())?;

        log::info!(
            "Session started with {} strokes ({:?} canvas)",
            document.len(),
            config.canvas_mode
        );

        Ok(Self {
            cursor: CursorController::new(config.default_cursor),
            builder: PathBuilder::new(config.interpolation),
            autosave: Debouncer::new(config.autosave_delay()),
            seen_revision: document.revision(),
            undone: Vec::new(),
            cursor_linked: HashSet::new(),
            indicator: None,
            document,
            preferences,
            saver,
            config,
        })
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn document(&self) -> &DrawingDocument {
        &self.document
    }

    /// Receive a notification for every document mutation from now on.
    pub fn subscribe(&mut self) -> Receiver<DocumentChange> {
        self.document.subscribe()
    }

    pub fn cursor(&self) -> &CursorController {
        &self.cursor
    }

    pub fn preferences(&self) -> &Preferences {
        self.preferences.get()
    }

    /// Strokes available to redo, oldest first.
    pub fn undone(&self) -> &[Stroke] {
        &self.undone
    }

    /// Run one command at time `now`. Returns whether it changed anything.
    pub fn dispatch(&mut self, command: Command, now: Instant) -> bool {
        match command {
            Command::Begin { surface, x, y } => self.begin_gesture(surface, Point::new(x, y), now),
            Command::Move { x, y } => self.move_gesture(Point::new(x, y)),
            Command::End => self.end_gesture(),
            Command::Undo => self.undo(),
            Command::Redo => self.redo(),
            Command::CursorBack => self.cursor_back(),
            Command::CursorForward => self.cursor_forward(),
            Command::ResetCursor => self.reset_cursor(),
            Command::ClearAll => self.clear_all(),
            Command::SetColor { color } => {
                self.preferences.set_color(color);
                true
            }
            Command::SetLineWidth { width } => {
                self.preferences.set_line_width(width);
                true
            }
            Command::SetSmoothing { grid } => {
                self.preferences.set_smoothing_factor(grid);
                true
            }
            Command::Save => self.suspend(),
        }
    }

    /// Start a gesture. `now` starts the width indicator on the trackpad.
    pub fn begin_gesture(&mut self, surface: Surface, point: Point, now: Instant) -> bool {
        if !self.cursor.is_idle() {
            log::debug!("Ignoring gesture start during {:?}", self.cursor.state());
            return false;
        }

        match (surface, self.config.canvas_mode) {
            (Surface::Canvas, CanvasMode::Direct) => {
                self.start_stroke(point);
                self.cursor.begin_direct();
            }
            (Surface::Canvas, CanvasMode::Cursor) => {
                self.start_stroke(self.cursor.location());
                self.cursor.begin_tracking(point, true);
            }
            (Surface::Trackpad, _) => {
                self.cursor.begin_tracking(point, false);
                self.indicator = Some(IndicatorAnimation::start(
                    self.config.indicator,
                    self.preferences.get().line_width,
                    now,
                ));
            }
        }
        true
    }

    pub fn move_gesture(&mut self, point: Point) -> bool {
        match self.cursor.state() {
            GestureState::Idle => {
                log::debug!("Ignoring move without a gesture");
                false
            }
            GestureState::DirectDrawing => self.document.extend_last(point),
            GestureState::IndirectTracking { drawing, .. } => {
                let grid = self.preferences.get().smoothing_factor;
                match self.cursor.track(point, grid) {
                    Some(location) => {
                        if drawing {
                            self.document.extend_last(location);
                        }
                        true
                    }
                    None => false,
                }
            }
        }
    }

    pub fn end_gesture(&mut self) -> bool {
        match self.cursor.finish() {
            GestureState::Idle => {
                log::debug!("Ignoring end without a gesture");
                false
            }
            GestureState::DirectDrawing => {
                self.finish_stroke(self.config.direct_strokes_step_cursor);
                true
            }
            GestureState::IndirectTracking { drawing: true, .. } => {
                self.finish_stroke(true);
                true
            }
            GestureState::IndirectTracking { drawing: false, .. } => {
                self.cursor.commit();
                true
            }
        }
    }

    /// A new stroke invalidates everything that could be redone.
    fn start_stroke(&mut self, origin: Point) {
        for stroke in self.undone.drain(..) {
            self.cursor_linked.remove(&stroke.id());
        }
        self.cursor.truncate_forward();

        let prefs = self.preferences.get();
        self.document
            .append_stroke(Stroke::new(origin, prefs.color, prefs.line_width));
    }

    fn finish_stroke(&mut self, step_cursor: bool) {
        if self.document.discard_last_if_empty() {
            log::debug!("Discarded empty stroke");
            return;
        }
        let Some(id) = self.document.last().map(Stroke::id) else {
            return;
        };
        if step_cursor {
            self.cursor.commit();
            self.cursor_linked.insert(id);
        }
    }

    pub fn can_undo(&self) -> bool {
        self.cursor.is_idle()
            && self.document.last().is_some_and(|stroke| {
                !self.cursor_linked.contains(&stroke.id()) || self.cursor.can_step_back()
            })
    }

    pub fn can_redo(&self) -> bool {
        self.cursor.is_idle()
            && self.undone.last().is_some_and(|stroke| {
                !self.cursor_linked.contains(&stroke.id()) || self.cursor.can_step_forward()
            })
    }

    /// Take the newest stroke off the document, stepping the cursor back with
    /// it if its gesture moved the cursor.
    pub fn undo(&mut self) -> bool {
        if !self.can_undo() {
            log::debug!("Nothing to undo");
            return false;
        }
        let stroke = match self.document.remove_last_stroke() {
            Ok(stroke) => stroke,
            Err(e) => {
                log::debug!("Undo failed: {}", e);
                return false;
            }
        };
        if self.cursor_linked.contains(&stroke.id()) {
            self.cursor.step_back();
        }
        self.undone.push(stroke);
        true
    }

    pub fn redo(&mut self) -> bool {
        if !self.can_redo() {
            log::debug!("Nothing to redo");
            return false;
        }
        let Some(stroke) = self.undone.pop() else {
            return false;
        };
        if self.cursor_linked.contains(&stroke.id()) {
            self.cursor.step_forward();
        }
        self.document.restore_stroke(stroke);
        true
    }

    /// Step the cursor back without touching strokes.
    pub fn cursor_back(&mut self) -> bool {
        self.cursor.is_idle() && self.cursor.step_back()
    }

    /// Step the cursor forward without touching strokes.
    pub fn cursor_forward(&mut self) -> bool {
        self.cursor.is_idle() && self.cursor.step_forward()
    }

    pub fn reset_cursor(&mut self) -> bool {
        if !self.cursor.is_idle() {
            return false;
        }
        self.cursor.reset();
        log::info!("Cursor reset to {:?}", self.cursor.location());
        true
    }

    /// Delete every stroke and the redo buffer.
    pub fn clear_all(&mut self) -> bool {
        if !self.cursor.is_idle() {
            return false;
        }
        self.document.clear_all();
        self.undone.clear();
        self.cursor_linked.clear();
        log::info!("Drawing cleared");
        true
    }

    /// Drive the autosave timer. Returns true if a save was handed off.
    pub fn tick(&mut self, now: Instant) -> bool {
        let revision = self.document.revision();
        if revision != self.seen_revision {
            self.seen_revision = revision;
            self.autosave.trigger(now);
        }
        if self.autosave.poll(now) {
            return self.queue_save();
        }
        false
    }

    /// Save right away. Call when the host is about to go to the background
    /// or terminate.
    pub fn suspend(&mut self) -> bool {
        self.autosave.cancel();
        self.seen_revision = self.document.revision();
        self.queue_save()
    }

    fn queue_save(&mut self) -> bool {
        if !self.document.should_persist() {
            log::debug!("Skipping save of a never-drawn document");
            return false;
        }
        self.saver.save(self.document.snapshot());
        true
    }

    /// Block until queued saves are written.
    pub fn sync(&self) {
        self.saver.sync();
    }

    pub fn is_save_pending(&self) -> bool {
        self.autosave.is_pending() || self.document.revision() != self.seen_revision
    }

    /// Size of the width indicator ring at `now`, while it is animating.
    pub fn indicator_size(&self, now: Instant) -> Option<f64> {
        self.indicator.and_then(|anim| anim.size_at(now))
    }

    pub fn indicator(&self) -> Option<&IndicatorAnimation> {
        self.indicator.as_ref()
    }

    /// Paths for every stroke, back to front.
    pub fn render(&self) -> Vec<RenderedStroke> {
        self.document
            .strokes()
            .iter()
            .map(|stroke| self.builder.render(stroke))
            .collect()
    }
}
