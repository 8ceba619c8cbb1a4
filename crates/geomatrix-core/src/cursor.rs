//! Indirect cursor: position, position history and gesture tracking.

use crate::smoothing::smooth_delta;
use kurbo::Point;

/// What the current gesture is doing.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum GestureState {
    /// No gesture in progress.
    #[default]
    Idle,
    /// Touch points are appended to the active stroke as-is.
    DirectDrawing,
    /// Raw positions move the cursor through the smoothing grid.
    IndirectTracking {
        /// Whether cursor moves extend the active stroke.
        drawing: bool,
        /// Raw position the next delta is measured from.
        baseline: Point,
    },
}

/// Cursor location plus the history of where each gesture left it.
///
/// `history` is never empty and `index` always points into it. Entries past
/// `index` form the redo range.
#[derive(Debug, Clone)]
pub struct CursorController {
    location: Point,
    default_location: Point,
    history: Vec<Point>,
    index: usize,
    state: GestureState,
}

impl CursorController {
    pub fn new(default_location: Point) -> Self {
        Self {
            location: default_location,
            default_location,
            history: vec![default_location],
            index: 0,
            state: GestureState::Idle,
        }
    }

    pub fn location(&self) -> Point {
        self.location
    }

    pub fn history(&self) -> &[Point] {
        &self.history
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn state(&self) -> GestureState {
        self.state
    }

    pub fn is_idle(&self) -> bool {
        self.state == GestureState::Idle
    }

    pub fn can_step_back(&self) -> bool {
        self.index > 0
    }

    pub fn can_step_forward(&self) -> bool {
        self.index + 1 < self.history.len()
    }

    /// Drop every entry after the current one.
    pub fn truncate_forward(&mut self) {
        self.history.truncate(self.index + 1);
    }

    /// Record the current location as the newest history entry.
    pub fn commit(&mut self) {
        self.truncate_forward();
        self.history.push(self.location);
        self.index = self.history.len() - 1;
    }

    /// Move to the previous history entry.
    pub fn step_back(&mut self) -> bool {
        if !self.can_step_back() {
            return false;
        }
        self.index -= 1;
        self.location = self.history[self.index];
        true
    }

    /// Move to the next history entry.
    pub fn step_forward(&mut self) -> bool {
        if !self.can_step_forward() {
            return false;
        }
        self.index += 1;
        self.location = self.history[self.index];
        true
    }

    /// Back to the default location with a single-entry history.
    pub fn reset(&mut self) {
        self.location = self.default_location;
        self.history = vec![self.default_location];
        self.index = 0;
    }

    pub(crate) fn begin_direct(&mut self) {
        self.state = GestureState::DirectDrawing;
    }

    /// Start tracking. `start` is the first raw sample: it becomes the
    /// baseline and does not move the cursor.
    pub(crate) fn begin_tracking(&mut self, start: Point, drawing: bool) {
        self.state = GestureState::IndirectTracking {
            drawing,
            baseline: start,
        };
    }

    /// Feed a raw position. Returns the new location if the cursor moved.
    ///
    /// The baseline only moves to `raw` when the cursor moved, so motion
    /// below the grid accumulates until it crosses a grid step.
    pub(crate) fn track(&mut self, raw: Point, grid: f64) -> Option<Point> {
        let GestureState::IndirectTracking { baseline, .. } = &mut self.state else {
            return None;
        };

        let before = self.location;
        self.location += smooth_delta(raw - *baseline, grid);
        if self.location == before {
            return None;
        }

        *baseline = raw;
        Some(self.location)
    }

    /// End the gesture, returning the state it ended in.
    pub(crate) fn finish(&mut self) -> GestureState {
        std::mem::take(&mut self.state)
    }
}
