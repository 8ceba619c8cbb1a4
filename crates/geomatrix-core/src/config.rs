//! Session configuration.

use crate::indicator::IndicatorConfig;
use crate::path::Interpolation;
use crate::storage::{DEFAULT_AUTOSAVE_DELAY, DOCUMENT_KEY};
use kurbo::Point;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// How drags on the canvas itself are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CanvasMode {
    /// The stroke follows the finger.
    Direct,
    /// The drag moves the cursor, and the stroke follows the cursor.
    #[default]
    Cursor,
}

/// Vertical offset of the default cursor above the viewport center.
const CURSOR_OFFSET_ABOVE_CENTER: f64 = 150.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Storage key of the drawing.
    pub document_id: String,
    /// Quiet time after the last change before the drawing is saved.
    pub autosave_delay_ms: u64,
    /// Where the cursor starts and where a reset puts it.
    pub default_cursor: Point,
    pub canvas_mode: CanvasMode,
    /// Whether direct-touch strokes also record a cursor history entry.
    pub direct_strokes_step_cursor: bool,
    pub interpolation: Interpolation,
    pub indicator: IndicatorConfig,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self::for_viewport(800.0, 600.0)
    }
}

impl SessionConfig {
    /// Defaults for a canvas of the given size: the cursor starts centered
    /// horizontally and a little above the middle.
    pub fn for_viewport(width: f64, height: f64) -> Self {
        Self {
            document_id: DOCUMENT_KEY.to_string(),
            autosave_delay_ms: DEFAULT_AUTOSAVE_DELAY.as_millis() as u64,
            default_cursor: Point::new(width / 2.0, height / 2.0 - CURSOR_OFFSET_ABOVE_CENTER),
            canvas_mode: CanvasMode::default(),
            direct_strokes_step_cursor: false,
            interpolation: Interpolation::default(),
            indicator: IndicatorConfig::default(),
        }
    }

    pub fn autosave_delay(&self) -> Duration {
        Duration::from_millis(self.autosave_delay_ms)
    }
}
