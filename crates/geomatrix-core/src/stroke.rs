//! Stroke model: one continuous freehand line.

use kurbo::Point;
use peniko::Color;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for strokes.
pub type StrokeId = Uuid;

/// Thinnest selectable line width.
pub const MIN_LINE_WIDTH: f64 = 1.0;

/// Thickest selectable line width.
pub const MAX_LINE_WIDTH: f64 = 20.0;

/// Line width used when nothing else was chosen.
pub const DEFAULT_LINE_WIDTH: f64 = 4.0;

/// Serializable color representation (RGBA8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SerializableColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl SerializableColor {
    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn black() -> Self {
        Self::new(0, 0, 0, 255)
    }

    pub fn white() -> Self {
        Self::new(255, 255, 255, 255)
    }
}

impl Default for SerializableColor {
    fn default() -> Self {
        Self::black()
    }
}

impl From<Color> for SerializableColor {
    fn from(color: Color) -> Self {
        let rgba = color.to_rgba8();
        Self {
            r: rgba.r,
            g: rgba.g,
            b: rgba.b,
            a: rgba.a,
        }
    }
}

impl From<SerializableColor> for Color {
    fn from(color: SerializableColor) -> Self {
        Color::from_rgba8(color.r, color.g, color.b, color.a)
    }
}

/// A freehand stroke: ordered points plus how to paint them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    pub(crate) id: StrokeId,
    /// Points in drawing order.
    pub(crate) points: Vec<Point>,
    /// Paint color.
    pub color: SerializableColor,
    /// Line width, always positive.
    pub width: f64,
}

impl Stroke {
    /// Start a stroke at `origin`.
    pub fn new(origin: Point, color: SerializableColor, width: f64) -> Self {
        Self::from_points(vec![origin], color, width)
    }

    /// Create from existing points.
    pub fn from_points(points: Vec<Point>, color: SerializableColor, width: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            points,
            color,
            width: sanitize_width(width),
        }
    }

    pub fn id(&self) -> StrokeId {
        self.id
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Add a point to the end of the stroke.
    pub(crate) fn push(&mut self, point: Point) {
        self.points.push(point);
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

}

/// Clamp a width into the selectable range; non-finite widths fall back to
/// the default.
pub fn sanitize_width(width: f64) -> f64 {
    if width.is_finite() {
        width.clamp(MIN_LINE_WIDTH, MAX_LINE_WIDTH)
    } else {
        DEFAULT_LINE_WIDTH
    }
}
