//! Turns stroke points into renderable paths.

use crate::stroke::{SerializableColor, Stroke};
use kurbo::{BezPath, Cap, Join, Point};
use serde::{Deserialize, Serialize};

/// How consecutive points are joined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Interpolation {
    /// Straight segments between points.
    #[default]
    Straight,
    /// Catmull-Rom spline through every point.
    Flowing,
}

/// Everything the rendering layer needs to paint one stroke.
#[derive(Debug, Clone)]
pub struct RenderedStroke {
    pub path: BezPath,
    pub style: kurbo::Stroke,
    pub color: SerializableColor,
}

/// Builds stroke paths. Stateless apart from its interpolation choice, so it
/// can be called on every redraw.
#[derive(Debug, Clone, Copy, Default)]
pub struct PathBuilder {
    pub interpolation: Interpolation,
}

impl PathBuilder {
    pub fn new(interpolation: Interpolation) -> Self {
        Self { interpolation }
    }

    /// Build a path visiting `points` in order.
    ///
    /// No points gives an empty path. A single point gives a zero-length
    /// segment, which round caps paint as a dot.
    pub fn build_path(&self, points: &[Point]) -> BezPath {
        let mut path = BezPath::new();

        let Some(&first) = points.first() else {
            return path;
        };

        path.move_to(first);
        if points.len() == 1 {
            path.line_to(first);
            return path;
        }

        match self.interpolation {
            Interpolation::Straight => {
                for point in &points[1..] {
                    path.line_to(*point);
                }
            }
            Interpolation::Flowing => {
                // Catmull-Rom spline converted to cubic bezier
                let tension = 0.5;
                let last = points.len() - 1;
                for i in 0..last {
                    let p0 = points[i.saturating_sub(1)];
                    let p1 = points[i];
                    let p2 = points[i + 1];
                    let p3 = points[(i + 2).min(last)];

                    let t1 = (p2 - p0) * tension;
                    let t2 = (p3 - p1) * tension;

                    path.curve_to(p1 + t1 / 3.0, p2 - t2 / 3.0, p2);
                }
            }
        }

        path
    }

    /// Round caps and joins.
    pub fn stroke_style(width: f64) -> kurbo::Stroke {
        kurbo::Stroke::new(width)
            .with_caps(Cap::Round)
            .with_join(Join::Round)
    }

    pub fn render(&self, stroke: &Stroke) -> RenderedStroke {
        RenderedStroke {
            path: self.build_path(stroke.points()),
            style: Self::stroke_style(stroke.width),
            color: stroke.color,
        }
    }
}
