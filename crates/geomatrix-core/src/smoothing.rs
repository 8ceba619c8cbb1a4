//! Grid quantization for indirect cursor motion.
//!
//! Raw pointer deltas are snapped to an integer grid before they move the
//! cursor, which gives the trackpad its "magnetic" feel. A grid of zero turns
//! quantization off.

use kurbo::Vec2;

/// Smallest selectable smoothing grid.
pub const MIN_SMOOTHING: f64 = 0.0;

/// Largest selectable smoothing grid.
pub const MAX_SMOOTHING: f64 = 10.0;

/// Snap `value` to the nearest multiple of `grid`.
///
/// Both inputs are rounded to integers first, so sub-unit fractions are lost.
/// The sign of `value` is kept; zero stays zero. A grid that is zero (or that
/// rounds to zero) leaves `value` untouched.
pub fn smooth_number(value: f64, grid: f64) -> f64 {
    if grid == 0.0 {
        return value;
    }

    let int_grid = grid.abs().round() as i64;
    if int_grid == 0 {
        return value;
    }

    let int_value = value.round() as i64;
    let mut result = int_value.saturating_abs().saturating_add(int_grid / 2);
    result -= result % int_grid;
    if int_value > 0 {
        result as f64
    } else {
        -(result as f64) + 0.0
    }
}

/// Snap each axis of a delta independently.
pub fn smooth_delta(delta: Vec2, grid: f64) -> Vec2 {
    Vec2::new(smooth_number(delta.x, grid), smooth_number(delta.y, grid))
}
