//! Width indicator shown around the cursor when a trackpad gesture starts.
//!
//! Purely cosmetic: it shrinks from a large ring down to the selected line
//! width so the user sees where the cursor is and how thick it draws.

use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndicatorConfig {
    /// Diameter the ring starts at.
    pub start_size: f64,
    /// Time to shrink to the line width, in milliseconds.
    pub duration_ms: u64,
}

impl Default for IndicatorConfig {
    fn default() -> Self {
        Self {
            start_size: 100.0,
            duration_ms: 250,
        }
    }
}

/// A linear shrink from `from` to `to`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndicatorAnimation {
    from: f64,
    to: f64,
    duration: Duration,
    started_at: Instant,
}

impl IndicatorAnimation {
    pub fn start(config: IndicatorConfig, width: f64, now: Instant) -> Self {
        Self {
            from: config.start_size,
            to: width,
            duration: Duration::from_millis(config.duration_ms),
            started_at: now,
        }
    }

    pub fn started_at(&self) -> Instant {
        self.started_at
    }

    /// Ring size at `now`, or `None` once the ring has reached the width.
    pub fn size_at(&self, now: Instant) -> Option<f64> {
        let elapsed = now.saturating_duration_since(self.started_at);
        if elapsed >= self.duration {
            return None;
        }
        let t = elapsed.as_secs_f64() / self.duration.as_secs_f64();
        Some(self.from + (self.to - self.from) * t)
    }
}
