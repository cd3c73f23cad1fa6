//! Play-surface coordinates.
//!
//! Aim points live in a percentage space: `(0, 0)` is the top-left corner of
//! the play surface and `(100, 100)` the bottom-right.

use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Lower bound of the percentage space.
pub const SURFACE_MIN: f64 = 0.0;

/// Upper bound of the percentage space.
pub const SURFACE_MAX: f64 = 100.0;

/// Clamps a coordinate into `[0, 100]`. `NaN` maps to the lower bound.
#[instrument]
pub fn clamp_percent(value: f64) -> f64 {
    if value.is_nan() {
        return SURFACE_MIN;
    }
    value.clamp(SURFACE_MIN, SURFACE_MAX)
}

/// A point on the play surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal coordinate.
    pub x: f64,
    /// Vertical coordinate, growing downwards.
    pub y: f64,
}

impl Point {
    /// Creates a point without clamping.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Creates a point clamped into the play surface.
    #[instrument]
    pub fn clamped(x: f64, y: f64) -> Self {
        Self {
            x: clamp_percent(x),
            y: clamp_percent(y),
        }
    }

    /// Center of the play surface.
    pub const fn center() -> Self {
        Self::new(50.0, 50.0)
    }

    /// Euclidean distance to `other`.
    pub fn distance_to(&self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Returns this point moved by `(dx, dy)` and clamped into the surface.
    pub fn nudged(&self, dx: f64, dy: f64) -> Self {
        Self::clamped(self.x + dx, self.y + dy)
    }
}

impl Default for Point {
    fn default() -> Self {
        Self::center()
    }
}
