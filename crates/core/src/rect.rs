//! Axis-aligned rectangle used as a raycast target and as canvas bounds.

use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle in canvas coordinates (y grows downward).
///
/// Consumers assume `min_x <= max_x` and `min_y <= max_y`. The type does not
/// enforce it; rectangles derived from a canvas size at read time (see
/// [`Rect::inset`]) must keep the relation true themselves.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

impl Rect {
    pub fn new(min_x: f64, max_x: f64, min_y: f64, max_y: f64) -> Self {
        Self {
            min_x,
            max_x,
            min_y,
            max_y,
        }
    }

    /// Rectangle spanning `[0, width] x [0, height]`.
    pub fn from_size(width: f64, height: f64) -> Self {
        Self::new(0.0, width, 0.0, height)
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    /// Shrinks every side by `margin`.
    ///
    /// Margins larger than half the width or height are clamped so the result
    /// collapses to the center line instead of inverting.
    pub fn inset(&self, margin: f64) -> Self {
        let mx = margin.min(self.width() / 2.0);
        let my = margin.min(self.height() / 2.0);
        Self::new(
            self.min_x + mx,
            self.max_x - mx,
            self.min_y + my,
            self.max_y - my,
        )
    }

    /// Closed containment test (edges count as inside).
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.min_x && x <= self.max_x && y >= self.min_y && y <= self.max_y
    }
}
