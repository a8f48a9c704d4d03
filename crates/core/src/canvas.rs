//! Canvas bounds supplied by the host.
//!
//! A [`Canvas`] only carries the drawing surface's size. Tracing uses it for
//! the half-open bounds check, raycasts use the [`Rect`] it builds, and the
//! noise grid cache compares canvases to detect a resize.

use serde::Serialize;

use crate::error::FlowError;
use crate::rect::Rect;
use crate::vector::Vector2D;

/// Size of the drawing surface in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Canvas {
    width: usize,
    height: usize,
}

impl Canvas {
    /// Returns `FlowError::InvalidDimensions` if either side is zero.
    pub fn new(width: usize, height: usize) -> Result<Self, FlowError> {
        if width == 0 || height == 0 {
            return Err(FlowError::InvalidDimensions);
        }
        Ok(Self { width, height })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// `[0, width] x [0, height]` as a raycast target.
    pub fn rect(&self) -> Rect {
        Rect::from_size(self.width as f64, self.height as f64)
    }

    /// Half-open test: `0 <= x < width` and `0 <= y < height`.
    pub fn contains(&self, p: Vector2D) -> bool {
        p.x >= 0.0 && p.x < self.width as f64 && p.y >= 0.0 && p.y < self.height as f64
    }
}
