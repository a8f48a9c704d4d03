//! Renderer-facing drawable descriptions.
//!
//! The core never rasterizes anything. It describes what should be drawn
//! (line segments with optional tail markers, dots and colored polylines) and
//! leaves the drawing surface to whoever consumes these values.

use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::vector::Vector2D;

/// Perpendicular tail drawn at the start of a segment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarkerSettings {
    pub tail_color: Color,
    pub tail_length: f64,
}

impl Default for MarkerSettings {
    fn default() -> Self {
        Self {
            tail_color: Color::RED,
            tail_length: 5.0,
        }
    }
}

/// Stroke settings for describing vectors and rays as segments.
///
/// Defaults: width `1.0`, black line, red tail of length `5.0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DrawSettings {
    pub line_width: f64,
    pub line_color: Color,
    pub marker: Option<MarkerSettings>,
}

impl Default for DrawSettings {
    fn default() -> Self {
        Self {
            line_width: 1.0,
            line_color: Color::BLACK,
            marker: Some(MarkerSettings::default()),
        }
    }
}

/// A stroked line from `from` to `to`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub from: Vector2D,
    pub to: Vector2D,
    pub width: f64,
    pub color: Color,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub tail: Option<Box<Segment>>,
}

/// A filled circle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dot {
    pub center: Vector2D,
    pub radius: f64,
    pub color: Color,
}

/// An open polyline in a single color.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polyline {
    pub color: Color,
    pub points: Vec<Vector2D>,
}

impl Polyline {
    /// Number of drawable line pieces (`points - 1`, or 0).
    pub fn segment_count(&self) -> usize {
        self.points.len().saturating_sub(1)
    }
}
