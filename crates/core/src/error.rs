//! Error types for the flowfield core.
//!
//! Only configuration mistakes are errors. Geometry queries that find nothing
//! return `None`, and a flowline leaving the canvas is a normal end of tracing.

use thiserror::Error;

/// Errors produced while configuring or driving a [`FlowField`](crate::FlowField).
#[derive(Debug, Error)]
pub enum FlowError {
    /// Width or height was zero when creating a canvas.
    #[error("invalid dimensions: width and height must be non-zero")]
    InvalidDimensions,

    /// Grid resolution outside the accepted normalized range.
    #[error("resolution must be a value between 0.01 and 1, got {0}")]
    InvalidResolution(f64),

    /// Smoothness was zero, negative or not finite.
    #[error("smoothness must be a positive finite number, got {0}")]
    InvalidSmoothness(f64),

    /// Segment length was zero, negative or not finite.
    #[error("segment length must be a positive finite number, got {0}")]
    InvalidSegmentLength(f64),

    /// A flowline seed point lay outside the canvas.
    #[error("seed point ({x}, {y}) lies outside the canvas")]
    SeedOutOfBounds { x: f64, y: f64 },

    /// A color string could not be parsed.
    #[error("invalid color: {0}")]
    InvalidColor(String),

    /// A palette could not be constructed from the given colors.
    #[error("invalid palette: {0}")]
    InvalidPalette(String),

    /// No built-in palette with this name.
    #[error("unknown palette: {0}")]
    UnknownPalette(String),

    /// No noise generator registered under this name.
    #[error("unknown noise: {0}")]
    UnknownNoise(String),

    /// A scene file was not valid scene JSON.
    #[error("invalid scene: {0}")]
    InvalidScene(String),

    /// Reading or writing a scene or drawable file failed.
    #[error("i/o error: {0}")]
    Io(String),
}
