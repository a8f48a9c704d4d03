#![deny(unsafe_code)]
//! Ray casting and noise flowline tracing for generative line drawings.
//!
//! Provides the `Vector2D` value type, `Ray2D` casting and intersection,
//! the `FlowField` tracer with its cached noise grid, `NoiseSource` adapters
//! over the `noise` crate, `Palette`/`Color`, the `Xorshift64` PRNG, and
//! renderer-neutral drawables (`Segment`, `Dot`, `Polyline`). Nothing here
//! rasterizes; hosts draw the returned shapes however they like.

pub mod canvas;
pub mod color;
pub mod config;
pub mod draw;
pub mod error;
pub mod flowfield;
pub mod noise_source;
pub mod palette;
pub mod prng;
pub mod ray;
pub mod rect;
pub mod scene;
pub mod vector;

pub use canvas::Canvas;
pub use color::Color;
pub use config::{FieldConfig, TraceParams};
pub use draw::{Dot, DrawSettings, MarkerSettings, Polyline, Segment};
pub use error::FlowError;
pub use flowfield::{FlowField, Flowline};
pub use noise_source::{NoiseKind, NoiseSource, PerlinNoise, SimplexNoise};
pub use palette::Palette;
pub use prng::Xorshift64;
pub use ray::{ClosestHit, Ray2D, RayHit};
pub use rect::Rect;
pub use scene::SceneSpec;
pub use vector::Vector2D;
