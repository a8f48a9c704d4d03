//! Coherent-noise collaborators.
//!
//! The flow field only needs a function `(x, y) -> [-1, 1]` that varies
//! smoothly in space. [`NoiseSource`] is that seam. The `noise` crate's
//! OpenSimplex and Perlin generators are wrapped here, and any plain closure
//! works too, which is what most tests use.

use noise::{NoiseFn, OpenSimplex, Perlin};

use crate::error::FlowError;

/// Names accepted by [`NoiseKind::from_name`].
const NOISE_NAMES: &[&str] = &["simplex", "perlin"];

/// A deterministic scalar noise function.
///
/// Implementations must return the same value for the same input.
/// `Send + Sync` lets independent flowlines share one source across threads.
pub trait NoiseSource: Send + Sync {
    /// Samples the noise at `(x, y)`. Expected range is [-1, 1].
    fn sample(&self, x: f64, y: f64) -> f64;
}

impl<F> NoiseSource for F
where
    F: Fn(f64, f64) -> f64 + Send + Sync,
{
    fn sample(&self, x: f64, y: f64) -> f64 {
        self(x, y)
    }
}

/// 2D OpenSimplex noise.
pub struct SimplexNoise {
    noise: OpenSimplex,
}

impl SimplexNoise {
    pub fn new(seed: u32) -> Self {
        Self {
            noise: OpenSimplex::new(seed),
        }
    }
}

impl NoiseSource for SimplexNoise {
    fn sample(&self, x: f64, y: f64) -> f64 {
        self.noise.get([x, y])
    }
}

/// 2D Perlin noise.
pub struct PerlinNoise {
    noise: Perlin,
}

impl PerlinNoise {
    pub fn new(seed: u32) -> Self {
        Self {
            noise: Perlin::new(seed),
        }
    }
}

impl NoiseSource for PerlinNoise {
    fn sample(&self, x: f64, y: f64) -> f64 {
        self.noise.get([x, y])
    }
}

/// Registry of the built-in noise generators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoiseKind {
    Simplex,
    Perlin,
}

impl NoiseKind {
    /// Returns `FlowError::UnknownNoise` for unrecognized names.
    pub fn from_name(name: &str) -> Result<Self, FlowError> {
        match name {
            "simplex" => Ok(NoiseKind::Simplex),
            "perlin" => Ok(NoiseKind::Perlin),
            _ => Err(FlowError::UnknownNoise(name.to_string())),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            NoiseKind::Simplex => "simplex",
            NoiseKind::Perlin => "perlin",
        }
    }

    pub fn list_names() -> &'static [&'static str] {
        NOISE_NAMES
    }

    /// Builds a seeded generator of this kind.
    pub fn build(self, seed: u32) -> Box<dyn NoiseSource> {
        match self {
            NoiseKind::Simplex => Box::new(SimplexNoise::new(seed)),
            NoiseKind::Perlin => Box::new(PerlinNoise::new(seed)),
        }
    }
}
