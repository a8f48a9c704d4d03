//! Field and tracing configuration with JSON overrides.
//!
//! Overrides come from a loose `serde_json::Value` object (CLI `--params`,
//! scene files). Missing keys and keys of the wrong JSON type fall back to
//! the defaults; only values that parse but make no sense (a palette name
//! that does not exist, say) are errors.

use serde_json::Value;

use crate::error::FlowError;
use crate::palette::Palette;

/// Default multiplier applied to coordinates before sampling noise.
pub const DEFAULT_SMOOTHNESS: f64 = 0.001;
/// Default length of each noise-grid ray.
pub const DEFAULT_NOISE_RAY_LEN: f64 = 10.0;
/// Default number of steps per flowline.
pub const DEFAULT_SEGMENTS: usize = 100;
/// Default distance advanced per step.
pub const DEFAULT_SEGMENT_LEN: f64 = 5.0;

/// Settings fixed for the lifetime of a [`FlowField`](crate::FlowField).
#[derive(Debug, Clone, PartialEq)]
pub struct FieldConfig {
    /// Coordinates are multiplied by this before sampling; smaller is smoother.
    pub smoothness: f64,
    /// Seed for the random source choosing seed points and colors.
    pub seed: u64,
    /// Length of the rays in the cached noise grid.
    pub noise_ray_len: f64,
    /// Colors for new flowlines; `None` draws every flowline black.
    pub palette: Option<Palette>,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            smoothness: DEFAULT_SMOOTHNESS,
            seed: 42,
            noise_ray_len: DEFAULT_NOISE_RAY_LEN,
            palette: None,
        }
    }
}

impl FieldConfig {
    /// Reads `smoothness`, `seed`, `noise_ray_len` and `palette` from `params`.
    ///
    /// `palette` may be a built-in name or an array of hex strings.
    pub fn from_params(params: &Value) -> Result<Self, FlowError> {
        let defaults = Self::default();
        let palette = match params.get("palette") {
            Some(Value::String(name)) => Some(Palette::from_name(name)?),
            Some(Value::Array(entries)) => {
                let hexes = entries
                    .iter()
                    .map(|e| {
                        e.as_str().ok_or_else(|| {
                            FlowError::InvalidPalette(format!("expected hex string, got {e}"))
                        })
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                Some(Palette::from_hex(hexes.as_slice())?)
            }
            _ => defaults.palette,
        };
        Ok(Self {
            smoothness: param_f64(params, "smoothness", defaults.smoothness),
            seed: param_u64(params, "seed", defaults.seed),
            noise_ray_len: param_f64(params, "noise_ray_len", defaults.noise_ray_len),
            palette,
        })
    }

    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = Some(palette);
        self
    }

    pub fn with_smoothness(mut self, smoothness: f64) -> Self {
        self.smoothness = smoothness;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}

/// Per-flowline walk settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TraceParams {
    /// Maximum number of steps after the seed point.
    pub segments: usize,
    /// Distance advanced along the sampled direction per step.
    pub segment_len: f64,
}

impl Default for TraceParams {
    fn default() -> Self {
        Self {
            segments: DEFAULT_SEGMENTS,
            segment_len: DEFAULT_SEGMENT_LEN,
        }
    }
}

impl TraceParams {
    pub fn new(segments: usize, segment_len: f64) -> Self {
        Self {
            segments,
            segment_len,
        }
    }

    /// Reads `segments` and `segment_len` from `params`.
    pub fn from_params(params: &Value) -> Self {
        let defaults = Self::default();
        Self {
            segments: param_usize(params, "segments", defaults.segments),
            segment_len: param_f64(params, "segment_len", defaults.segment_len),
        }
    }
}

fn param_f64(params: &Value, name: &str, default: f64) -> f64 {
    params.get(name).and_then(Value::as_f64).unwrap_or(default)
}

fn param_u64(params: &Value, name: &str, default: u64) -> u64 {
    params.get(name).and_then(Value::as_u64).unwrap_or(default)
}

fn param_usize(params: &Value, name: &str, default: usize) -> usize {
    params
        .get(name)
        .and_then(Value::as_u64)
        .and_then(|v| usize::try_from(v).ok())
        .unwrap_or(default)
}
