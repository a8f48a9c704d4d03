//! Reproducible description of a flow-field drawing.
//!
//! A [`SceneSpec`] captures everything needed to recreate a set of flowlines:
//! noise generator, canvas size, seed, sampling and tracing settings, and an
//! optional palette name. Scenes are plain JSON so the CLI can load them with
//! `--scene` and echo them next to its output.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::canvas::Canvas;
use crate::config::{
    FieldConfig, TraceParams, DEFAULT_SEGMENTS, DEFAULT_SEGMENT_LEN, DEFAULT_SMOOTHNESS,
};
use crate::error::FlowError;
use crate::flowfield::FlowField;
use crate::noise_source::NoiseKind;
use crate::palette::Palette;

/// Two identical scene specs produce identical flowlines.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SceneSpec {
    pub noise: String,
    pub width: usize,
    pub height: usize,
    pub seed: u64,
    #[serde(default = "default_smoothness")]
    pub smoothness: f64,
    #[serde(default)]
    pub flowlines: usize,
    #[serde(default = "default_segments")]
    pub segments: usize,
    #[serde(default = "default_segment_len")]
    pub segment_len: f64,
    #[serde(default)]
    pub palette: Option<String>,
    /// Extra overrides read by [`FieldConfig::from_params`], e.g.
    /// `noise_ray_len` or an inline hex palette.
    #[serde(default = "empty_params")]
    pub params: serde_json::Value,
}

fn default_smoothness() -> f64 {
    DEFAULT_SMOOTHNESS
}

fn default_segments() -> usize {
    DEFAULT_SEGMENTS
}

fn default_segment_len() -> f64 {
    DEFAULT_SEGMENT_LEN
}

fn empty_params() -> serde_json::Value {
    serde_json::Value::Object(serde_json::Map::new())
}

impl SceneSpec {
    /// Creates a scene with default smoothness, no palette, no flowlines and
    /// empty params.
    pub fn new(noise: &str, width: usize, height: usize, seed: u64) -> Self {
        Self {
            noise: noise.to_string(),
            width,
            height,
            seed,
            smoothness: DEFAULT_SMOOTHNESS,
            flowlines: 0,
            segments: DEFAULT_SEGMENTS,
            segment_len: DEFAULT_SEGMENT_LEN,
            palette: None,
            params: empty_params(),
        }
    }

    /// Reads a scene from a JSON file.
    ///
    /// Returns `FlowError::Io` when the file cannot be read and
    /// `FlowError::InvalidScene` when it does not parse.
    pub fn load(path: &Path) -> Result<Self, FlowError> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| FlowError::Io(format!("{}: {e}", path.display())))?;
        serde_json::from_str(&text)
            .map_err(|e| FlowError::InvalidScene(format!("{}: {e}", path.display())))
    }

    /// Checks dimensions, the noise and palette names, smoothness and
    /// segment length.
    pub fn validate(&self) -> Result<(), FlowError> {
        Canvas::new(self.width, self.height)?;
        self.width
            .checked_mul(self.height)
            .ok_or(FlowError::InvalidDimensions)?;
        NoiseKind::from_name(&self.noise)?;
        if let Some(name) = &self.palette {
            Palette::from_name(name)?;
        }
        if !(self.smoothness.is_finite() && self.smoothness > 0.0) {
            return Err(FlowError::InvalidSmoothness(self.smoothness));
        }
        if !(self.segment_len.is_finite() && self.segment_len > 0.0) {
            return Err(FlowError::InvalidSegmentLength(self.segment_len));
        }
        Ok(())
    }

    /// Field settings: `params` first, then the scene's own fields on top.
    pub fn field_config(&self) -> Result<FieldConfig, FlowError> {
        let mut config = FieldConfig::from_params(&self.params)?
            .with_seed(self.seed)
            .with_smoothness(self.smoothness);
        if let Some(name) = &self.palette {
            config = config.with_palette(Palette::from_name(name)?);
        }
        Ok(config)
    }

    pub fn trace_params(&self) -> TraceParams {
        TraceParams::new(self.segments, self.segment_len)
    }

    /// Builds an empty field for this scene.
    ///
    /// The noise generator is seeded with the low 32 bits of `seed`.
    pub fn build(&self) -> Result<FlowField, FlowError> {
        self.validate()?;
        let noise = NoiseKind::from_name(&self.noise)?.build(self.seed as u32);
        let canvas = Canvas::new(self.width, self.height)?;
        FlowField::new(noise, canvas, self.field_config()?)
    }

    /// Builds the field and seeds `flowlines` flowlines into it.
    pub fn render(&self) -> Result<FlowField, FlowError> {
        let mut field = self.build()?;
        field.seed_flowlines(self.flowlines, self.trace_params())?;
        Ok(field)
    }
}
