//! Noise-driven flow field: streamline tracing and incremental reveal.
//!
//! A [`FlowField`] turns a scalar [`NoiseSource`] into a direction field
//! (`Vector2D::from_noise` of the sample at `p · smoothness`) and traces
//! [`Flowline`]s through it. Each flowline keeps a reveal cursor so a renderer
//! can draw it progressively, one segment per frame.
//!
//! Fields are ordinary owned values. Construct one with [`FlowField::new`] and
//! pass it (or a reference) to whatever needs it; independent fields never
//! share state.

use tracing::{debug, info};

use crate::canvas::Canvas;
use crate::color::Color;
use crate::config::{FieldConfig, TraceParams};
use crate::draw::{DrawSettings, Polyline, Segment};
use crate::error::FlowError;
use crate::noise_source::NoiseSource;
use crate::palette::Palette;
use crate::prng::Xorshift64;
use crate::ray::Ray2D;
use crate::vector::Vector2D;

/// Accepted range for [`FlowField::compute_noise_rays`].
const RESOLUTION_RANGE: std::ops::RangeInclusive<f64> = 0.01..=1.0;

/// Upper bound on the points reserved up front for a traced path.
const PATH_PREALLOC: usize = 1024;

/// A traced streamline.
///
/// Each step is a ray whose origin lies on the streamline and whose direction
/// is the field sampled there. The path always has at least the seed point.
#[derive(Debug, Clone, PartialEq)]
pub struct Flowline {
    path: Vec<Ray2D>,
    color: Color,
    reveal_index: usize,
}

impl Flowline {
    pub fn path(&self) -> &[Ray2D] {
        &self.path
    }

    pub fn color(&self) -> Color {
        self.color
    }

    /// Number of points on the streamline.
    pub fn len(&self) -> usize {
        self.path.len()
    }

    /// Always false: a flowline holds at least its seed.
    pub fn is_empty(&self) -> bool {
        self.path.is_empty()
    }

    /// Cursor into `path`; the renderer draws points `0..=reveal_index`,
    /// clamped to the last point.
    ///
    /// Starts at 0 and stops at `len()`, one step past the last point index.
    pub fn reveal_index(&self) -> usize {
        self.reveal_index
    }

    pub fn points(&self) -> impl Iterator<Item = Vector2D> + '_ {
        self.path.iter().map(|ray| ray.origin)
    }

    /// Points currently revealed, clamped to the path.
    pub fn revealed_points(&self) -> impl Iterator<Item = Vector2D> + '_ {
        let shown = (self.reveal_index + 1).min(self.path.len());
        self.path[..shown].iter().map(|ray| ray.origin)
    }

    /// True once the revealed prefix covers every point.
    ///
    /// That happens when the cursor reaches `len() - 1`, one step before it
    /// stops advancing at `len()`.
    pub fn is_fully_revealed(&self) -> bool {
        self.reveal_index + 1 >= self.path.len()
    }

    fn advance_reveal(&mut self) {
        if self.reveal_index < self.path.len() {
            self.reveal_index += 1;
        }
    }

    pub fn polyline(&self) -> Polyline {
        Polyline {
            color: self.color,
            points: self.points().collect(),
        }
    }

    pub fn revealed_polyline(&self) -> Polyline {
        Polyline {
            color: self.color,
            points: self.revealed_points().collect(),
        }
    }
}

/// Cache identity for the noise grid. A resize or a new resolution
/// invalidates it.
#[derive(Debug, Clone, Copy, PartialEq)]
struct GridKey {
    canvas: Canvas,
    resolution: f64,
}

struct NoiseGrid {
    key: GridKey,
    rays: Vec<Ray2D>,
}

/// Direction field over a canvas, plus the flowlines traced through it.
pub struct FlowField {
    noise: Box<dyn NoiseSource>,
    canvas: Canvas,
    smoothness: f64,
    noise_ray_len: f64,
    palette: Option<Palette>,
    rng: Xorshift64,
    grid: Option<NoiseGrid>,
    flowlines: Vec<Flowline>,
}

impl FlowField {
    /// Creates a field sampling `noise` over `canvas`.
    ///
    /// Returns `FlowError::InvalidSmoothness` unless `config.smoothness` is a
    /// positive finite number.
    pub fn new(
        noise: Box<dyn NoiseSource>,
        canvas: Canvas,
        config: FieldConfig,
    ) -> Result<Self, FlowError> {
        if !(config.smoothness.is_finite() && config.smoothness > 0.0) {
            return Err(FlowError::InvalidSmoothness(config.smoothness));
        }
        Ok(Self {
            noise,
            canvas,
            smoothness: config.smoothness,
            noise_ray_len: config.noise_ray_len,
            palette: config.palette,
            rng: Xorshift64::new(config.seed),
            grid: None,
            flowlines: Vec::new(),
        })
    }

    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    /// Replaces the bounds used by tracing and the noise grid.
    ///
    /// Existing flowlines are kept as traced. A cached grid for the old size
    /// is rebuilt on the next request.
    pub fn set_canvas(&mut self, canvas: Canvas) {
        if canvas != self.canvas {
            debug!(
                width = canvas.width(),
                height = canvas.height(),
                "canvas resized"
            );
        }
        self.canvas = canvas;
    }

    pub fn smoothness(&self) -> f64 {
        self.smoothness
    }

    pub fn palette(&self) -> Option<&Palette> {
        self.palette.as_ref()
    }

    /// Unit field direction at `p`.
    pub fn sample_direction(&self, p: Vector2D) -> Vector2D {
        let n = self
            .noise
            .sample(p.x * self.smoothness, p.y * self.smoothness);
        Vector2D::from_noise(n)
    }

    /// Traces a streamline from `origin` and stores it.
    ///
    /// The walk takes up to `segments` steps of `segment_len` along the
    /// locally sampled direction and stops early at the first point outside
    /// the canvas, which is not recorded. The path therefore holds between 1
    /// and `segments + 1` points, all inside the canvas.
    ///
    /// Returns `FlowError::SeedOutOfBounds` for an origin outside the canvas
    /// and `FlowError::InvalidSegmentLength` for a non-positive step.
    pub fn flowline_from(
        &mut self,
        origin: Vector2D,
        segments: usize,
        segment_len: f64,
    ) -> Result<&Flowline, FlowError> {
        if !(segment_len.is_finite() && segment_len > 0.0) {
            return Err(FlowError::InvalidSegmentLength(segment_len));
        }
        if !self.canvas.contains(origin) {
            return Err(FlowError::SeedOutOfBounds {
                x: origin.x,
                y: origin.y,
            });
        }

        let reserve = segments.saturating_add(1).min(PATH_PREALLOC);
        let mut path = Vec::with_capacity(reserve);
        let mut last = Ray2D::new(origin, self.sample_direction(origin));
        path.push(last);
        let mut exited = false;
        for _ in 0..segments {
            let next = last.point_at(segment_len);
            if !self.canvas.contains(next) {
                exited = true;
                break;
            }
            last = Ray2D::new(next, self.sample_direction(next));
            path.push(last);
        }

        let color = match &self.palette {
            Some(palette) => palette.pick(&mut self.rng),
            None => Color::BLACK,
        };
        debug!(
            x = origin.x,
            y = origin.y,
            points = path.len(),
            exited,
            "traced flowline"
        );

        let index = self.flowlines.len();
        self.flowlines.push(Flowline {
            path,
            color,
            reveal_index: 0,
        });
        Ok(&self.flowlines[index])
    }

    /// Traces `count` flowlines from random integer-grid seeds on the canvas.
    ///
    /// Returns the number of flowlines traced.
    pub fn seed_flowlines(&mut self, count: usize, params: TraceParams) -> Result<usize, FlowError> {
        let rect = self.canvas.rect();
        for _ in 0..count {
            let origin = Vector2D::random_in(&rect, &mut self.rng);
            self.flowline_from(origin, params.segments, params.segment_len)?;
        }
        info!(
            count,
            total = self.flowlines.len(),
            segments = params.segments,
            segment_len = params.segment_len,
            "seeded flowlines"
        );
        Ok(count)
    }

    pub fn flowlines(&self) -> &[Flowline] {
        &self.flowlines
    }

    /// Full drawables for every flowline, in tracing order.
    pub fn polylines(&self) -> Vec<Polyline> {
        self.flowlines.iter().map(Flowline::polyline).collect()
    }

    /// Advances every flowline's reveal cursor by one.
    ///
    /// Cursors stop at their path length; further calls leave them there.
    pub fn reveal_step(&mut self) {
        self.flowlines
            .iter_mut()
            .for_each(Flowline::advance_reveal);
    }

    /// Revealed prefixes of every flowline, in tracing order.
    pub fn revealed_polylines(&self) -> Vec<Polyline> {
        self.flowlines
            .iter()
            .map(Flowline::revealed_polyline)
            .collect()
    }

    pub fn is_fully_revealed(&self) -> bool {
        self.flowlines.iter().all(Flowline::is_fully_revealed)
    }

    /// Field samples on a uniform grid, cached per canvas size and resolution.
    ///
    /// `resolution` is the grid spacing as a fraction of the canvas width
    /// (and height), and must lie in `[0.01, 1]`; anything else returns
    /// `FlowError::InvalidResolution`. Each ray starts at a grid point and
    /// points along the sampled direction, `noise_ray_len` long.
    pub fn compute_noise_rays(&mut self, resolution: f64) -> Result<&[Ray2D], FlowError> {
        if !RESOLUTION_RANGE.contains(&resolution) {
            return Err(FlowError::InvalidResolution(resolution));
        }
        let key = GridKey {
            canvas: self.canvas,
            resolution,
        };
        let grid = match self.grid.take() {
            Some(grid) if grid.key == key => grid,
            _ => {
                let rays = self.sample_grid(resolution);
                debug!(resolution, rays = rays.len(), "computed noise grid");
                NoiseGrid { key, rays }
            }
        };
        Ok(self.grid.insert(grid).rays.as_slice())
    }

    fn sample_grid(&self, resolution: f64) -> Vec<Ray2D> {
        let width = self.canvas.width() as f64;
        let height = self.canvas.height() as f64;
        let xs: Vec<f64> = axis_steps(width, width * resolution).collect();
        axis_steps(height, height * resolution)
            .flat_map(|y| xs.iter().map(move |&x| Vector2D::new(x, y)))
            .map(|p| Ray2D::new(p, self.sample_direction(p) * self.noise_ray_len))
            .collect()
    }

    /// The noise grid described as segments.
    pub fn noise_segments(
        &mut self,
        resolution: f64,
        settings: &DrawSettings,
    ) -> Result<Vec<Segment>, FlowError> {
        let rays = self.compute_noise_rays(resolution)?;
        Ok(rays.iter().map(|ray| ray.to_segment(settings)).collect())
    }

    /// Drops every flowline and the cached grid.
    pub fn clear(&mut self) {
        self.flowlines.clear();
        self.grid = None;
    }
}

/// `0, step, 2·step, ...` while below `limit`.
fn axis_steps(limit: f64, step: f64) -> impl Iterator<Item = f64> {
    (0u32..)
        .map(move |i| f64::from(i) * step)
        .take_while(move |v| *v < limit)
}
