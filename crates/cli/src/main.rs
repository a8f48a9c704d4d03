#![deny(unsafe_code)]
//! CLI binary for the flowfield line tracer.
//!
//! Subcommands:
//! - `trace`: seed flowlines through a noise field, print polylines
//! - `reveal`: trace, advance the reveal cursor N frames, print the prefixes
//! - `grid`: print the sampled noise grid as segments
//! - `cast`: cast a ray from the canvas center against an inset rect
//! - `list`: print available noise generators and palettes
//!
//! Drawables go to stdout (or `--output`) as JSON; logs go to stderr.

mod error;

use clap::{Args, Parser, Subcommand};
use error::CliError;
use flowfield_core::{DrawSettings, NoiseKind, Palette, Polyline, Ray2D, SceneSpec};
use serde_json::{json, Value};
use std::path::{Path, PathBuf};
use std::process;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "flowfield", about = "Noise flowline tracer")]
struct Cli {
    /// Report errors as JSON instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    /// Increase log verbosity (-v info, -vv debug). `RUST_LOG` overrides.
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Load the scene from a JSON file instead of the scene flags.
    #[arg(long, global = true)]
    scene: Option<PathBuf>,

    /// Write the JSON document here instead of stdout.
    #[arg(short, long, global = true)]
    output: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

/// Scene flags shared by every drawing subcommand.
#[derive(Args, Clone)]
struct SceneArgs {
    /// Noise generator (simplex, perlin).
    #[arg(long, default_value = "simplex")]
    noise: String,

    /// Canvas width in pixels.
    #[arg(short = 'W', long, default_value_t = 512)]
    width: usize,

    /// Canvas height in pixels.
    #[arg(short = 'H', long, default_value_t = 512)]
    height: usize,

    /// PRNG seed for deterministic output.
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Coordinate multiplier before sampling noise.
    #[arg(long, default_value_t = flowfield_core::config::DEFAULT_SMOOTHNESS)]
    smoothness: f64,

    /// Number of flowlines to seed.
    #[arg(short = 'n', long, default_value_t = 200)]
    flowlines: usize,

    /// Maximum steps per flowline.
    #[arg(long, default_value_t = flowfield_core::config::DEFAULT_SEGMENTS)]
    segments: usize,

    /// Distance advanced per step.
    #[arg(long, default_value_t = flowfield_core::config::DEFAULT_SEGMENT_LEN)]
    segment_len: f64,

    /// Palette name (poster, ocean, neon, earth, monochrome, vapor, fire).
    #[arg(short, long)]
    palette: Option<String>,

    /// Field parameters as a JSON string.
    #[arg(long, default_value = "{}")]
    params: String,
}

#[derive(Subcommand)]
enum Command {
    /// Seed flowlines and print them as polylines.
    Trace {
        #[command(flatten)]
        scene: SceneArgs,
    },
    /// Seed flowlines, advance the reveal N frames, print the revealed prefixes.
    Reveal {
        #[command(flatten)]
        scene: SceneArgs,

        /// Number of reveal steps to apply.
        #[arg(short, long, default_value_t = 10)]
        frames: usize,
    },
    /// Print the noise grid as segments.
    Grid {
        #[command(flatten)]
        scene: SceneArgs,

        /// Grid spacing as a fraction of the canvas size, in [0.01, 1].
        #[arg(short, long, default_value_t = 0.05)]
        resolution: f64,
    },
    /// Cast a ray from the canvas center against the inset canvas rect.
    Cast {
        #[command(flatten)]
        scene: SceneArgs,

        /// Ray angle in radians, measured from +x.
        #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
        angle: f64,

        /// Inset applied to every side of the canvas rect.
        #[arg(long, default_value_t = 0.0)]
        margin: f64,
    },
    /// List available noise generators and palettes.
    List,
}

impl SceneArgs {
    fn to_scene(&self) -> Result<SceneSpec, CliError> {
        let params: Value = serde_json::from_str(&self.params)
            .map_err(|e| CliError::Input(format!("invalid --params JSON: {e}")))?;
        let mut scene = SceneSpec::new(&self.noise, self.width, self.height, self.seed);
        scene.smoothness = self.smoothness;
        scene.flowlines = self.flowlines;
        scene.segments = self.segments;
        scene.segment_len = self.segment_len;
        scene.palette = self.palette.clone();
        scene.params = params;
        Ok(scene)
    }
}

/// The scene file wins over the flags when both are given.
fn resolve_scene(file: Option<&Path>, args: &SceneArgs) -> Result<SceneSpec, CliError> {
    let scene = match file {
        Some(path) => {
            debug!(path = %path.display(), "loading scene file");
            SceneSpec::load(path)?
        }
        None => args.to_scene()?,
    };
    scene.validate()?;
    Ok(scene)
}

/// Pretty-prints `doc` to `output`, or stdout when unset.
fn emit(doc: &Value, output: Option<&Path>) -> Result<(), CliError> {
    let text = serde_json::to_string_pretty(doc)?;
    match output {
        Some(path) => {
            std::fs::write(path, text + "\n")
                .map_err(|e| CliError::Io(format!("{}: {e}", path.display())))?;
            info!(path = %path.display(), "wrote output");
        }
        None => println!("{text}"),
    }
    Ok(())
}

fn trace_doc(scene: &SceneSpec) -> Result<Value, CliError> {
    let field = scene.render()?;
    Ok(json!({
        "scene": scene,
        "flowlines": field.polylines(),
    }))
}

fn reveal_doc(scene: &SceneSpec, frames: usize) -> Result<Value, CliError> {
    let mut field = scene.render()?;
    (0..frames).for_each(|_| field.reveal_step());
    let revealed = field.revealed_polylines();
    let shown: usize = revealed.iter().map(Polyline::segment_count).sum();
    let total: usize = field
        .flowlines()
        .iter()
        .map(|line| line.len().saturating_sub(1))
        .sum();
    Ok(json!({
        "scene": scene,
        "frames": frames,
        "fully_revealed": field.is_fully_revealed(),
        "segments_shown": shown,
        "segments_total": total,
        "flowlines": revealed,
    }))
}

fn grid_doc(scene: &SceneSpec, resolution: f64) -> Result<Value, CliError> {
    let mut field = scene.build()?;
    let segments = field.noise_segments(resolution, &DrawSettings::default())?;
    Ok(json!({
        "scene": scene,
        "resolution": resolution,
        "segments": segments,
    }))
}

fn cast_doc(scene: &SceneSpec, angle: f64, margin: f64) -> Result<Value, CliError> {
    let field = scene.build()?;
    let rect = field.canvas().rect().inset(margin);
    let mut ray = Ray2D::center(&field.canvas().rect(), false);
    ray.dir.rotate_mut(angle);
    let hit = ray.raycast(&rect).map(|hit| {
        json!({
            "point": hit.point,
            "s": hit.s,
            "segment": (hit.point - ray.origin).segment_from(ray.origin, &DrawSettings::default()),
        })
    });
    Ok(json!({
        "scene": scene,
        "ray": ray,
        "rect": rect,
        "hit": hit,
    }))
}

fn run(cli: Cli) -> Result<(), CliError> {
    let scene_file = cli.scene.as_deref();
    let output = cli.output.as_deref();
    let doc = match &cli.command {
        Command::List => {
            let noises = NoiseKind::list_names();
            let palettes = Palette::list_names();
            if !cli.json && output.is_none() {
                println!("Noise:");
                for name in noises {
                    println!("  {name}");
                }
                println!("Palettes:");
                println!("  {}", palettes.join(", "));
                return Ok(());
            }
            json!({
                "noise": noises,
                "palettes": palettes,
            })
        }
        Command::Trace { scene } => trace_doc(&resolve_scene(scene_file, scene)?)?,
        Command::Reveal { scene, frames } => {
            reveal_doc(&resolve_scene(scene_file, scene)?, *frames)?
        }
        Command::Grid { scene, resolution } => {
            grid_doc(&resolve_scene(scene_file, scene)?, *resolution)?
        }
        Command::Cast {
            scene,
            angle,
            margin,
        } => cast_doc(&resolve_scene(scene_file, scene)?, *angle, *margin)?,
    };
    emit(&doc, output)
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let json_mode = cli.json;
    if let Err(e) = run(cli) {
        if json_mode {
            let j = serde_json::json!({"error": e.to_string(), "exit_code": e.exit_code()});
            eprintln!("{}", serde_json::to_string_pretty(&j).unwrap_or_default());
        } else {
            eprintln!("error: {e}");
        }
        process::exit(e.exit_code());
    }
}
