//! Failure modes of the `flowfield` binary and the exit code each one maps to.
//!
//! | code | meaning |
//! |------|---------|
//! | 0    | document written |
//! | 2    | rejected by clap before any tracing ran |
//! | 10   | the field refused the scene (size, resolution, smoothness, seed point) |
//! | 11   | a scene file or output file could not be read or written |
//! | 12   | the user supplied something unusable (palette, `--params`, scene JSON) |
//! | 13   | a drawable document could not be turned into JSON |
//!
//! Scripts driving the tracer branch on these codes, so they only change with
//! a major version.

use flowfield_core::FlowError;
use std::fmt;

#[derive(Debug)]
pub enum CliError {
    Field(FlowError),
    Io(String),
    Input(String),
    Serialization(String),
}

impl CliError {
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Field(_) => 10,
            CliError::Io(_) => 11,
            CliError::Input(_) => 12,
            CliError::Serialization(_) => 13,
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Field(e) => write!(f, "{e}"),
            CliError::Io(msg) | CliError::Input(msg) => f.write_str(msg),
            CliError::Serialization(msg) => write!(f, "cannot encode output: {msg}"),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Field(e) => Some(e as &(dyn std::error::Error + 'static)),
            _ => None,
        }
    }
}

/// Palette, color and scene-file problems are the user's to fix, so they
/// report as input errors; core I/O stays I/O.
impl From<FlowError> for CliError {
    fn from(e: FlowError) -> Self {
        match e {
            FlowError::Io(msg) => CliError::Io(msg),
            FlowError::InvalidColor(_)
            | FlowError::InvalidPalette(_)
            | FlowError::UnknownPalette(_)
            | FlowError::InvalidScene(_) => CliError::Input(e.to_string()),
            other => CliError::Field(other),
        }
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::Serialization(e.to_string())
    }
}
