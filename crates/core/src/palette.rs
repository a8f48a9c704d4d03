//! Fixed palettes of color tokens.
//!
//! Flowlines do not interpolate colors: each one takes a single palette entry,
//! chosen uniformly at random when it is traced.

use crate::color::Color;
use crate::error::FlowError;
use crate::prng::Xorshift64;

/// Names accepted by [`Palette::from_name`].
const PALETTE_NAMES: &[&str] = &[
    "poster",
    "ocean",
    "neon",
    "earth",
    "monochrome",
    "vapor",
    "fire",
];

/// A non-empty, ordered set of colors.
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    colors: Vec<Color>,
}

impl Palette {
    /// Requires at least one color.
    pub fn new(colors: Vec<Color>) -> Result<Self, FlowError> {
        if colors.is_empty() {
            return Err(FlowError::InvalidPalette(
                "palette requires at least 1 color".to_string(),
            ));
        }
        Ok(Self { colors })
    }

    /// Parses each entry with [`Color::from_hex`].
    pub fn from_hex<S: AsRef<str>>(hexes: &[S]) -> Result<Self, FlowError> {
        let colors = hexes
            .iter()
            .map(|h| Color::from_hex(h.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(colors)
    }

    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Always false for a constructed palette.
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Uniform pick driven by the caller's random source.
    pub fn pick(&self, rng: &mut Xorshift64) -> Color {
        rng.choose(&self.colors).copied().unwrap_or(Color::BLACK)
    }

    /// Looks up a built-in palette.
    pub fn from_name(name: &str) -> Result<Self, FlowError> {
        let hexes: &[&str] = match name {
            "poster" => &["#003049", "#d62828", "#f77f00", "#fcbf49", "#eae2b7"],
            "ocean" => &["#001f3f", "#003366", "#005f73", "#0a9396", "#94d2bd"],
            "neon" => &["#ff00ff", "#00ff41", "#ffff00", "#ff0080", "#00ffff"],
            "earth" => &["#5c4033", "#8b6914", "#6b8e23", "#daa520", "#d2b48c"],
            "monochrome" => &["#000000", "#404040", "#808080", "#c0c0c0", "#ffffff"],
            "vapor" => &["#7b2d8e", "#c77dff", "#ff9ebb", "#80ced6", "#a0e7e5"],
            "fire" => &["#800000", "#cc0000", "#ff4500", "#ff8c00", "#ffd700"],
            _ => return Err(FlowError::UnknownPalette(name.to_string())),
        };
        Self::from_hex(hexes)
    }

    pub fn list_names() -> &'static [&'static str] {
        PALETTE_NAMES
    }
}
