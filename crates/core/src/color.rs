//! Opaque display color token.
//!
//! The core never blends or converts colors; it only hands them to a
//! renderer. A [`Color`] is therefore just an 8-bit RGB triple that
//! serializes as `"#rrggbb"`.

use std::fmt;
use std::str::FromStr;

use crate::error::FlowError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// 8-bit sRGB color, serialized as a `"#rrggbb"` hex string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const RED: Color = Color::rgb(255, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parses `"#rrggbb"` or `"rrggbb"` (case insensitive).
    ///
    /// The optional `#` matters: hand-written palettes routinely drop it.
    pub fn from_hex(hex: &str) -> Result<Color, FlowError> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(FlowError::InvalidColor(format!(
                "expected 6 hex digits in {hex:?}"
            )));
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&digits[range], 16)
                .map_err(|e| FlowError::InvalidColor(format!("{hex:?}: {e}")))
        };
        Ok(Color::rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }

    pub fn to_hex(self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for Color {
    type Err = FlowError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Color::from_hex(s)
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Color::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_with_and_without_hash() {
        assert_eq!(Color::from_hex("#d62828").unwrap(), Color::rgb(0xd6, 0x28, 0x28));
        assert_eq!(Color::from_hex("f77f00").unwrap(), Color::rgb(0xf7, 0x7f, 0x00));
    }

    #[test]
    fn parsing_is_case_insensitive() {
        assert_eq!(
            Color::from_hex("#FCBF49").unwrap(),
            Color::from_hex("#fcbf49").unwrap()
        );
    }

    #[test]
    fn rejects_short_and_non_hex_input() {
        assert!(matches!(Color::from_hex("#000"), Err(FlowError::InvalidColor(_))));
        assert!(matches!(Color::from_hex("#zzzzzz"), Err(FlowError::InvalidColor(_))));
        assert!(Color::from_hex("").is_err());
    }

    #[test]
    fn rejects_signed_channels() {
        assert!(matches!(Color::from_hex("#+1+2+3"), Err(FlowError::InvalidColor(_))));
        assert!(Color::from_hex("-1-2-3").is_err());
    }

    #[test]
    fn rejects_multibyte_input_without_panicking() {
        assert!(Color::from_hex("ééé").is_err());
    }

    #[test]
    fn displays_lowercase_hex() {
        assert_eq!(Color::rgb(0, 0x30, 0x49).to_string(), "#003049");
        assert_eq!(Color::BLACK.to_hex(), "#000000");
    }

    #[test]
    fn serializes_as_hex_string() {
        let json = serde_json::to_string(&Color::RED).unwrap();
        assert_eq!(json, "\"#ff0000\"");
        let back: Color = serde_json::from_str("\"eae2b7\"").unwrap();
        assert_eq!(back, Color::rgb(0xea, 0xe2, 0xb7));
    }

    #[test]
    fn deserializing_bad_hex_fails() {
        assert!(serde_json::from_str::<Color>("\"nope\"").is_err());
    }
}
