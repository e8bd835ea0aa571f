//! RGB color type for chunk payloads.
//!
//! Colors in the pipeline are exact 8-bit triples rather than floats: a chunk
//! that says "dim red" must carry `#800000` byte for byte, because sinks
//! (logger, renderer) compare and serialize them literally. Hex parsing and
//! formatting follow the `#rrggbb` convention used by trigger definitions.

use std::fmt;

use crate::error::{Error, Result};

/// An opaque RGB color with 8-bit components.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// Create a color from components.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse a `#rrggbb` or `rrggbb` hex string.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidColor`] if the string is not six hex digits
    /// (with optional leading `#`).
    pub fn from_hex(s: &str) -> Result<Self> {
        let digits = s.strip_prefix('#').unwrap_or(s);
        if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(Error::InvalidColor(s.to_string()));
        }
        let parse = |range| u8::from_str_radix(&digits[range], 16);
        match (parse(0..2), parse(2..4), parse(4..6)) {
            (Ok(r), Ok(g), Ok(b)) => Ok(Self { r, g, b }),
            _ => Err(Error::InvalidColor(s.to_string())),
        }
    }

    /// Format as a lowercase `#rrggbb` string.
    #[must_use]
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// A (dim, bright) pair for one of the eight base ANSI colors.
///
/// SGR bold ("highlight") selects the bright member of the currently active
/// pair; see the ANSI filter for the full semantics.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ColorPair {
    pub dim: Rgb,
    pub bright: Rgb,
}

impl ColorPair {
    const fn new(dim: Rgb, bright: Rgb) -> Self {
        Self { dim, bright }
    }

    /// Pick the member selected by the given highlight state.
    #[must_use]
    pub const fn select(self, highlighted: bool) -> Rgb {
        if highlighted { self.bright } else { self.dim }
    }
}

/// The eight standard ANSI color pairs, indexed by SGR parameter minus 30.
pub const ANSI_PAIRS: [ColorPair; 8] = [
    ColorPair::new(Rgb::new(0x00, 0x00, 0x00), Rgb::new(0x80, 0x80, 0x80)), // black
    ColorPair::new(Rgb::new(0x80, 0x00, 0x00), Rgb::new(0xff, 0x00, 0x00)), // red
    ColorPair::new(Rgb::new(0x00, 0x80, 0x00), Rgb::new(0x00, 0xff, 0x00)), // green
    ColorPair::new(Rgb::new(0x80, 0x80, 0x00), Rgb::new(0xff, 0xff, 0x00)), // yellow
    ColorPair::new(Rgb::new(0x00, 0x00, 0x80), Rgb::new(0x00, 0x00, 0xff)), // blue
    ColorPair::new(Rgb::new(0x80, 0x00, 0x80), Rgb::new(0xff, 0x00, 0xff)), // magenta
    ColorPair::new(Rgb::new(0x00, 0x80, 0x80), Rgb::new(0x00, 0xff, 0xff)), // cyan
    ColorPair::new(Rgb::new(0xc0, 0xc0, 0xc0), Rgb::new(0xff, 0xff, 0xff)), // white
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_hex_with_hash() {
        assert_eq!(Rgb::from_hex("#800000").unwrap(), Rgb::new(0x80, 0, 0));
    }

    #[test]
    fn test_from_hex_without_hash() {
        assert_eq!(Rgb::from_hex("c0c0c0").unwrap(), Rgb::new(0xc0, 0xc0, 0xc0));
    }

    #[test]
    fn test_from_hex_uppercase() {
        assert_eq!(Rgb::from_hex("#FF00FF").unwrap(), Rgb::new(0xff, 0, 0xff));
    }

    #[test]
    fn test_from_hex_invalid() {
        assert!(Rgb::from_hex("#80000").is_err());
        assert!(Rgb::from_hex("#80000g").is_err());
        assert!(Rgb::from_hex("").is_err());
        assert!(Rgb::from_hex("#8000000").is_err());
    }

    #[test]
    fn test_to_hex_roundtrip() {
        let c = Rgb::new(0x12, 0xab, 0xef);
        assert_eq!(Rgb::from_hex(&c.to_hex()).unwrap(), c);
        assert_eq!(c.to_hex(), "#12abef");
    }

    #[test]
    fn test_display_matches_to_hex() {
        let c = Rgb::new(0, 0x80, 0);
        assert_eq!(format!("{c}"), c.to_hex());
    }

    #[test]
    fn test_pair_select() {
        let red = ANSI_PAIRS[1];
        assert_eq!(red.select(false).to_hex(), "#800000");
        assert_eq!(red.select(true).to_hex(), "#ff0000");
    }

    #[test]
    fn test_white_pair_values() {
        let white = ANSI_PAIRS[7];
        assert_eq!(white.dim.to_hex(), "#c0c0c0");
        assert_eq!(white.bright.to_hex(), "#ffffff");
    }
}
