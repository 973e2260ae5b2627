//! Color string parsing.
//!
//! Palette files store colors exactly as the author wrote them. They are only
//! turned into [`Rgb`] values when the plotting backend needs numbers:
//! colormap registration, the default color cycle and swatch rendering.
//!
//! Accepted forms:
//!
//! - `#rgb`, `#rrggbb`, `#rrggbbaa` (alpha is dropped)
//! - single-letter base colors (`r`, `g`, `b`, `c`, `m`, `y`, `k`, `w`)
//! - Tableau names (`tab:blue`, `tab:orange`, ...)
//! - common CSS names (`red`, `steelblue`, `darkgray`, ...)
//! - grey levels as a number string in `[0, 1]` (`"0.75"`)

use crate::error::{StyleError, StyleResult};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

const NAMED_COLORS: &[(&str, (u8, u8, u8))] = &[
    // Base colors
    ("b", (0x00, 0x00, 0xff)),
    ("g", (0x00, 0x80, 0x00)),
    ("r", (0xff, 0x00, 0x00)),
    ("c", (0x00, 0xbf, 0xbf)),
    ("m", (0xbf, 0x00, 0xbf)),
    ("y", (0xbf, 0xbf, 0x00)),
    ("k", (0x00, 0x00, 0x00)),
    ("w", (0xff, 0xff, 0xff)),
    // Tableau
    ("tab:blue", (0x1f, 0x77, 0xb4)),
    ("tab:orange", (0xff, 0x7f, 0x0e)),
    ("tab:green", (0x2c, 0xa0, 0x2c)),
    ("tab:red", (0xd6, 0x27, 0x28)),
    ("tab:purple", (0x94, 0x67, 0xbd)),
    ("tab:brown", (0x8c, 0x56, 0x4b)),
    ("tab:pink", (0xe3, 0x77, 0xc2)),
    ("tab:gray", (0x7f, 0x7f, 0x7f)),
    ("tab:grey", (0x7f, 0x7f, 0x7f)),
    ("tab:olive", (0xbc, 0xbd, 0x22)),
    ("tab:cyan", (0x17, 0xbe, 0xcf)),
    // CSS
    ("black", (0x00, 0x00, 0x00)),
    ("white", (0xff, 0xff, 0xff)),
    ("red", (0xff, 0x00, 0x00)),
    ("green", (0x00, 0x80, 0x00)),
    ("blue", (0x00, 0x00, 0xff)),
    ("yellow", (0xff, 0xff, 0x00)),
    ("cyan", (0x00, 0xff, 0xff)),
    ("aqua", (0x00, 0xff, 0xff)),
    ("magenta", (0xff, 0x00, 0xff)),
    ("fuchsia", (0xff, 0x00, 0xff)),
    ("gray", (0x80, 0x80, 0x80)),
    ("grey", (0x80, 0x80, 0x80)),
    ("darkgray", (0xa9, 0xa9, 0xa9)),
    ("darkgrey", (0xa9, 0xa9, 0xa9)),
    ("lightgray", (0xd3, 0xd3, 0xd3)),
    ("lightgrey", (0xd3, 0xd3, 0xd3)),
    ("dimgray", (0x69, 0x69, 0x69)),
    ("dimgrey", (0x69, 0x69, 0x69)),
    ("silver", (0xc0, 0xc0, 0xc0)),
    ("whitesmoke", (0xf5, 0xf5, 0xf5)),
    ("orange", (0xff, 0xa5, 0x00)),
    ("darkorange", (0xff, 0x8c, 0x00)),
    ("gold", (0xff, 0xd7, 0x00)),
    ("purple", (0x80, 0x00, 0x80)),
    ("violet", (0xee, 0x82, 0xee)),
    ("indigo", (0x4b, 0x00, 0x82)),
    ("pink", (0xff, 0xc0, 0xcb)),
    ("hotpink", (0xff, 0x69, 0xb4)),
    ("brown", (0xa5, 0x2a, 0x2a)),
    ("maroon", (0x80, 0x00, 0x00)),
    ("olive", (0x80, 0x80, 0x00)),
    ("navy", (0x00, 0x00, 0x80)),
    ("teal", (0x00, 0x80, 0x80)),
    ("lime", (0x00, 0xff, 0x00)),
    ("coral", (0xff, 0x7f, 0x50)),
    ("salmon", (0xfa, 0x80, 0x72)),
    ("tomato", (0xff, 0x63, 0x47)),
    ("crimson", (0xdc, 0x14, 0x3c)),
    ("firebrick", (0xb2, 0x22, 0x22)),
    ("steelblue", (0x46, 0x82, 0xb4)),
    ("skyblue", (0x87, 0xce, 0xeb)),
    ("royalblue", (0x41, 0x69, 0xe1)),
    ("darkblue", (0x00, 0x00, 0x8b)),
    ("lightblue", (0xad, 0xd8, 0xe6)),
    ("darkgreen", (0x00, 0x64, 0x00)),
    ("forestgreen", (0x22, 0x8b, 0x22)),
    ("seagreen", (0x2e, 0x8b, 0x57)),
    ("lightgreen", (0x90, 0xee, 0x90)),
    ("darkred", (0x8b, 0x00, 0x00)),
    ("turquoise", (0x40, 0xe0, 0xd0)),
    ("tan", (0xd2, 0xb4, 0x8c)),
    ("beige", (0xf5, 0xf5, 0xdc)),
    ("ivory", (0xff, 0xff, 0xf0)),
    ("khaki", (0xf0, 0xe6, 0x8c)),
    ("orchid", (0xda, 0x70, 0xd6)),
    ("plum", (0xdd, 0xa0, 0xdd)),
    ("slategray", (0x70, 0x80, 0x90)),
    ("slategrey", (0x70, 0x80, 0x90)),
];

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse a color string as it appears in palette and theme files.
    pub fn parse(value: &str) -> StyleResult<Self> {
        let trimmed = value.trim();
        let invalid = || StyleError::InvalidColor {
            value: value.to_string(),
        };

        if let Some(hex) = trimmed.strip_prefix('#') {
            return Self::parse_hex(hex).ok_or_else(invalid);
        }

        let lowered = trimmed.to_lowercase();
        if let Some((_, (r, g, b))) = NAMED_COLORS.iter().find(|(name, _)| *name == lowered) {
            return Ok(Self::new(*r, *g, *b));
        }

        // Grey level, e.g. "0.5"
        if let Ok(level) = lowered.parse::<f64>() {
            if (0.0..=1.0).contains(&level) {
                let channel = (level * 255.0).round() as u8;
                return Ok(Self::new(channel, channel, channel));
            }
        }

        Err(invalid())
    }

    fn parse_hex(hex: &str) -> Option<Self> {
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        let channel = |s: &str| u8::from_str_radix(s, 16).ok();

        match hex.len() {
            3 => {
                let expand = |i: usize| channel(&hex[i..=i]).map(|v| v * 17);
                Some(Self::new(expand(0)?, expand(1)?, expand(2)?))
            }
            6 | 8 => Some(Self::new(
                channel(&hex[0..2])?,
                channel(&hex[2..4])?,
                channel(&hex[4..6])?,
            )),
            _ => None,
        }
    }

    /// Relative brightness in `[0, 1]`, used to pick readable label text.
    pub fn luminance(&self) -> f64 {
        (0.299 * self.r as f64 + 0.587 * self.g as f64 + 0.114 * self.b as f64) / 255.0
    }

    /// Linear interpolation between two colors, `t` clamped to `[0, 1]`.
    pub fn lerp(&self, other: &Rgb, t: f64) -> Rgb {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;
        Rgb::new(
            mix(self.r, other.r),
            mix(self.g, other.g),
            mix(self.b, other.b),
        )
    }

    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

/// Parse every color of a list, failing on the first invalid entry.
pub fn parse_colors<S: AsRef<str>>(colors: &[S]) -> StyleResult<Vec<Rgb>> {
    colors.iter().map(|c| Rgb::parse(c.as_ref())).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use claims::*;

    #[test]
    fn test_parse_hex_forms() {
        assert_eq!(assert_ok!(Rgb::parse("#1f77b4")), Rgb::new(0x1f, 0x77, 0xb4));
        assert_eq!(assert_ok!(Rgb::parse("#ABC")), Rgb::new(0xaa, 0xbb, 0xcc));
        assert_eq!(assert_ok!(Rgb::parse("#ff000080")), Rgb::new(0xff, 0, 0));
    }

    #[test]
    fn test_parse_hex_rejects_non_digits() {
        assert_err!(Rgb::parse("#+f+f+f"));
        assert_err!(Rgb::parse("#ff0000zz"));
        assert_err!(Rgb::parse("#12345g"));
        assert_err!(Rgb::parse("#ffff"));
    }

    #[test]
    fn test_parse_named_colors() {
        assert_eq!(assert_ok!(Rgb::parse("red")), Rgb::new(0xff, 0, 0));
        assert_eq!(assert_ok!(Rgb::parse("Tab:Blue")), Rgb::new(0x1f, 0x77, 0xb4));
        assert_eq!(assert_ok!(Rgb::parse("k")), Rgb::new(0, 0, 0));
        assert_eq!(assert_ok!(Rgb::parse("0.5")), Rgb::new(128, 128, 128));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_err!(Rgb::parse("#12345"));
        assert_err!(Rgb::parse("#gggggg"));
        assert_err!(Rgb::parse("not-a-color"));
        assert_err!(Rgb::parse("1.5"));
        assert_err!(Rgb::parse(""));
    }

    #[test]
    fn test_luminance_picks_text_color() {
        assert!(Rgb::new(0, 0, 0).luminance() < 0.5);
        assert!(Rgb::new(255, 255, 255).luminance() > 0.5);
        assert!(Rgb::new(0xff, 0xff, 0x00).luminance() > 0.5);
    }

    #[test]
    fn test_lerp_endpoints() {
        let black = Rgb::new(0, 0, 0);
        let white = Rgb::new(255, 255, 255);

        assert_eq!(black.lerp(&white, 0.0), black);
        assert_eq!(black.lerp(&white, 1.0), white);
        assert_eq!(black.lerp(&white, 0.5), Rgb::new(128, 128, 128));
        assert_eq!(black.lerp(&white, 7.0), white);
    }
}
