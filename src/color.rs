//! Color value types with textual parse/format
//!
//! The marshaling engine treats colors as parseable/formattable scalars;
//! these are the two concrete value types it ships with. `Color` is an
//! opaque RGB triple serialized as `#rrggbb`; `Rgba` adds an alpha channel
//! and serializes as CSS-style `rgb(r,g,b)` / `rgba(r,g,b,a)`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unrecognized color specification {spec:?}")]
pub struct ParseColorError {
    spec: String,
}

impl ParseColorError {
    fn new(spec: &str) -> Self {
        Self { spec: spec.to_string() }
    }
}

/// Opaque RGB color, one byte per channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Color {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

/// RGB color with an alpha channel, one byte per channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Rgba {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
    pub alpha: u8,
}

impl Color {
    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }
}

impl Rgba {
    pub const fn new(red: u8, green: u8, blue: u8, alpha: u8) -> Self {
        Self { red, green, blue, alpha }
    }
}

/// Parse 3 (nibble-doubled), 6, or 8 hex digits into channels
fn parse_hex_digits(digits: &str) -> Option<(u8, u8, u8, Option<u8>)> {
    // from_str_radix tolerates a leading sign, so gate on digits only
    if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(digits.get(range)?, 16).ok();
    match digits.len() {
        3 => {
            let nibble = |i| {
                let n = u8::from_str_radix(digits.get(i..i + 1)?, 16).ok()?;
                Some(n << 4 | n)
            };
            Some((nibble(0)?, nibble(1)?, nibble(2)?, None))
        }
        6 => Some((channel(0..2)?, channel(2..4)?, channel(4..6)?, None)),
        8 => Some((channel(0..2)?, channel(2..4)?, channel(4..6)?, Some(channel(6..8)?))),
        _ => None,
    }
}

impl FromStr for Color {
    type Err = ParseColorError;

    /// Accepts `#rgb` and `#rrggbb`; the leading `#` is optional
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s.trim().trim_start_matches('#');
        match parse_hex_digits(digits) {
            Some((red, green, blue, None)) => Ok(Self { red, green, blue }),
            _ => Err(ParseColorError::new(s)),
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.red, self.green, self.blue)
    }
}

impl FromStr for Rgba {
    type Err = ParseColorError;

    /// Accepts `#rgb`, `#rrggbb`, `#rrggbbaa`, `rgb(r,g,b)` and
    /// `rgba(r,g,b,a)` with `a` in 0.0..=1.0
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseColorError::new(s);
        let spec = s.trim();

        let functional = spec
            .strip_prefix("rgba")
            .or_else(|| spec.strip_prefix("rgb"));
        if let Some(args) = functional {
            let args = args
                .trim()
                .strip_prefix('(')
                .and_then(|a| a.strip_suffix(')'))
                .ok_or_else(err)?;
            let parts: Vec<&str> = args.split(',').map(str::trim).collect();

            let channel = |i: usize| parts.get(i).and_then(|p| p.parse::<u8>().ok());
            let (red, green, blue) = (
                channel(0).ok_or_else(err)?,
                channel(1).ok_or_else(err)?,
                channel(2).ok_or_else(err)?,
            );
            let alpha = match parts.len() {
                3 => 255,
                4 => {
                    let a: f64 = parts[3].parse().map_err(|_| err())?;
                    if !(0.0..=1.0).contains(&a) {
                        return Err(err());
                    }
                    (a * 255.0).round() as u8
                }
                _ => return Err(err()),
            };
            return Ok(Self { red, green, blue, alpha });
        }

        let digits = spec.trim_start_matches('#');
        match parse_hex_digits(digits) {
            Some((red, green, blue, alpha)) => Ok(Self {
                red,
                green,
                blue,
                alpha: alpha.unwrap_or(255),
            }),
            None => Err(err()),
        }
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.alpha == 255 {
            write!(f, "rgb({},{},{})", self.red, self.green, self.blue)
        } else {
            // three decimals are enough to round-trip a u8 alpha exactly
            let alpha = (self.alpha as f64 / 255.0 * 1000.0).round() / 1000.0;
            write!(f, "rgba({},{},{},{})", self.red, self.green, self.blue, alpha)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_parses_hex_forms() {
        assert_eq!("#ff8000".parse(), Ok(Color::new(255, 128, 0)));
        assert_eq!("ff8000".parse(), Ok(Color::new(255, 128, 0)));
        assert_eq!("#f80".parse(), Ok(Color::new(0xff, 0x88, 0x00)));
        assert_eq!("#FF8000".parse(), Ok(Color::new(255, 128, 0)));
    }

    #[test]
    fn test_color_rejects_garbage() {
        assert!("".parse::<Color>().is_err());
        assert!("#ff80".parse::<Color>().is_err());
        assert!("#ff8000aa".parse::<Color>().is_err());
        assert!("notacolor".parse::<Color>().is_err());
        assert!("+1f800".parse::<Color>().is_err());
    }

    #[test]
    fn test_color_formats_lowercase_hex() {
        assert_eq!(Color::new(255, 128, 0).to_string(), "#ff8000");
        assert_eq!(Color::new(0, 0, 0).to_string(), "#000000");
    }

    #[test]
    fn test_rgba_parses_hex_forms() {
        assert_eq!("#ff8000".parse(), Ok(Rgba::new(255, 128, 0, 255)));
        assert_eq!("#ff8000cc".parse(), Ok(Rgba::new(255, 128, 0, 0xcc)));
        assert_eq!("#f80".parse(), Ok(Rgba::new(0xff, 0x88, 0x00, 255)));
    }

    #[test]
    fn test_rgba_parses_functional_forms() {
        assert_eq!("rgb(255,128,0)".parse(), Ok(Rgba::new(255, 128, 0, 255)));
        assert_eq!("rgba(255, 128, 0, 0.2)".parse(), Ok(Rgba::new(255, 128, 0, 51)));
        assert_eq!("rgba(0,0,0,0)".parse(), Ok(Rgba::new(0, 0, 0, 0)));
        assert_eq!("rgba(0,0,0,1)".parse(), Ok(Rgba::new(0, 0, 0, 255)));
    }

    #[test]
    fn test_rgba_rejects_garbage() {
        assert!("rgba(255,128)".parse::<Rgba>().is_err());
        assert!("rgba(256,0,0,1)".parse::<Rgba>().is_err());
        assert!("rgba(0,0,0,1.5)".parse::<Rgba>().is_err());
        assert!("rgb(1,2,3".parse::<Rgba>().is_err());
        assert!("".parse::<Rgba>().is_err());
    }

    #[test]
    fn test_rgba_format_round_trips_every_alpha() {
        for alpha in [0u8, 1, 51, 127, 128, 200, 254, 255] {
            let color = Rgba::new(10, 20, 30, alpha);
            assert_eq!(color.to_string().parse(), Ok(color));
        }
    }

    #[test]
    fn test_rgba_opaque_formats_without_alpha() {
        assert_eq!(Rgba::new(1, 2, 3, 255).to_string(), "rgb(1,2,3)");
        assert_eq!(Rgba::new(1, 2, 3, 51).to_string(), "rgba(1,2,3,0.2)");
    }
}
