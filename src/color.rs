//! Hex color codes

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ColorError {
    #[error("Invalid color format: {0:?} (expected #RRGGBB or #RRGGBBAA)")]
    InvalidFormat(String),
}

/// Non-premultiplied 8-bit RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const BLACK: Self = Self::new(0, 0, 0, 255);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Parse `#RRGGBB` or `#RRGGBBAA`. Shorthand such as `#333` is rejected.
    pub fn from_hex(hex: &str) -> Result<Self, ColorError> {
        let invalid = || ColorError::InvalidFormat(hex.to_string());

        let digits = hex.strip_prefix('#').ok_or_else(invalid)?;
        if !matches!(digits.len(), 6 | 8) || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(invalid());
        }

        let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).map_err(|_| invalid());
        let a = if digits.len() == 8 { channel(6)? } else { 255 };
        Ok(Self::new(channel(0)?, channel(2)?, channel(4)?, a))
    }

    pub fn to_hex(&self) -> String {
        if self.a == 255 {
            format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
        } else {
            format!("#{:02X}{:02X}{:02X}{:02X}", self.r, self.g, self.b, self.a)
        }
    }
}

impl Default for Rgba {
    fn default() -> Self {
        Self::BLACK
    }
}

impl FromStr for Rgba {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl TryFrom<String> for Rgba {
    type Error = ColorError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::from_hex(&s)
    }
}

impl From<Rgba> for String {
    fn from(c: Rgba) -> Self {
        c.to_hex()
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgb() {
        assert_eq!(Rgba::from_hex("#FF0000").unwrap(), Rgba::new(255, 0, 0, 255));
        assert_eq!(Rgba::from_hex("#00FF00").unwrap(), Rgba::new(0, 255, 0, 255));
        assert_eq!(Rgba::from_hex("#0000FF").unwrap(), Rgba::new(0, 0, 255, 255));
    }

    #[test]
    fn test_rgba() {
        assert_eq!(Rgba::from_hex("#FEC0AD80").unwrap(), Rgba::new(254, 192, 173, 128));
    }

    #[test]
    fn test_lowercase_digits() {
        assert_eq!(Rgba::from_hex("#fec0ad").unwrap(), Rgba::new(254, 192, 173, 255));
    }

    #[test]
    fn test_invalid_formats() {
        for bad in ["", "#", "#333", "FF0000", "#FF00000", "#GG0000", "#FF0000FF00", "#ＦＦ0000"] {
            assert_eq!(
                Rgba::from_hex(bad),
                Err(ColorError::InvalidFormat(bad.to_string())),
                "{bad:?}"
            );
        }
    }

    #[test]
    fn test_display_matches_input_form() {
        assert_eq!(Rgba::from_hex("#fec0ad").unwrap().to_string(), "#FEC0AD");
        assert_eq!(Rgba::from_hex("#FEC0AD80").unwrap().to_string(), "#FEC0AD80");
    }

    #[test]
    fn test_serde_as_string() {
        let c: Rgba = serde_json::from_str(r##""#102030""##).unwrap();
        assert_eq!(c, Rgba::new(16, 32, 48, 255));
        assert_eq!(serde_json::to_string(&c).unwrap(), r##""#102030""##);
        assert!(serde_json::from_str::<Rgba>(r##""#123""##).is_err());
    }
}
