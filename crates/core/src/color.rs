//! Typed RGB colours for the coloured text-box layout.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// An sRGB colour triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Upper-case hex digits as used by DrawingML `srgbClr`.
    pub fn to_hex(self) -> String {
        format!("{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// Parse `"R,G,B"` (optionally wrapped in parentheses) or `"#RRGGBB"`.
    pub fn parse(input: &str) -> Result<Self> {
        let text = input.trim();
        let invalid = || Error::InvalidColor(input.to_string());

        if let Some(hex) = text.strip_prefix('#') {
            if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
                return Err(invalid());
            }
            let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid());
            return Ok(Self::new(channel(0)?, channel(2)?, channel(4)?));
        }

        let inner = text
            .strip_prefix('(')
            .and_then(|t| t.strip_suffix(')'))
            .unwrap_or(text);

        let components = inner
            .split(',')
            .map(|part| part.trim().parse::<u8>().map_err(|_| invalid()))
            .collect::<Result<Vec<u8>>>()?;

        match components.as_slice() {
            [r, g, b] => Ok(Self::new(*r, *g, *b)),
            _ => Err(invalid()),
        }
    }
}

impl FromStr for Rgb {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{}", self.r, self.g, self.b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_triple() {
        assert_eq!(Rgb::parse("12,34,56").unwrap(), Rgb::new(12, 34, 56));
        assert_eq!(Rgb::parse(" 0, 0 ,255 ").unwrap(), Rgb::new(0, 0, 255));
        assert_eq!(Rgb::parse("(255, 255, 255)").unwrap(), Rgb::WHITE);
    }

    #[test]
    fn test_parse_hex() {
        assert_eq!(Rgb::parse("#0c2238").unwrap(), Rgb::new(12, 34, 56));
        assert_eq!(Rgb::parse("#FFFFFF").unwrap(), Rgb::WHITE);
    }

    #[test]
    fn test_rejects_out_of_range_and_malformed() {
        assert!(matches!(Rgb::parse("256,0,0"), Err(Error::InvalidColor(_))));
        assert!(Rgb::parse("-1,0,0").is_err());
        assert!(Rgb::parse("1,2").is_err());
        assert!(Rgb::parse("1,2,3,4").is_err());
        assert!(Rgb::parse("#12345").is_err());
        assert!(Rgb::parse("#gg0000").is_err());
        assert!(Rgb::parse("__import__('os')").is_err());
        assert!(Rgb::parse("").is_err());
    }

    #[test]
    fn test_hex_and_display() {
        let color = Rgb::new(12, 34, 56);
        assert_eq!(color.to_hex(), "0C2238");
        assert_eq!(color.to_string(), "12,34,56");
        assert_eq!(color.to_string().parse::<Rgb>().unwrap(), color);
    }
}
