//! RGB color values, CSS parsing and channel-wise interpolation
//!
//! Colors are accepted in any CSS format supported by `csscolorparser`
//! (named colors, hex, `rgb()`, `hsl()`, ...) and stored as 8-bit sRGB
//! triples.

use std::fmt;
use std::str::FromStr;

use palette::{Mix, Srgb};
use serde::{Deserialize, Serialize, Serializer};

use crate::{RankhueError, Result};

/// An 8-bit sRGB color triple
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(Srgb<u8>);

impl Rgb {
    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Self(Srgb::new(red, green, blue))
    }

    /// Parse a CSS color string. Alpha is discarded.
    pub fn parse(spec: &str) -> Result<Self> {
        let parsed = csscolorparser::parse(spec.trim()).map_err(|e| {
            RankhueError::InvalidColorSpec {
                spec: spec.to_string(),
                reason: e.to_string(),
            }
        })?;
        let srgb: Srgb<u8> = Srgb::new(parsed.r, parsed.g, parsed.b).into_format();
        Ok(Self(srgb))
    }

    pub fn red(&self) -> u8 {
        self.0.red
    }

    pub fn green(&self) -> u8 {
        self.0.green
    }

    pub fn blue(&self) -> u8 {
        self.0.blue
    }

    pub fn channels(&self) -> [u8; 3] {
        [self.0.red, self.0.green, self.0.blue]
    }

    /// Blend in gamma-encoded sRGB space: `t = 0` gives `self`, `t = 1` gives `other`.
    ///
    /// Channels are mixed as floats and rounded back to 8 bits. `t` is
    /// clamped to `[0, 1]`.
    pub fn lerp(&self, other: &Rgb, t: f64) -> Rgb {
        let t = t.clamp(0.0, 1.0);
        let a: Srgb<f64> = self.0.into_format();
        let b: Srgb<f64> = other.0.into_format();
        Rgb(a.mix(b, t).into_format())
    }

    /// `#rrggbb`, lowercase
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.red(), self.green(), self.blue())
    }

    /// `rgb(r, g, b)`
    pub fn to_css_rgb(&self) -> String {
        format!("rgb({}, {}, {})", self.red(), self.green(), self.blue())
    }

    pub fn format(&self, format: ColorFormat) -> String {
        match format {
            ColorFormat::Hex => self.to_hex(),
            ColorFormat::Rgb => self.to_css_rgb(),
        }
    }
}

impl From<[u8; 3]> for Rgb {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Rgb::new(r, g, b)
    }
}

impl FromStr for Rgb {
    type Err = RankhueError;

    fn from_str(s: &str) -> Result<Self> {
        Rgb::parse(s)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl Serialize for Rgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

/// Output representation requested by the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorFormat {
    /// `#rrggbb`
    #[default]
    Hex,
    /// `rgb(r, g, b)`
    Rgb,
}

impl FromStr for ColorFormat {
    type Err = RankhueError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "hex" => Ok(ColorFormat::Hex),
            "rgb" => Ok(ColorFormat::Rgb),
            other => Err(RankhueError::ConfigError(format!(
                "Unknown color format '{}' (expected 'hex' or 'rgb')",
                other
            ))),
        }
    }
}

impl fmt::Display for ColorFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ColorFormat::Hex => "hex",
            ColorFormat::Rgb => "rgb",
        };
        write!(f, "{}", s)
    }
}
