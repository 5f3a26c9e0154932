//! Hex color parsing and solid paint helpers.
//!
//! Channels are scaled linearly by 1/255. No color-space conversion and no
//! compositing happens here.

use serde::{Deserialize, Serialize};

use crate::layout::paint::Paint;
use crate::{Error, Result};

/// Normalized RGB color, each channel in `[0, 1]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

/// Normalized RGB color with an alpha channel
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

impl Rgb {
    /// Convert back to 8-bit channels.
    pub fn to_bytes(self) -> [u8; 3] {
        [
            (self.r * 255.0).round() as u8,
            (self.g * 255.0).round() as u8,
            (self.b * 255.0).round() as u8,
        ]
    }
}

fn invalid(value: &str, reason: &str) -> Error {
    Error::InvalidColorFormat {
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Parse `#RRGGBB` (leading `#` optional) into normalized channels.
pub fn hex_to_rgb(hex: &str) -> Result<Rgb> {
    let digits = hex.strip_prefix('#').unwrap_or(hex);
    if digits.len() != 6 {
        return Err(invalid(hex, "expected 6 hex digits"));
    }
    if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(invalid(hex, "contains non-hex characters"));
    }

    let channel = |range: std::ops::Range<usize>| -> Result<f64> {
        u8::from_str_radix(&digits[range], 16)
            .map(|v| v as f64 / 255.0)
            .map_err(|e| invalid(hex, &e.to_string()))
    };

    Ok(Rgb {
        r: channel(0..2)?,
        g: channel(2..4)?,
        b: channel(4..6)?,
    })
}

/// Parse a hex color and attach an alpha value.
pub fn rgba(hex: &str, alpha: f64) -> Result<Rgba> {
    let c = hex_to_rgb(hex)?;
    Ok(Rgba {
        r: c.r,
        g: c.g,
        b: c.b,
        a: alpha,
    })
}

/// A single solid paint for `hex` at the given opacity.
pub fn solid_fill(hex: &str, opacity: f64) -> Result<Vec<Paint>> {
    Ok(vec![Paint::solid(hex_to_rgb(hex)?, opacity)])
}
