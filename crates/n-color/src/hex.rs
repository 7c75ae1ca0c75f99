// SPDX-License-Identifier: MIT
//
// Canonical `#RRGGBB` colors.
//
// Everything that leaves the ladder engine is an 8-bit sRGB triple: ladder
// steps, on-colors, audit pairs and optimizer candidates. `HexColor` is that
// triple. It parses case-insensitively, always prints uppercase with a
// leading `#`, and serializes as the same string.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::color::{Color, srgb_to_linear};
use crate::error::ColorError;

/// An opaque 8-bit sRGB color in canonical `#RRGGBB` form.
///
/// ```
/// use n_color::HexColor;
///
/// let brand: HexColor = "6d94a2".parse().unwrap();
/// assert_eq!(brand.to_string(), "#6D94A2");
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HexColor {
    r: u8,
    g: u8,
    b: u8,
}

impl HexColor {
    /// Pure black, `#000000`.
    pub const BLACK: Self = Self::from_rgb8(0, 0, 0);

    /// Pure white, `#FFFFFF`.
    pub const WHITE: Self = Self::from_rgb8(255, 255, 255);

    #[inline]
    #[must_use]
    pub const fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    #[inline]
    #[must_use]
    pub const fn rgb8(self) -> (u8, u8, u8) {
        (self.r, self.g, self.b)
    }

    /// Parse a 6-digit hex color. A leading `#` and surrounding whitespace
    /// are accepted; letter case is ignored.
    ///
    /// # Errors
    ///
    /// Returns [`ColorError`] when the input is not exactly six hex digits.
    pub fn parse(input: &str) -> Result<Self, ColorError> {
        let trimmed = input.trim();
        let digits = trimmed.strip_prefix('#').unwrap_or(trimmed);

        if let Some(digit) = digits.chars().find(|c| !c.is_ascii_hexdigit()) {
            return Err(ColorError::InvalidDigit { input: input.to_owned(), digit });
        }
        if digits.len() != 6 {
            return Err(ColorError::InvalidLength { input: input.to_owned(), len: digits.len() });
        }

        let bytes = digits.as_bytes();
        Ok(Self {
            r: hex_byte(bytes[0], bytes[1]),
            g: hex_byte(bytes[2], bytes[3]),
            b: hex_byte(bytes[4], bytes[5]),
        })
    }

    /// Gamma-encoded channels in 0.0–1.0.
    #[must_use]
    pub fn to_srgb(self) -> (f64, f64, f64) {
        (
            f64::from(self.r) / 255.0,
            f64::from(self.g) / 255.0,
            f64::from(self.b) / 255.0,
        )
    }

    /// Gamma-decoded (linear light) channels in 0.0–1.0.
    #[must_use]
    pub fn to_linear(self) -> (f64, f64, f64) {
        let (r, g, b) = self.to_srgb();
        (srgb_to_linear(r), srgb_to_linear(g), srgb_to_linear(b))
    }

    /// Convert to OKLCH.
    #[must_use]
    pub fn to_oklch(self) -> Color {
        let (r, g, b) = self.to_srgb();
        Color::srgb(r, g, b)
    }
}

// Both digits are validated before this is called.
#[inline]
const fn hex_byte(hi: u8, lo: u8) -> u8 {
    (hex_digit(hi) << 4) | hex_digit(lo)
}

#[inline]
const fn hex_digit(c: u8) -> u8 {
    match c {
        b'0'..=b'9' => c - b'0',
        b'a'..=b'f' => c - b'a' + 10,
        b'A'..=b'F' => c - b'A' + 10,
        _ => 0,
    }
}

impl FromStr for HexColor {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for HexColor {
    type Error = ColorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<HexColor> for String {
    fn from(hex: HexColor) -> Self {
        hex.to_string()
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl fmt::Debug for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}
