// SPDX-License-Identifier: MIT
//
// n-color: the color space layer for n-chroma.
//
// Parses and prints canonical `#RRGGBB` colors and converts them to and from
// OKLCH, pulling out-of-gamut OKLCH values back into sRGB by chroma
// reduction. Everything above this crate (ladders, audits, the base-color
// search) thinks in OKLCH and hands hex colors to the outside world.

pub mod color;
pub mod error;
pub mod hex;

pub use color::{Color, hex_to_oklch, oklch_to_hex};
pub use error::ColorError;
pub use hex::HexColor;
