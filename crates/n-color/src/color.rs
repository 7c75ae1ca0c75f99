// SPDX-License-Identifier: MIT
//
// n-color: OKLCH color with sRGB gamut mapping.
//
// Single-character variable names (r, g, b, l, c, h, s, m) are the
// standard mathematical convention in color science. Renaming them would
// make the code harder to compare against reference implementations.
#![allow(clippy::many_single_char_names)]
//
// Ladder generation, on-color solving and the base-color search all move
// colors around in OKLCH, because equal numeric steps there look like equal
// visual steps. Contrast is judged on the 8-bit sRGB result, so every OKLCH
// value eventually has to land on a displayable `#RRGGBB`.
//
// Conversion pipeline:
//
//   OKLCH ↔ Oklab ↔ LMS (cube roots) ↔ Linear sRGB ↔ sRGB ↔ #RRGGBB
//
// Gamut mapping reduces chroma (L and H fixed) until the color fits sRGB.
// Chroma zero is always in gamut for L in [0, 1], so the bisection converges.

use std::fmt;

use crate::hex::HexColor;

/// Bisection steps used when pulling chroma back into the sRGB gamut.
pub const GAMUT_ITERATIONS: usize = 22;

/// Chroma below this is treated as a pure gray (hue is undefined).
const ACHROMATIC_EPS: f64 = 1e-6;

/// Tolerance on linear channels when testing gamut membership. The matrices
/// below carry ten significant digits, so white lands a hair above 1.0.
const GAMUT_EPS: f64 = 1e-9;

// ─── Color ───────────────────────────────────────────────────────────────────

/// A perceptual color stored in OKLCH space.
///
/// OKLCH is a cylindrical representation of the Oklab color space, designed
/// by Björn Ottosson. It provides perceptually uniform lightness, chroma,
/// and hue, so a ladder step of `ΔL = 0.05` reads as the same visual step
/// anywhere on the ladder.
///
/// # Examples
///
/// ```
/// use n_color::{Color, HexColor};
///
/// let brand = Color::from_hex("#6D94A2").unwrap();
/// let darker = brand.darken(0.08);
/// assert!(darker.l < brand.l);
///
/// let hex: HexColor = darker.to_hex();
/// assert_eq!(hex.to_string().len(), 7);
/// ```
#[derive(Clone, Copy)]
pub struct Color {
    /// Lightness: 0.0 (black) to 1.0 (white).
    pub l: f64,

    /// Chroma (colorfulness): 0.0 (gray) to ~0.37 (most vivid).
    /// Unbounded in theory, but sRGB gamut limits practical values.
    pub c: f64,

    /// Hue angle in degrees: 0.0 to 360.0.
    pub h: f64,
}

impl Color {
    // ─── Constructors ────────────────────────────────────────────────────

    /// Create a color from OKLCH values.
    #[inline]
    #[must_use]
    pub const fn oklch(l: f64, c: f64, h: f64) -> Self {
        Self { l, c, h }
    }

    /// Create a color from gamma-encoded sRGB values (0.0 to 1.0 range).
    #[must_use]
    pub fn srgb(r: f64, g: f64, b: f64) -> Self {
        let (l, c, h) = srgb_to_oklch(r, g, b);
        Self { l, c, h }
    }

    /// Create a color from a 6-digit hex string.
    ///
    /// Returns `None` if the string is not a valid hex color.
    #[must_use]
    pub fn from_hex(s: &str) -> Option<Self> {
        HexColor::parse(s).ok().map(HexColor::to_oklch)
    }

    /// Pure black.
    pub const BLACK: Self = Self::oklch(0.0, 0.0, 0.0);

    /// Pure white.
    pub const WHITE: Self = Self::oklch(1.0, 0.0, 0.0);

    /// Whether this color is achromatic (no visible chroma).
    #[inline]
    #[must_use]
    pub fn is_achromatic(self) -> bool {
        self.c.abs() < ACHROMATIC_EPS
    }

    // ─── Perceptual Operations ───────────────────────────────────────────

    /// Increase lightness by `amount` (clamped to 0.0–1.0).
    #[inline]
    #[must_use]
    pub fn lighten(self, amount: f64) -> Self {
        self.set_lightness(self.l + amount)
    }

    /// Decrease lightness by `amount` (clamped to 0.0–1.0).
    #[inline]
    #[must_use]
    pub fn darken(self, amount: f64) -> Self {
        self.set_lightness(self.l - amount)
    }

    /// Set lightness to an absolute value (clamped to 0.0–1.0).
    #[inline]
    #[must_use]
    pub const fn set_lightness(self, l: f64) -> Self {
        Self {
            l: l.clamp(0.0, 1.0),
            ..self
        }
    }

    /// Set chroma to an absolute value (clamped to >= 0.0).
    #[inline]
    #[must_use]
    pub const fn set_chroma(self, c: f64) -> Self {
        Self {
            c: c.max(0.0),
            ..self
        }
    }

    /// Set hue to an absolute angle (normalized to 0°–360°).
    #[inline]
    #[must_use]
    pub fn set_hue(self, h: f64) -> Self {
        Self {
            h: normalize_hue(h),
            ..self
        }
    }

    /// Shortest arc between the two hues, in degrees (0–180).
    #[inline]
    #[must_use]
    pub fn hue_distance(self, other: Self) -> f64 {
        hue_diff(self.h, other.h)
    }

    /// Replace non-finite components and pull each one into its legal range.
    ///
    /// NaN lightness or chroma becomes 0; NaN hue becomes 0°.
    #[must_use]
    pub fn sanitized(self) -> Self {
        let finite_or_zero = |v: f64| if v.is_finite() { v } else { 0.0 };
        Self {
            l: finite_or_zero(self.l).clamp(0.0, 1.0),
            c: finite_or_zero(self.c).max(0.0),
            h: normalize_hue(finite_or_zero(self.h)),
        }
    }

    // ─── Gamut ───────────────────────────────────────────────────────────

    /// Whether this color is within the sRGB gamut.
    #[must_use]
    pub fn in_srgb_gamut(self) -> bool {
        let (r, g, b) = oklch_to_linear_srgb(self.l, self.c, self.h);
        in_unit(r) && in_unit(g) && in_unit(b)
    }

    /// Reduce chroma until this color fits within the sRGB gamut.
    ///
    /// Bisects chroma between 0 and the current value for
    /// [`GAMUT_ITERATIONS`] steps, keeping lightness and hue fixed. The
    /// result is always in gamut: the lower bound starts at chroma 0 and
    /// only moves to values that tested in gamut.
    #[must_use]
    pub fn to_gamut(self) -> Self {
        let color = self.sanitized();
        if color.in_srgb_gamut() {
            return color;
        }

        let mut lo: f64 = 0.0;
        let mut hi: f64 = color.c;

        for _ in 0..GAMUT_ITERATIONS {
            let mid = (lo + hi) * 0.5;
            let trial = Self { c: mid, ..color };
            if trial.in_srgb_gamut() {
                lo = mid;
            } else {
                hi = mid;
            }
        }

        Self { c: lo, ..color }
    }

    // ─── Conversions to sRGB ─────────────────────────────────────────────

    /// Convert to gamma-encoded sRGB with gamut mapping (0.0–1.0).
    #[must_use]
    pub fn to_srgb(self) -> (f64, f64, f64) {
        let mapped = self.to_gamut();
        let (r, g, b) = oklch_to_linear_srgb(mapped.l, mapped.c, mapped.h);
        (
            linear_to_srgb(r.clamp(0.0, 1.0)),
            linear_to_srgb(g.clamp(0.0, 1.0)),
            linear_to_srgb(b.clamp(0.0, 1.0)),
        )
    }

    /// Convert to 8-bit sRGB with gamut mapping.
    #[must_use]
    pub fn to_rgb8(self) -> (u8, u8, u8) {
        let (r, g, b) = self.to_srgb();
        (to_u8(r), to_u8(g), to_u8(b))
    }

    /// Convert to a canonical `#RRGGBB` color with gamut mapping.
    #[must_use]
    pub fn to_hex(self) -> HexColor {
        let (r, g, b) = self.to_rgb8();
        HexColor::from_rgb8(r, g, b)
    }
}

impl fmt::Debug for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Color::oklch({:.4}, {:.4}, {:.1})", self.l, self.c, self.h)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl PartialEq for Color {
    fn eq(&self, other: &Self) -> bool {
        // Compare with small epsilon for floating point
        const EPS: f64 = 1e-9;
        (self.l - other.l).abs() < EPS
            && (self.c - other.c).abs() < EPS
            && (self.is_achromatic()
                || other.is_achromatic()
                || hue_diff(self.h, other.h) < EPS)
    }
}

impl Default for Color {
    /// Default is black.
    fn default() -> Self {
        Self::BLACK
    }
}

impl From<HexColor> for Color {
    fn from(hex: HexColor) -> Self {
        hex.to_oklch()
    }
}

// ─── Boundary Functions ──────────────────────────────────────────────────────

/// Parse a 6-digit hex string into OKLCH. Returns `None` on malformed input.
#[must_use]
pub fn hex_to_oklch(hex: &str) -> Option<Color> {
    Color::from_hex(hex)
}

/// Convert OKLCH to a canonical hex color. Never fails: out-of-range inputs
/// are clamped and out-of-gamut colors lose chroma until they fit.
#[must_use]
pub fn oklch_to_hex(l: f64, c: f64, h: f64) -> HexColor {
    Color::oklch(l, c, h).to_hex()
}

// ─── Color Space Conversion Functions ────────────────────────────────────────
//
// These implement the Oklab color space math created by Björn Ottosson.
// Reference: https://bottosson.github.io/posts/oklab/

/// Normalize a hue angle to the range [0, 360).
#[inline]
#[must_use]
pub fn normalize_hue(h: f64) -> f64 {
    let h = h % 360.0;
    if h < 0.0 { h + 360.0 } else { h }
}

/// Absolute hue difference (shortest arc on the color wheel).
#[inline]
#[must_use]
pub fn hue_diff(a: f64, b: f64) -> f64 {
    let d = (a - b).abs() % 360.0;
    if d > 180.0 { 360.0 - d } else { d }
}

#[inline]
fn in_unit(v: f64) -> bool {
    (-GAMUT_EPS..=1.0 + GAMUT_EPS).contains(&v)
}

// ─── OKLCH ↔ Oklab ──────────────────────────────────────────────────────────

#[inline]
fn oklch_to_oklab_ab(c: f64, h: f64) -> (f64, f64) {
    let h_rad = h.to_radians();
    (c * h_rad.cos(), c * h_rad.sin())
}

#[inline]
fn oklab_ab_to_oklch(a: f64, b: f64) -> (f64, f64) {
    let c = a.hypot(b);
    if c < ACHROMATIC_EPS {
        // Achromatic: snap to the gray axis so hue noise never leaks out.
        return (0.0, 0.0);
    }
    (c, normalize_hue(b.atan2(a).to_degrees()))
}

// ─── Oklab ↔ Linear sRGB ────────────────────────────────────────────────────
//
// The Oklab ↔ Linear sRGB conversion goes through an intermediate LMS
// (Long, Medium, Short cone response) space.

/// Convert Oklab (L, a, b) to linear sRGB.
#[inline]
fn oklab_to_linear_srgb(l_ok: f64, a: f64, b: f64) -> (f64, f64, f64) {
    // Oklab → LMS (cube roots)
    let l_ = 0.215_803_757_3f64.mul_add(b, 0.396_337_777_4f64.mul_add(a, l_ok));
    let m_ = 0.063_854_172_8f64.mul_add(-b, 0.105_561_345_8f64.mul_add(-a, l_ok));
    let s_ = 1.291_485_548_0f64.mul_add(-b, 0.089_484_177_5f64.mul_add(-a, l_ok));

    // Undo cube root
    let l = l_ * l_ * l_;
    let m = m_ * m_ * m_;
    let s = s_ * s_ * s_;

    // LMS → Linear sRGB
    let r = 0.230_969_929_2f64.mul_add(s, 4.076_741_662_1f64.mul_add(l, -(3.307_711_591_3 * m)));
    let g = 0.341_319_396_5f64.mul_add(-s, (-1.268_438_004_6f64).mul_add(l, 2.609_757_401_1 * m));
    let bl =
        1.707_614_701_0f64.mul_add(s, (-0.004_196_086_3f64).mul_add(l, -(0.703_418_614_7 * m)));

    (r, g, bl)
}

/// Convert linear sRGB to Oklab (L, a, b).
#[inline]
fn linear_srgb_to_oklab(r: f64, g: f64, b: f64) -> (f64, f64, f64) {
    // Linear sRGB → LMS
    let l = 0.051_445_992_9f64.mul_add(b, 0.412_221_470_8f64.mul_add(r, 0.536_332_536_3 * g));
    let m = 0.107_396_956_6f64.mul_add(b, 0.211_903_498_2f64.mul_add(r, 0.680_699_545_1 * g));
    let s = 0.629_978_700_5f64.mul_add(b, 0.088_302_461_9f64.mul_add(r, 0.281_718_837_6 * g));

    // Cube root (LMS → Oklab intermediate)
    let l_ = l.cbrt();
    let m_ = m.cbrt();
    let s_ = s.cbrt();

    // Oklab intermediate → Oklab
    let l_ok =
        0.004_072_046_8f64.mul_add(-s_, 0.210_454_255_3f64.mul_add(l_, 0.793_617_785_0 * m_));
    let a = 0.450_593_709_9f64.mul_add(s_, 1.977_998_495_1f64.mul_add(l_, -(2.428_592_205_0 * m_)));
    let b_ok =
        0.808_675_766_0f64.mul_add(-s_, 0.025_904_037_1f64.mul_add(l_, 0.782_771_766_2 * m_));

    (l_ok, a, b_ok)
}

// ─── Linear sRGB ↔ sRGB (Gamma) ─────────────────────────────────────────────

/// Convert a single linear sRGB component to sRGB (apply gamma).
#[inline]
#[must_use]
pub fn linear_to_srgb(c: f64) -> f64 {
    if c <= 0.003_130_8 {
        c * 12.92
    } else {
        1.055f64.mul_add(c.powf(1.0 / 2.4), -0.055)
    }
}

/// Convert a single sRGB component to linear sRGB (remove gamma).
#[inline]
#[must_use]
pub fn srgb_to_linear(c: f64) -> f64 {
    if c <= 0.040_45 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

// ─── Composite Conversions ───────────────────────────────────────────────────

/// Convert sRGB (0.0–1.0) → OKLCH.
fn srgb_to_oklch(r: f64, g: f64, b: f64) -> (f64, f64, f64) {
    let (l, a, b_ok) =
        linear_srgb_to_oklab(srgb_to_linear(r), srgb_to_linear(g), srgb_to_linear(b));
    let (c, h) = oklab_ab_to_oklch(a, b_ok);
    (l, c, h)
}

/// Convert OKLCH → linear sRGB (may be out of gamut).
fn oklch_to_linear_srgb(l: f64, c: f64, h: f64) -> (f64, f64, f64) {
    let (a, b) = oklch_to_oklab_ab(c, h);
    oklab_to_linear_srgb(l, a, b)
}

/// Convert a float (0.0–1.0) to a u8 (0–255) with correct rounding.
#[inline]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn to_u8(v: f64) -> u8 {
    // Safe: clamp guarantees 0.0 <= value <= 255.0 before truncation.
    v.mul_add(255.0, 0.5).clamp(0.0, 255.0) as u8
}

// ─── Tests ───────────────────────────────────────────────────────────────────
