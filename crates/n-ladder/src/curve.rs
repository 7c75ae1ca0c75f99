//! Tint/shade curves: how far each ladder position moves from the base.
//!
//! A ladder position is a normalized coordinate `x` in [-2, 2]: negative
//! for tints, positive for shades, ±2 at the ends regardless of how many
//! levels the ladder has. The curves below turn `x` and the spacing scale
//! into a lightness offset and a chroma multiplier.
//!
//! The tables are literal piecewise-linear lookups. Light and dark themes
//! use different shapes: on a light page a ladder mostly darkens toward
//! its shades, while on a dark page brighter, richer steps read better than
//! darker ones, so dark tints get small lightness boosts with muted chroma
//! and dark shades gain chroma instead of losing lightness.

use crate::ladder::Theme;

/// The golden ratio φ.
pub const PHI: f64 = 1.618_033_988_749_895;

/// Light theme lightness slope: `dL = -LIGHT_LIGHTNESS_SLOPE · x · s`.
pub const LIGHT_LIGHTNESS_SLOPE: f64 = 0.05;

/// Lower bound of the chroma multiplier.
pub const MIN_CHROMA_MULTIPLIER: f64 = 0.02;

/// Upper bound of the chroma multiplier.
pub const MAX_CHROMA_MULTIPLIER: f64 = 1.80;

/// A piecewise-linear function defined by `(x, y)` knots sorted by `x`.
///
/// Outside the first and last knot the curve is flat.
#[derive(Debug, Clone, Copy)]
pub struct Curve(&'static [(f64, f64)]);

impl Curve {
    #[must_use]
    pub const fn new(knots: &'static [(f64, f64)]) -> Self {
        Self(knots)
    }

    /// Linearly interpolate the curve at `x`.
    #[must_use]
    pub fn sample(self, x: f64) -> f64 {
        let knots = self.0;
        let Some(&(first_x, first_y)) = knots.first() else {
            return 0.0;
        };
        if x <= first_x {
            return first_y;
        }

        for pair in knots.windows(2) {
            let (x0, y0) = pair[0];
            let (x1, y1) = pair[1];
            if x <= x1 {
                let t = (x - x0) / (x1 - x0);
                return (y1 - y0).mul_add(t, y0);
            }
        }

        knots.last().map_or(0.0, |&(_, y)| y)
    }
}

/// Light theme chroma exponent over `x`. The multiplier is `φ^e`: tints
/// wash out quickly, the first shades gain a little, the darkest shade
/// eases back so it does not turn muddy.
pub const LIGHT_CHROMA_EXPONENT: Curve =
    Curve::new(&[(-2.0, -1.0), (-1.0, -0.45), (0.0, 0.0), (1.0, 0.15), (2.0, -0.10)]);

/// Dark theme lightness offset over `x`, before spacing scale.
pub const DARK_LIGHTNESS: Curve =
    Curve::new(&[(-2.0, 0.10), (-1.0, 0.05), (0.0, 0.0), (1.0, -0.03), (2.0, -0.07)]);

/// Dark theme chroma exponent for tints (`x < 0`). The resulting
/// multiplier is further divided by `√φ`.
pub const DARK_TINT_CHROMA_EXPONENT: Curve =
    Curve::new(&[(-2.0, -0.80), (-1.0, -0.35), (0.0, 0.0)]);

/// Dark theme chroma exponent for shades (`x > 0`).
pub const DARK_SHADE_CHROMA_EXPONENT: Curve =
    Curve::new(&[(0.0, 0.0), (1.0, 0.35), (2.0, 0.60)]);

/// How one ladder position differs from the base.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepAdjustment {
    /// Added to the base OKLCH lightness.
    pub lightness_offset: f64,
    /// Multiplies the base OKLCH chroma.
    pub chroma_multiplier: f64,
}

/// Compute the adjustment for position `x` at spacing scale `spacing`.
#[must_use]
pub fn adjustment(theme: Theme, x: f64, spacing: f64) -> StepAdjustment {
    match theme {
        Theme::Light => StepAdjustment {
            lightness_offset: -LIGHT_LIGHTNESS_SLOPE * x * spacing,
            chroma_multiplier: chroma_multiplier(LIGHT_CHROMA_EXPONENT.sample(x), spacing),
        },
        Theme::Dark if x < 0.0 => StepAdjustment {
            lightness_offset: DARK_LIGHTNESS.sample(x) * spacing,
            chroma_multiplier: clamp_multiplier(
                chroma_multiplier(DARK_TINT_CHROMA_EXPONENT.sample(x), spacing) / PHI.sqrt(),
            ),
        },
        Theme::Dark => StepAdjustment {
            lightness_offset: DARK_LIGHTNESS.sample(x) * spacing,
            chroma_multiplier: chroma_multiplier(DARK_SHADE_CHROMA_EXPONENT.sample(x), spacing),
        },
    }
}

/// `φ^exponent`, rescaled around 1 by the spacing scale and clamped.
fn chroma_multiplier(exponent: f64, spacing: f64) -> f64 {
    clamp_multiplier((PHI.powf(exponent) - 1.0).mul_add(spacing, 1.0))
}

fn clamp_multiplier(m: f64) -> f64 {
    m.clamp(MIN_CHROMA_MULTIPLIER, MAX_CHROMA_MULTIPLIER)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64, eps: f64) -> bool {
        (a - b).abs() < eps
    }

    #[test]
    fn sample_hits_knots() {
        assert!(approx_eq(LIGHT_CHROMA_EXPONENT.sample(-2.0), -1.0, 1e-12));
        assert!(approx_eq(LIGHT_CHROMA_EXPONENT.sample(1.0), 0.15, 1e-12));
        assert!(approx_eq(DARK_LIGHTNESS.sample(0.0), 0.0, 1e-12));
    }

    #[test]
    fn sample_interpolates_between_knots() {
        assert!(approx_eq(DARK_LIGHTNESS.sample(-1.5), 0.075, 1e-12));
        assert!(approx_eq(DARK_SHADE_CHROMA_EXPONENT.sample(0.5), 0.175, 1e-12));
    }

    #[test]
    fn sample_is_flat_outside_range() {
        assert!(approx_eq(DARK_LIGHTNESS.sample(-9.0), 0.10, 1e-12));
        assert!(approx_eq(DARK_LIGHTNESS.sample(9.0), -0.07, 1e-12));
    }

    #[test]
    fn empty_curve_is_zero() {
        assert!(approx_eq(Curve::new(&[]).sample(1.0), 0.0, 1e-12));
    }

    #[test]
    fn light_tints_lighten_and_shades_darken() {
        let tint = adjustment(Theme::Light, -2.0, 1.0);
        let shade = adjustment(Theme::Light, 2.0, 1.0);
        assert!(approx_eq(tint.lightness_offset, 0.10, 1e-12));
        assert!(approx_eq(shade.lightness_offset, -0.10, 1e-12));
        assert!(tint.chroma_multiplier < 1.0);
    }

    #[test]
    fn dark_tints_are_muted_and_shades_richer() {
        let tint = adjustment(Theme::Dark, -1.0, 1.0);
        let shade = adjustment(Theme::Dark, 2.0, 1.0);
        assert!(tint.lightness_offset > 0.0);
        let light_tint = adjustment(Theme::Light, -1.0, 1.0);
        assert!(tint.lightness_offset < light_tint.lightness_offset + 1e-12);
        assert!(tint.chroma_multiplier < 1.0 / PHI.sqrt() + 1e-12);
        assert!(shade.chroma_multiplier > 1.3, "{}", shade.chroma_multiplier);
        // Dark shades lose less lightness than light shades.
        assert!(shade.lightness_offset > adjustment(Theme::Light, 2.0, 1.0).lightness_offset);
    }

    #[test]
    fn multiplier_is_clamped() {
        for s in [0.01, 1.0, 10.0, 100.0] {
            for x in [-2.0, -1.0, 1.0, 2.0] {
                for theme in [Theme::Light, Theme::Dark] {
                    let m = adjustment(theme, x, s).chroma_multiplier;
                    assert!(
                        (MIN_CHROMA_MULTIPLIER..=MAX_CHROMA_MULTIPLIER).contains(&m),
                        "{theme:?} {x} {s}: {m}"
                    );
                }
            }
        }
    }

    #[test]
    fn spacing_scales_the_offset() {
        let narrow = adjustment(Theme::Light, 2.0, 0.382).lightness_offset;
        let wide = adjustment(Theme::Light, 2.0, 1.618).lightness_offset;
        assert!(wide < narrow);
    }
}
