//! WCAG contrast evaluation and on-color solving.
//!
//! Two thresholds matter for the audit:
//!
//! - Text: contrast ratio >= 4.5:1 (WCAG AA body text)
//! - UI indicators: contrast ratio >= 3:1 (focus rings, borders)
//!
//! Contrast is judged in sRGB relative luminance space (the WCAG
//! definition), but adjustments happen in OKLCH lightness because OKLCH
//! steps are perceptually uniform.

use n_color::{Color, HexColor};

/// Minimum ratio for text, including the label on every ladder step.
pub const TEXT_CONTRAST: f64 = 4.5;

/// Minimum ratio for non-text UI indicators.
pub const UI_CONTRAST: f64 = 3.0;

/// OKLCH lightness increment used by [`ensure_readability`].
pub const READABILITY_STEP: f64 = 0.01;

/// Maximum number of lightness increments [`ensure_readability`] will try.
pub const READABILITY_MAX_STEPS: usize = 32;

/// Compute the relative luminance of a color per WCAG 2.1.
///
/// Uses the standard sRGB linearization + weighted sum formula:
///   L = 0.2126 * `R_lin` + 0.7152 * `G_lin` + 0.0722 * `B_lin`
///
/// Returns a value in [0.0, 1.0] where 0 is black and 1 is white.
#[must_use]
pub fn relative_luminance(color: HexColor) -> f64 {
    let (r, g, b) = color.to_linear();
    0.2126f64.mul_add(r, 0.7152f64.mul_add(g, 0.0722 * b))
}

/// Compute the WCAG 2.1 contrast ratio between two colors.
///
/// Returns a value in [1.0, 21.0]. The formula is:
///   (`L_lighter` + 0.05) / (`L_darker` + 0.05)
///
/// The result is the same regardless of argument order.
#[must_use]
pub fn contrast_ratio(a: HexColor, b: HexColor) -> f64 {
    let la = relative_luminance(a);
    let lb = relative_luminance(b);
    let (lighter, darker) = if la >= lb { (la, lb) } else { (lb, la) };
    (lighter + 0.05) / (darker + 0.05)
}

/// Pick the foreground for text drawn on `bg`.
///
/// Starts from whichever of pure black or pure white contrasts more with
/// `bg`. If that pole still misses `target`, its lightness is walked with
/// [`ensure_readability`]. Always returns a color; when the target cannot be
/// reached the best ratio seen wins.
#[must_use]
pub fn solve_on_color(bg: HexColor, target: f64) -> HexColor {
    let on_black = contrast_ratio(HexColor::BLACK, bg);
    let on_white = contrast_ratio(HexColor::WHITE, bg);
    let (pole, ratio) = if on_black >= on_white {
        (HexColor::BLACK, on_black)
    } else {
        (HexColor::WHITE, on_white)
    };

    if ratio >= target {
        return pole;
    }
    ensure_readability(pole.to_oklch(), bg, target)
}

/// Walk a foreground color's OKLCH lightness away from `bg` until it meets
/// `min_ratio`.
///
/// Moves in [`READABILITY_STEP`] increments, at most
/// [`READABILITY_MAX_STEPS`] times, lightening when the foreground already
/// sits above the background's lightness and darkening otherwise. Chroma
/// and hue are kept; the result is gamut-mapped. Returns the
/// highest-contrast color visited if the target is never reached.
#[must_use]
pub fn ensure_readability(fg: Color, bg: HexColor, min_ratio: f64) -> HexColor {
    let fg = fg.sanitized();
    let mut best = fg.to_hex();
    let mut best_ratio = contrast_ratio(best, bg);
    if best_ratio >= min_ratio {
        return best;
    }

    let lighten = fg.l >= bg.to_oklch().l;
    let mut l = fg.l;

    for _ in 0..READABILITY_MAX_STEPS {
        let next = if lighten {
            (l + READABILITY_STEP).min(1.0)
        } else {
            (l - READABILITY_STEP).max(0.0)
        };
        if (next - l).abs() < f64::EPSILON {
            // Pinned at black or white: nothing left to gain.
            break;
        }
        l = next;

        let candidate = fg.set_lightness(l).to_hex();
        let ratio = contrast_ratio(candidate, bg);
        if ratio > best_ratio {
            best = candidate;
            best_ratio = ratio;
        }
        if ratio >= min_ratio {
            break;
        }
    }

    best
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
