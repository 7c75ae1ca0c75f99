//! Ladder generation: one brand color in, an ordered run of tints, the
//! base and shades out.
//!
//! Levels are signed integers. Level 0 is the base itself; negative levels
//! are tints, positive levels are shades. For `N` levels there are
//! `⌊(N−1)/2⌋` tints and the rest are shades, so even counts lean toward
//! the shade side:
//!
//! ```text
//! N = 5:  tint-2  tint-1  base  shade-1  shade-2
//! N = 6:  tint-2  tint-1  base  shade-1  shade-2  shade-3
//! ```

use std::fmt;

use n_color::{HexColor, oklch_to_hex};
use serde::{Deserialize, Serialize};

use crate::contrast::{TEXT_CONTRAST, solve_on_color};
use crate::curve;

/// Fewest levels a ladder can have.
pub const MIN_LEVELS: usize = 3;

/// Most levels a ladder can have.
pub const MAX_LEVELS: usize = 10;

/// Smallest spacing scale. Anything below collapses every step onto the base.
pub const MIN_SPACING: f64 = 0.01;

/// Which page the ladder is designed to sit on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub const ALL: [Self; 2] = [Self::Light, Self::Dark];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One rung of a ladder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LadderStep {
    /// Stable identifier: `tint-k`, `base` or `shade-k`.
    pub key: String,
    /// Human-readable name: `Tint k`, `Base` or `Shade k`.
    pub label: String,
    /// Signed level, 0 for the base.
    pub level: i32,
    /// The step's fill color.
    pub hex: HexColor,
    /// Text color for labels drawn on [`hex`](Self::hex).
    pub on: HexColor,
}

/// An ordered (ascending level) run of ladder steps.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Ladder {
    pub theme: Theme,
    pub spacing: f64,
    pub steps: Vec<LadderStep>,
}

impl Ladder {
    /// The step at `level`, if the ladder has one.
    #[must_use]
    pub fn level(&self, level: i32) -> Option<&LadderStep> {
        self.steps.iter().find(|s| s.level == level)
    }

    /// The step with `key`, if any.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&LadderStep> {
        self.steps.iter().find(|s| s.key == key)
    }

    /// The level-0 step.
    #[must_use]
    pub fn base(&self) -> Option<&LadderStep> {
        self.level(0)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, LadderStep> {
        self.steps.iter()
    }
}

impl<'a> IntoIterator for &'a Ladder {
    type Item = &'a LadderStep;
    type IntoIter = std::slice::Iter<'a, LadderStep>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.iter()
    }
}

/// Clamp a requested level count into `[MIN_LEVELS, MAX_LEVELS]`.
#[must_use]
pub fn clamp_levels(level_count: usize) -> usize {
    level_count.clamp(MIN_LEVELS, MAX_LEVELS)
}

/// Clamp a spacing scale. Non-finite input falls back to 1.0.
#[must_use]
pub fn clamp_spacing(spacing: f64) -> f64 {
    if spacing.is_finite() { spacing.max(MIN_SPACING) } else { 1.0 }
}

/// Split a (clamped) level count into `(tints, shades)`.
#[must_use]
pub fn level_split(level_count: usize) -> (i32, i32) {
    let n = i32::try_from(clamp_levels(level_count)).unwrap_or(3);
    let negative = (n - 1) / 2;
    (negative, n - 1 - negative)
}

/// Stable key for a level.
#[must_use]
pub fn level_key(level: i32) -> String {
    match level {
        0 => "base".to_owned(),
        l if l < 0 => format!("tint-{}", -l),
        l => format!("shade-{l}"),
    }
}

/// Display label for a level.
#[must_use]
pub fn level_label(level: i32) -> String {
    match level {
        0 => "Base".to_owned(),
        l if l < 0 => format!("Tint {}", -l),
        l => format!("Shade {l}"),
    }
}

/// Normalized curve position of `level`: ±2 at the outermost steps.
fn position(level: i32, negative: i32, positive: i32) -> f64 {
    let side = if level < 0 { negative } else { positive };
    2.0 * f64::from(level) / f64::from(side.max(1))
}

/// Generate the ladder for `base` at `spacing` with `level_count` levels.
///
/// Out-of-range counts and spacings are clamped; this never fails. The
/// level-0 step is the base after one trip through OKLCH, so it matches
/// what every other step's math starts from.
#[must_use]
pub fn generate_ladder(base: HexColor, spacing: f64, level_count: usize, theme: Theme) -> Ladder {
    let spacing = clamp_spacing(spacing);
    let (negative, positive) = level_split(level_count);
    let origin = base.to_oklch();

    let steps = (-negative..=positive)
        .map(|level| {
            let hex = if level == 0 {
                origin.to_hex()
            } else {
                let adj = curve::adjustment(theme, position(level, negative, positive), spacing);
                oklch_to_hex(
                    origin.l + adj.lightness_offset,
                    origin.c * adj.chroma_multiplier,
                    origin.h,
                )
            };
            LadderStep {
                key: level_key(level),
                label: level_label(level),
                level,
                hex,
                on: solve_on_color(hex, TEXT_CONTRAST),
            }
        })
        .collect();

    Ladder { theme, spacing, steps }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contrast::contrast_ratio;
    use pretty_assertions::assert_eq;

    fn hex(s: &str) -> HexColor {
        HexColor::parse(s).unwrap()
    }

    fn levels(ladder: &Ladder) -> Vec<i32> {
        ladder.iter().map(|s| s.level).collect()
    }

    // ── Level layout ────────────────────────────────────────────────

    #[test]
    fn split_odd_and_even() {
        assert_eq!(level_split(3), (1, 1));
        assert_eq!(level_split(5), (2, 2));
        assert_eq!(level_split(6), (2, 3));
        assert_eq!(level_split(10), (4, 5));
    }

    #[test]
    fn level_count_is_clamped() {
        let brand = hex("#6D94A2");
        assert_eq!(generate_ladder(brand, 1.0, 0, Theme::Light).len(), 3);
        assert_eq!(generate_ladder(brand, 1.0, 2, Theme::Light).len(), 3);
        assert_eq!(generate_ladder(brand, 1.0, 50, Theme::Light).len(), 10);
    }

    #[test]
    fn keys_and_labels() {
        let ladder = generate_ladder(hex("#6D94A2"), 1.0, 6, Theme::Light);
        let keys: Vec<&str> = ladder.iter().map(|s| s.key.as_str()).collect();
        assert_eq!(keys, ["tint-2", "tint-1", "base", "shade-1", "shade-2", "shade-3"]);
        let labels: Vec<&str> = ladder.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(labels, ["Tint 2", "Tint 1", "Base", "Shade 1", "Shade 2", "Shade 3"]);
    }

    #[test]
    fn levels_are_ascending() {
        for n in MIN_LEVELS..=MAX_LEVELS {
            let ladder = generate_ladder(hex("#2563EB"), 1.0, n, Theme::Dark);
            let lv = levels(&ladder);
            assert!(lv.windows(2).all(|w| w[0] + 1 == w[1]), "{n}: {lv:?}");
            assert!(lv.contains(&0));
        }
    }

    // ── Colors ──────────────────────────────────────────────────────

    #[test]
    fn base_is_round_tripped_input() {
        for (input, theme) in
            [("#6D94A2", Theme::Light), ("#CC3344", Theme::Dark), ("#14161A", Theme::Light)]
        {
            let brand = hex(input);
            let ladder = generate_ladder(brand, 1.618, 5, theme);
            assert_eq!(ladder.base().map(|s| s.hex), Some(brand.to_oklch().to_hex()));
        }
    }

    #[test]
    fn brand_scenario_light() {
        let ladder = generate_ladder(hex("#6D94A2"), 1.618, 5, Theme::Light);
        let got: Vec<String> = ladder.iter().map(|s| s.hex.to_string()).collect();
        assert_eq!(got, ["#B3C2C8", "#90ABB5", "#6D94A2", "#517C8C", "#416470"]);
    }

    #[test]
    fn brand_scenario_dark() {
        let ladder = generate_ladder(hex("#6D94A2"), 1.618, 5, Theme::Dark);
        let got: Vec<String> = ladder.iter().map(|s| s.hex.to_string()).collect();
        assert_eq!(got, ["#B3C2C8", "#93AAB3", "#6D94A2", "#538799", "#34758A"]);
    }

    #[test]
    fn light_shades_darken_monotonically() {
        for n in MIN_LEVELS..=MAX_LEVELS {
            for s in [0.382, 1.0, 1.618, 3.0] {
                let ladder = generate_ladder(hex("#6D94A2"), s, n, Theme::Light);
                let shades: Vec<f64> = ladder
                    .iter()
                    .filter(|st| st.level >= 0)
                    .map(|st| st.hex.to_oklch().l)
                    .collect();
                assert!(
                    shades.windows(2).all(|w| w[1] <= w[0] + 1e-9),
                    "n={n} s={s}: {shades:?}"
                );
            }
        }
    }

    #[test]
    fn dark_tints_are_lighter_than_base() {
        let ladder = generate_ladder(hex("#6D94A2"), 1.0, 5, Theme::Dark);
        let base_l = ladder.base().unwrap().hex.to_oklch().l;
        let tint_l = ladder.level(-2).unwrap().hex.to_oklch().l;
        assert!(tint_l > base_l);
    }

    #[test]
    fn on_colors_meet_text_contrast() {
        for base in ["#6D94A2", "#CCCCCC", "#14161A", "#FF0000", "#2563EB"] {
            for theme in Theme::ALL {
                let ladder = generate_ladder(hex(base), 1.0, 7, theme);
                for step in &ladder {
                    let ratio = contrast_ratio(step.on, step.hex);
                    assert!(ratio >= TEXT_CONTRAST, "{base} {theme} {}: {ratio}", step.key);
                }
            }
        }
    }

    #[test]
    fn degenerate_spacing_is_clamped() {
        let brand = hex("#6D94A2");
        let nan = generate_ladder(brand, f64::NAN, 5, Theme::Light);
        assert!((nan.spacing - 1.0).abs() < f64::EPSILON);
        let neg = generate_ladder(brand, -4.0, 5, Theme::Light);
        assert!((neg.spacing - MIN_SPACING).abs() < f64::EPSILON);
        assert_eq!(neg.len(), 5);
    }

    #[test]
    fn theme_serde_names() {
        use serde::de::IntoDeserializer;
        use serde::de::value::{Error, StrDeserializer};

        let de: StrDeserializer<Error> = "dark".into_deserializer();
        assert_eq!(Theme::deserialize(de).unwrap(), Theme::Dark);
        assert_eq!(Theme::Light.to_string(), "light");
    }
}
