//! Named spacing scales.
//!
//! Spacing stretches every ladder step away from the base. Any positive
//! number works; the presets are powers of φ so adjacent presets differ by
//! the same perceptual ratio.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::curve::PHI;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SpacingPreset {
    /// φ⁻² ≈ 0.382
    Tight,
    /// φ⁻¹ ≈ 0.618
    Snug,
    /// 1.0
    #[default]
    Regular,
    /// √φ ≈ 1.272
    Relaxed,
    /// φ ≈ 1.618
    Open,
}

impl SpacingPreset {
    pub const ALL: [Self; 5] = [Self::Tight, Self::Snug, Self::Regular, Self::Relaxed, Self::Open];

    #[must_use]
    pub fn scale(self) -> f64 {
        match self {
            Self::Tight => PHI.powi(-2),
            Self::Snug => PHI.recip(),
            Self::Regular => 1.0,
            Self::Relaxed => PHI.sqrt(),
            Self::Open => PHI,
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Tight => "tight",
            Self::Snug => "snug",
            Self::Regular => "regular",
            Self::Relaxed => "relaxed",
            Self::Open => "open",
        }
    }

    /// Look up a preset by (case-insensitive) name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.name().eq_ignore_ascii_case(name.trim()))
    }
}

/// A spacing given either as a preset name or a raw scale.
///
/// In TOML both `spacing = "open"` and `spacing = 1.5` are accepted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Spacing {
    Preset(SpacingPreset),
    Scale(f64),
}

impl Spacing {
    #[must_use]
    pub fn scale(self) -> f64 {
        match self {
            Self::Preset(p) => p.scale(),
            Self::Scale(s) => s,
        }
    }
}

impl Default for Spacing {
    fn default() -> Self {
        Self::Preset(SpacingPreset::default())
    }
}

impl fmt::Display for Spacing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Preset(p) => write!(f, "{} ({:.3})", p.name(), p.scale()),
            Self::Scale(s) => write!(f, "{s}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown spacing {0:?}: expected a number or tight, snug, regular, relaxed, open")]
pub struct ParseSpacingError(pub String);

impl FromStr for Spacing {
    type Err = ParseSpacingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(preset) = SpacingPreset::from_name(s) {
            return Ok(Self::Preset(preset));
        }
        match s.trim().parse::<f64>() {
            Ok(v) if v.is_finite() && v > 0.0 => Ok(Self::Scale(v)),
            _ => Err(ParseSpacingError(s.to_owned())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn preset_scales() {
        let scales: Vec<String> =
            SpacingPreset::ALL.iter().map(|p| format!("{:.3}", p.scale())).collect();
        assert_eq!(scales, ["0.382", "0.618", "1.000", "1.272", "1.618"]);
    }

    #[test]
    fn presets_are_geometric() {
        // tight → snug → regular are each one factor of φ apart.
        let r1 = SpacingPreset::Snug.scale() / SpacingPreset::Tight.scale();
        let r2 = SpacingPreset::Regular.scale() / SpacingPreset::Snug.scale();
        assert!((r1 - PHI).abs() < 1e-12 && (r2 - PHI).abs() < 1e-12);
    }

    #[test]
    fn parse_names_and_numbers() {
        assert_eq!("open".parse::<Spacing>(), Ok(Spacing::Preset(SpacingPreset::Open)));
        assert_eq!(" Tight ".parse::<Spacing>(), Ok(Spacing::Preset(SpacingPreset::Tight)));
        assert_eq!("1.5".parse::<Spacing>(), Ok(Spacing::Scale(1.5)));
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!("wide".parse::<Spacing>().is_err());
        assert!("-1".parse::<Spacing>().is_err());
        assert!("0".parse::<Spacing>().is_err());
        assert!("inf".parse::<Spacing>().is_err());
    }

    #[test]
    fn default_is_regular() {
        assert!((Spacing::default().scale() - 1.0).abs() < f64::EPSILON);
    }
}
