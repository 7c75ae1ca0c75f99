//! Semantic roles over a ladder.
//!
//! Roles name what a step is used for (button fill, hover fill, text
//! accent) independently of how many levels the ladder has. The mapping
//! only looks at which levels exist, so it works for any slice of steps,
//! including an empty one: every role that cannot be placed falls back to
//! the base.

use std::fmt;

use serde::Serialize;

use crate::ladder::{LadderStep, level_key};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    /// Primary fill (buttons, focus rings).
    Default,
    /// Fill under the pointer.
    Hover,
    /// Fill for inactive controls.
    Disabled,
    /// Tint closest to the base.
    Tint1,
    /// Outermost tint.
    Tint2,
    /// Shade closest to the base.
    Shade1,
    /// Outermost shade.
    Shade2,
    /// Level 0.
    Base,
}

impl Role {
    pub const ALL: [Self; 8] = [
        Self::Default,
        Self::Hover,
        Self::Disabled,
        Self::Tint1,
        Self::Tint2,
        Self::Shade1,
        Self::Shade2,
        Self::Base,
    ];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Hover => "hover",
            Self::Disabled => "disabled",
            Self::Tint1 => "tint-1",
            Self::Tint2 => "tint-2",
            Self::Shade1 => "shade-1",
            Self::Shade2 => "shade-2",
            Self::Base => "base",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Role → ladder key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct RoleKeys {
    pub default: String,
    pub hover: String,
    pub disabled: String,
    pub tint_1: String,
    pub tint_2: String,
    pub shade_1: String,
    pub shade_2: String,
    pub base: String,
}

impl RoleKeys {
    #[must_use]
    pub fn key(&self, role: Role) -> &str {
        match role {
            Role::Default => &self.default,
            Role::Hover => &self.hover,
            Role::Disabled => &self.disabled,
            Role::Tint1 => &self.tint_1,
            Role::Tint2 => &self.tint_2,
            Role::Shade1 => &self.shade_1,
            Role::Shade2 => &self.shade_2,
            Role::Base => &self.base,
        }
    }

    /// `(role, key)` pairs in [`Role::ALL`] order.
    pub fn iter(&self) -> impl Iterator<Item = (Role, &str)> {
        Role::ALL.into_iter().map(|r| (r, self.key(r)))
    }
}

/// Derive the role keys for a set of ladder steps.
#[must_use]
pub fn compute_role_keys(steps: &[LadderStep]) -> RoleKeys {
    let has = |level: i32| steps.iter().any(|s| s.level == level);
    let negatives = steps.iter().map(|s| s.level).filter(|&l| l < 0);
    let positives = steps.iter().map(|s| s.level).filter(|&l| l > 0);

    let most_negative = negatives.clone().min();
    let least_negative = negatives.max();
    let least_positive = positives.clone().min();
    let most_positive = positives.max();

    let default = if has(1) { Some(1) } else { least_positive };
    let hover = if has(2) { Some(2) } else { most_positive };

    let key = |level: Option<i32>| level_key(level.unwrap_or(0));

    RoleKeys {
        default: key(default),
        hover: key(hover),
        disabled: key(most_negative),
        tint_1: key(least_negative),
        tint_2: key(most_negative),
        shade_1: key(least_positive),
        shade_2: key(most_positive),
        base: key(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ladder::{Theme, generate_ladder};
    use n_color::HexColor;
    use pretty_assertions::assert_eq;

    fn step(level: i32) -> LadderStep {
        LadderStep {
            key: level_key(level),
            label: String::new(),
            level,
            hex: HexColor::BLACK,
            on: HexColor::WHITE,
        }
    }

    fn steps(levels: &[i32]) -> Vec<LadderStep> {
        levels.iter().copied().map(step).collect()
    }

    #[test]
    fn five_levels() {
        let keys = compute_role_keys(&steps(&[-2, -1, 0, 1, 2]));
        assert_eq!(keys.default, "shade-1");
        assert_eq!(keys.hover, "shade-2");
        assert_eq!(keys.disabled, "tint-2");
        assert_eq!(keys.tint_1, "tint-1");
        assert_eq!(keys.tint_2, "tint-2");
        assert_eq!(keys.shade_1, "shade-1");
        assert_eq!(keys.shade_2, "shade-2");
        assert_eq!(keys.base, "base");
    }

    #[test]
    fn three_levels_share_steps() {
        let keys = compute_role_keys(&steps(&[-1, 0, 1]));
        assert_eq!(keys.default, "shade-1");
        assert_eq!(keys.hover, "shade-1");
        assert_eq!(keys.tint_1, "tint-1");
        assert_eq!(keys.tint_2, "tint-1");
        assert_eq!(keys.shade_2, "shade-1");
    }

    #[test]
    fn hover_prefers_level_two_over_topmost() {
        let keys = compute_role_keys(&steps(&[-4, -3, -2, -1, 0, 1, 2, 3, 4, 5]));
        assert_eq!(keys.hover, "shade-2");
        assert_eq!(keys.shade_2, "shade-5");
        assert_eq!(keys.disabled, "tint-4");
    }

    #[test]
    fn gaps_fall_to_nearest_available() {
        let keys = compute_role_keys(&steps(&[-3, 0, 3, 4]));
        assert_eq!(keys.default, "shade-3");
        assert_eq!(keys.hover, "shade-4");
        assert_eq!(keys.tint_1, "tint-3");
    }

    #[test]
    fn missing_sides_fall_back_to_base() {
        let keys = compute_role_keys(&steps(&[0, 1]));
        assert_eq!(keys.disabled, "base");
        assert_eq!(keys.tint_1, "base");
        assert_eq!(keys.default, "shade-1");

        let keys = compute_role_keys(&steps(&[-1, 0]));
        assert_eq!(keys.default, "base");
        assert_eq!(keys.hover, "base");
        assert_eq!(keys.shade_2, "base");
    }

    #[test]
    fn empty_slice_is_all_base() {
        let keys = compute_role_keys(&[]);
        assert!(keys.iter().all(|(_, k)| k == "base"));
    }

    #[test]
    fn keys_resolve_in_generated_ladders() {
        for n in 3..=10 {
            let brand = HexColor::from_rgb8(0x6D, 0x94, 0xA2);
            let ladder = generate_ladder(brand, 1.0, n, Theme::Light);
            let keys = compute_role_keys(&ladder.steps);
            for (role, key) in keys.iter() {
                assert!(ladder.get(key).is_some(), "n={n} {role} -> {key}");
            }
        }
    }
}
