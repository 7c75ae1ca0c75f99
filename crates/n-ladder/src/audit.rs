//! Accessibility audit: does a ladder hold up on the pages it will sit on?
//!
//! Each theme runs the same fixed catalog of foreground/background pairs.
//! The catalog names roles, not levels, so one catalog covers every ladder
//! size. Light and dark themes differ only in which roles play "text
//! accent", "strong text accent" and "subtle fill": on a light page the
//! text accents are shades and the subtle fill is a tint, on a dark page
//! the other way around.
//!
//! Aggregates:
//!
//! - `pass_rate`: passing over total, counting only non-exempt checks.
//! - `penalty`: `Σ weight · max(0, target − ratio)` over every check,
//!   weight 3 for mandatory checks.
//! - `mandatory_failures`: ids of failing mandatory checks.

use n_color::HexColor;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::contrast::{TEXT_CONTRAST, UI_CONTRAST, contrast_ratio};
use crate::ladder::{Ladder, LadderStep, Theme, generate_ladder};
use crate::policy::Policy;
use crate::roles::{Role, RoleKeys, compute_role_keys};
use crate::surfaces::{SurfacePair, Surfaces};

/// Tolerance on pass-rate comparisons.
pub const PASS_RATE_EPS: f64 = 1e-12;

/// Which themes an audit covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AuditMode {
    #[default]
    Combined,
    #[serde(alias = "light")]
    LightOnly,
    #[serde(alias = "dark")]
    DarkOnly,
}

impl AuditMode {
    #[must_use]
    pub fn themes(self) -> &'static [Theme] {
        match self {
            Self::Combined => &Theme::ALL,
            Self::LightOnly => &[Theme::Light],
            Self::DarkOnly => &[Theme::Dark],
        }
    }
}

// ─── Catalog ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy)]
enum Source {
    /// The fill of a role's step.
    Fill(Role),
    /// The on-color of a role's step.
    On(Role),
    Bg,
    Surface,
}

#[derive(Debug, Clone, Copy)]
struct CatalogEntry {
    name: &'static str,
    fg: Source,
    bg: Source,
    target: f64,
}

const fn entry(name: &'static str, fg: Source, bg: Source, target: f64) -> CatalogEntry {
    CatalogEntry { name, fg, bg, target }
}

fn catalog(theme: Theme) -> [CatalogEntry; 10] {
    use Source::{Bg, Fill, On, Surface};

    let (text, strong, subtle) = match theme {
        Theme::Light => (Role::Shade1, Role::Shade2, Role::Tint2),
        Theme::Dark => (Role::Tint1, Role::Tint2, Role::Shade2),
    };

    [
        entry("link-on-bg", Fill(text), Bg, TEXT_CONTRAST),
        entry("link-on-surface", Fill(text), Surface, TEXT_CONTRAST),
        entry("strong-text-on-surface", Fill(strong), Surface, TEXT_CONTRAST),
        entry("button-label", On(Role::Default), Fill(Role::Default), TEXT_CONTRAST),
        entry("button-hover-label", On(Role::Hover), Fill(Role::Hover), TEXT_CONTRAST),
        entry("disabled-label", On(Role::Disabled), Fill(Role::Disabled), TEXT_CONTRAST),
        entry("subtle-fill-edge", Fill(strong), Fill(subtle), UI_CONTRAST),
        entry("focus-ring-on-bg", Fill(Role::Default), Bg, UI_CONTRAST),
        entry("focus-ring-on-surface", Fill(Role::Default), Surface, UI_CONTRAST),
        entry("border-on-surface", Fill(Role::Base), Surface, UI_CONTRAST),
    ]
}

/// Use names of the catalog, in evaluation order.
#[must_use]
pub fn catalog_uses() -> [&'static str; 10] {
    catalog(Theme::Light).map(|c| c.name)
}

// ─── Checks ─────────────────────────────────────────────────────────────────

/// One measured foreground/background pair.
#[derive(Debug, Clone, PartialEq)]
pub struct Check {
    pub theme: Theme,
    /// Catalog use name, e.g. `button-label`.
    pub use_name: &'static str,
    pub fg: HexColor,
    pub bg: HexColor,
    pub target: f64,
    pub ratio: f64,
    pub pass: bool,
    pub policy: Policy,
}

impl Check {
    /// `theme/use`, e.g. `light/button-label`.
    #[must_use]
    pub fn id(&self) -> String {
        format!("{}/{}", self.theme, self.use_name)
    }

    /// How far the ratio falls short of the target (0 when passing).
    #[must_use]
    pub fn shortfall(&self) -> f64 {
        (self.target - self.ratio).max(0.0)
    }

    #[must_use]
    pub fn is_mandatory(&self) -> bool {
        self.policy.contains(Policy::MANDATORY)
    }

    #[must_use]
    pub fn is_exempt(&self) -> bool {
        self.policy.contains(Policy::EXEMPT)
    }
}

/// Run the catalog for one ladder against one theme's surfaces.
///
/// Roles resolve through [`compute_role_keys`]. A ladder produced by
/// [`generate_ladder`] always resolves every role; for a hand-built ladder
/// missing a step, the checks that need it are skipped.
#[must_use]
pub fn audit_ladder(ladder: &Ladder, surfaces: SurfacePair) -> Vec<Check> {
    let keys = compute_role_keys(&ladder.steps);
    let resolve = |source: Source| -> Option<HexColor> {
        match source {
            Source::Fill(role) => role_step(ladder, &keys, role).map(|s| s.hex),
            Source::On(role) => role_step(ladder, &keys, role).map(|s| s.on),
            Source::Bg => Some(surfaces.bg),
            Source::Surface => Some(surfaces.surface),
        }
    };

    catalog(ladder.theme)
        .into_iter()
        .filter_map(|entry| {
            let fg = resolve(entry.fg)?;
            let bg = resolve(entry.bg)?;
            let ratio = contrast_ratio(fg, bg);
            Some(Check {
                theme: ladder.theme,
                use_name: entry.name,
                fg,
                bg,
                target: entry.target,
                ratio,
                pass: ratio >= entry.target,
                policy: Policy::for_use(entry.name),
            })
        })
        .collect()
}

fn role_step<'a>(ladder: &'a Ladder, keys: &RoleKeys, role: Role) -> Option<&'a LadderStep> {
    ladder.get(keys.key(role))
}

// ─── Results ────────────────────────────────────────────────────────────────

/// Aggregate figures of an audit, without the individual checks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AuditSummary {
    pub pass_rate: Option<f64>,
    pub penalty: f64,
    pub mandatory_failures: usize,
}

impl AuditSummary {
    /// Pass rate at least `target` and no mandatory failure.
    #[must_use]
    pub fn meets(&self, target: f64) -> bool {
        self.mandatory_failures == 0 && self.pass_rate.is_some_and(|p| p + PASS_RATE_EPS >= target)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AuditResult {
    pub checks: Vec<Check>,
    pub pass_rate: Option<f64>,
    pub penalty: f64,
    pub mandatory_failures: Vec<String>,
}

impl AuditResult {
    /// Compute the aggregates over `checks`. An empty list has no pass rate.
    #[must_use]
    pub fn from_checks(checks: Vec<Check>) -> Self {
        let counted = checks.iter().filter(|c| !c.is_exempt()).count();
        let passed = checks.iter().filter(|c| !c.is_exempt() && c.pass).count();
        let pass_rate = (counted > 0).then(|| passed as f64 / counted as f64);

        let penalty = checks.iter().map(|c| c.policy.weight() * c.shortfall()).sum();

        let mandatory_failures = checks
            .iter()
            .filter(|c| c.is_mandatory() && !c.pass)
            .map(Check::id)
            .collect();

        Self { checks, pass_rate, penalty, mandatory_failures }
    }

    #[must_use]
    pub fn summary(&self) -> AuditSummary {
        AuditSummary {
            pass_rate: self.pass_rate,
            penalty: self.penalty,
            mandatory_failures: self.mandatory_failures.len(),
        }
    }

    #[must_use]
    pub fn meets(&self, target: f64) -> bool {
        self.summary().meets(target)
    }

    /// Failing checks, exempt ones included.
    pub fn failures(&self) -> impl Iterator<Item = &Check> {
        self.checks.iter().filter(|c| !c.pass)
    }
}

/// Generate the ladder for every theme in `mode` and audit it.
#[must_use]
#[instrument(level = "trace", skip(surfaces))]
pub fn evaluate(
    base: HexColor,
    spacing: f64,
    level_count: usize,
    surfaces: &Surfaces,
    mode: AuditMode,
) -> AuditResult {
    let checks = mode
        .themes()
        .iter()
        .flat_map(|&theme| {
            let ladder = generate_ladder(base, spacing, level_count, theme);
            audit_ladder(&ladder, surfaces.for_theme(theme))
        })
        .collect();
    AuditResult::from_checks(checks)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn hex(s: &str) -> HexColor {
        HexColor::parse(s).unwrap()
    }

    fn check(use_name: &'static str, ratio: f64, target: f64) -> Check {
        Check {
            theme: Theme::Light,
            use_name,
            fg: HexColor::BLACK,
            bg: HexColor::WHITE,
            target,
            ratio,
            pass: ratio >= target,
            policy: Policy::for_use(use_name),
        }
    }

    // ── Aggregates ──────────────────────────────────────────────────

    #[test]
    fn empty_audit_has_no_pass_rate() {
        let result = AuditResult::from_checks(Vec::new());
        assert_eq!(result.pass_rate, None);
        assert!(result.penalty.abs() < f64::EPSILON);
        assert!(result.mandatory_failures.is_empty());
        assert!(!result.meets(0.0));
    }

    #[test]
    fn only_exempt_checks_have_no_pass_rate() {
        let result = AuditResult::from_checks(vec![check("disabled-label", 2.0, 4.5)]);
        assert_eq!(result.pass_rate, None);
        assert!((result.penalty - 2.5).abs() < 1e-12);
    }

    #[test]
    fn exempt_checks_skip_pass_rate_but_pay_penalty() {
        let result = AuditResult::from_checks(vec![
            check("link-on-bg", 5.0, 4.5),
            check("link-on-surface", 4.0, 4.5),
            check("subtle-fill-edge", 1.0, 3.0),
        ]);
        assert_eq!(result.pass_rate, Some(0.5));
        assert!((result.penalty - 2.5).abs() < 1e-12, "{}", result.penalty);
    }

    #[test]
    fn mandatory_failures_weigh_triple() {
        let result = AuditResult::from_checks(vec![
            check("button-label", 4.0, 4.5),
            check("focus-ring-on-bg", 3.5, 3.0),
        ]);
        assert_eq!(result.mandatory_failures, ["light/button-label"]);
        assert!((result.penalty - 1.5).abs() < 1e-12);
        assert!(!result.meets(0.0));
    }

    #[test]
    fn summary_meets_uses_tolerance() {
        let s = AuditSummary { pass_rate: Some(0.95 - 1e-13), penalty: 0.0, mandatory_failures: 0 };
        assert!(s.meets(0.95));
        let s = AuditSummary { pass_rate: Some(0.9), penalty: 0.0, mandatory_failures: 0 };
        assert!(!s.meets(0.95));
    }

    // ── Catalog ─────────────────────────────────────────────────────

    #[test]
    fn catalog_shape() {
        assert_eq!(catalog_uses().len(), 10);
        let result = evaluate(hex("#6D94A2"), 1.0, 5, &Surfaces::default(), AuditMode::Combined);
        assert_eq!(result.checks.len(), 20);
        let light = evaluate(hex("#6D94A2"), 1.0, 5, &Surfaces::default(), AuditMode::LightOnly);
        assert!(light.checks.iter().all(|c| c.theme == Theme::Light));
        assert_eq!(light.checks.len(), 10);
    }

    #[test]
    fn check_ids() {
        let result = evaluate(hex("#6D94A2"), 1.0, 5, &Surfaces::default(), AuditMode::DarkOnly);
        assert_eq!(result.checks[3].id(), "dark/button-label");
    }

    #[test]
    fn light_pairs_follow_roles() {
        let base = hex("#6D94A2");
        let ladder = generate_ladder(base, 1.0, 5, Theme::Light);
        let checks = audit_ladder(&ladder, SurfacePair::LIGHT);
        let by_use = |name: &str| checks.iter().find(|c| c.use_name == name).unwrap();

        assert_eq!(by_use("link-on-bg").fg, ladder.get("shade-1").unwrap().hex);
        assert_eq!(by_use("link-on-bg").bg, SurfacePair::LIGHT.bg);
        assert_eq!(by_use("strong-text-on-surface").fg, ladder.get("shade-2").unwrap().hex);
        assert_eq!(by_use("subtle-fill-edge").bg, ladder.get("tint-2").unwrap().hex);
        assert_eq!(by_use("button-label").fg, ladder.get("shade-1").unwrap().on);
        assert_eq!(by_use("border-on-surface").fg, ladder.get("base").unwrap().hex);
    }

    #[test]
    fn dark_pairs_swap_accents() {
        let ladder = generate_ladder(hex("#6D94A2"), 1.0, 5, Theme::Dark);
        let checks = audit_ladder(&ladder, SurfacePair::DARK);
        let by_use = |name: &str| checks.iter().find(|c| c.use_name == name).unwrap();

        assert_eq!(by_use("link-on-surface").fg, ladder.get("tint-1").unwrap().hex);
        assert_eq!(by_use("strong-text-on-surface").fg, ladder.get("tint-2").unwrap().hex);
        assert_eq!(by_use("subtle-fill-edge").bg, ladder.get("shade-2").unwrap().hex);
    }

    #[test]
    fn labels_always_pass() {
        // On-colors are solved to 4.5:1, so label checks never fail.
        for base in ["#CCCCCC", "#14161A", "#6D94A2", "#FFEE00"] {
            let result = evaluate(hex(base), 1.0, 5, &Surfaces::default(), AuditMode::Combined);
            for c in result.checks.iter().filter(|c| c.use_name.ends_with("-label")) {
                assert!(c.pass, "{base} {}: {}", c.id(), c.ratio);
            }
        }
    }

    #[test]
    fn pale_base_fails_light_focus_ring() {
        let result = evaluate(hex("#CCCCCC"), 1.0, 5, &Surfaces::default(), AuditMode::LightOnly);
        assert!(result.mandatory_failures.contains(&"light/focus-ring-on-bg".to_owned()));
        assert!(result.pass_rate.unwrap() < 0.95);
    }

    #[test]
    fn near_black_passes_light_only() {
        let result = evaluate(hex("#14161A"), 1.0, 5, &Surfaces::default(), AuditMode::LightOnly);
        assert_eq!(result.pass_rate, Some(1.0));
        assert!(result.meets(0.95));
    }
}
