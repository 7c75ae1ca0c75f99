//! Nearest passing base color.
//!
//! When a brand color's ladder fails the audit, search OKLCH space around
//! it for the closest color whose ladder passes. The search runs in rings
//! of growing budget: each ring grids `(ΔL, ΔC)` inside its budget (and,
//! if hue drift is allowed, fans the hue), then refines around its best
//! point on a finer grid. The search stops after the first ring whose best
//! candidate meets the target.
//!
//! # Ranking
//!
//! Candidates compare lexicographically on
//!
//! 1. number of failing mandatory checks,
//! 2. audit penalty,
//! 3. weighted OKLCH distance from the input.
//!
//! The input itself seeds the search at distance 0, so the returned
//! candidate is never ranked worse than the input.
//!
//! # Ring order
//!
//! ```text
//! l-first:  L±0.06  L±0.10  joint×4  full
//! lc:       joint×4  full   L±0.06  L±0.10
//! ```
//!
//! Joint rings scale `max_dl`, `max_dc` and `hue_span_deg` by fixed
//! fractions; "full" is the whole budget.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;

use n_color::color::{hue_diff, normalize_hue};
use n_color::{Color, HexColor, oklch_to_hex};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, trace, warn};

use crate::audit::{AuditMode, AuditSummary, evaluate};
use crate::surfaces::Surfaces;

/// Slack on budget comparisons so grid points that land on the edge count
/// as inside.
const BUDGET_EPS: f64 = 1e-9;

/// Smallest grid or refinement step accepted.
pub const MIN_STEP: f64 = 0.001;

/// Smallest hue fan step accepted, in degrees.
pub const MIN_HUE_STEP_DEG: f64 = 0.1;

// ─── Options ────────────────────────────────────────────────────────────────

/// Order in which ring kinds are tried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Strategy {
    /// Lightness-only rings first: most failures are lightness failures,
    /// and moving only L keeps the brand's chroma intact.
    #[default]
    #[serde(rename = "l-first", alias = "L-first")]
    LFirst,
    /// Joint lightness/chroma rings first.
    #[serde(rename = "lc", alias = "LC")]
    Lc,
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::LFirst => "l-first",
            Self::Lc => "lc",
        })
    }
}

/// Per-axis weights of the candidate distance.
///
/// `distance = √((l·ΔL)² + (c·ΔC)² + (h·Δh/180)²)`, with Δh the shortest
/// arc in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DistanceWeights {
    pub l: f64,
    pub c: f64,
    pub h: f64,
}

impl Default for DistanceWeights {
    fn default() -> Self {
        Self { l: 1.0, c: 1.0, h: 0.6 }
    }
}

impl DistanceWeights {
    #[must_use]
    pub fn distance(&self, from: Color, to: Color) -> f64 {
        let dl = self.l * (to.l - from.l);
        let dc = self.c * (to.c - from.c);
        let dh = self.h * hue_diff(to.h, from.h) / 180.0;
        dl.mul_add(dl, dc.mul_add(dc, dh * dh)).sqrt()
    }
}

/// A joint ring expressed as fractions of the full budget.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct RingFraction {
    pub dl: f64,
    pub dc: f64,
    pub hue: f64,
}

impl RingFraction {
    const fn new(dl: f64, dc: f64, hue: f64) -> Self {
        Self { dl, dc, hue }
    }
}

fn default_l_only_budgets() -> Vec<f64> {
    vec![0.06, 0.10]
}

fn default_joint_rings() -> Vec<RingFraction> {
    vec![
        RingFraction::new(0.35, 0.20, 0.25),
        RingFraction::new(0.55, 0.40, 0.50),
        RingFraction::new(0.75, 0.60, 0.75),
        RingFraction::new(0.90, 0.80, 1.00),
    ]
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct OptimizeOptions {
    /// Pass rate a candidate must reach (with no mandatory failure).
    pub target_pass_rate: f64,
    /// Largest lightness change from the input.
    pub max_dl: f64,
    /// Largest chroma change from the input.
    pub max_dc: f64,
    pub allow_hue_drift: bool,
    /// Half-width of the hue fan at the full budget, in degrees.
    pub hue_span_deg: f64,
    pub hue_step_deg: f64,
    /// Hard cap on hue distance from the input. `None` means no cap
    /// beyond `hue_span_deg`.
    pub max_hue_drift_deg: Option<f64>,
    /// Candidate chroma never drops below this fraction of the input's.
    pub min_chroma_ratio: f64,
    /// Candidate chroma never drops below this absolute value.
    pub min_chroma_abs: f64,
    pub strategy: Strategy,
    pub grid_step: f64,
    pub refine_step: f64,
    pub weights: DistanceWeights,
    pub mode: AuditMode,
    /// Lightness-only ring budgets.
    pub l_only_budgets: Vec<f64>,
    /// Joint rings before the full budget.
    pub joint_rings: Vec<RingFraction>,
}

impl Default for OptimizeOptions {
    fn default() -> Self {
        Self {
            target_pass_rate: 0.95,
            max_dl: 0.45,
            max_dc: 0.30,
            allow_hue_drift: false,
            hue_span_deg: 12.0,
            hue_step_deg: 2.0,
            max_hue_drift_deg: None,
            min_chroma_ratio: 0.6,
            min_chroma_abs: 0.0,
            strategy: Strategy::LFirst,
            grid_step: 0.02,
            refine_step: 0.01,
            weights: DistanceWeights::default(),
            mode: AuditMode::Combined,
            l_only_budgets: default_l_only_budgets(),
            joint_rings: default_joint_rings(),
        }
    }
}

fn finite_or(v: f64, fallback: f64) -> f64 {
    if v.is_finite() { v } else { fallback }
}

impl OptimizeOptions {
    /// Pull every numeric option into its usable range. Non-finite values
    /// fall back to the default.
    #[must_use]
    pub fn sanitized(&self) -> Self {
        let d = Self::default();
        let max_dl = finite_or(self.max_dl, d.max_dl).clamp(0.0, 1.0);
        let max_dc = finite_or(self.max_dc, d.max_dc).clamp(0.0, 0.5);
        let unit = |v: f64| finite_or(v, 0.0).clamp(0.0, 1.0);

        Self {
            target_pass_rate: finite_or(self.target_pass_rate, d.target_pass_rate).clamp(0.0, 1.0),
            max_dl,
            max_dc,
            allow_hue_drift: self.allow_hue_drift,
            hue_span_deg: finite_or(self.hue_span_deg, d.hue_span_deg).clamp(0.0, 180.0),
            hue_step_deg: finite_or(self.hue_step_deg, d.hue_step_deg).max(MIN_HUE_STEP_DEG),
            max_hue_drift_deg: self.max_hue_drift_deg.filter(|v| !v.is_nan()).map(|v| v.max(0.0)),
            min_chroma_ratio: finite_or(self.min_chroma_ratio, d.min_chroma_ratio).clamp(0.0, 1.0),
            min_chroma_abs: finite_or(self.min_chroma_abs, d.min_chroma_abs).clamp(0.0, 0.5),
            strategy: self.strategy,
            grid_step: finite_or(self.grid_step, d.grid_step).max(MIN_STEP),
            refine_step: finite_or(self.refine_step, d.refine_step).max(MIN_STEP),
            weights: DistanceWeights {
                l: finite_or(self.weights.l, d.weights.l).max(0.0),
                c: finite_or(self.weights.c, d.weights.c).max(0.0),
                h: finite_or(self.weights.h, d.weights.h).max(0.0),
            },
            mode: self.mode,
            l_only_budgets: self
                .l_only_budgets
                .iter()
                .map(|&b| finite_or(b, 0.0).clamp(0.0, max_dl))
                .collect(),
            joint_rings: self
                .joint_rings
                .iter()
                .map(|r| RingFraction::new(unit(r.dl), unit(r.dc), unit(r.hue)))
                .collect(),
        }
    }

    /// The rings to search, in order.
    #[must_use]
    pub fn rings(&self) -> Vec<Ring> {
        let l_only = self.l_only_budgets.iter().map(|&dl| Ring { dl, dc: 0.0, hue_span: 0.0 });
        let joint = self
            .joint_rings
            .iter()
            .map(|f| Ring {
                dl: self.max_dl * f.dl,
                dc: self.max_dc * f.dc,
                hue_span: self.hue_span_deg * f.hue,
            })
            .chain(std::iter::once(Ring {
                dl: self.max_dl,
                dc: self.max_dc,
                hue_span: self.hue_span_deg,
            }));

        match self.strategy {
            Strategy::LFirst => l_only.chain(joint).collect(),
            Strategy::Lc => joint.chain(l_only).collect(),
        }
    }
}

/// One search ring: the `±` budget on each axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ring {
    pub dl: f64,
    pub dc: f64,
    /// Hue fan half-width in degrees. Only used when drift is allowed.
    pub hue_span: f64,
}

// ─── Candidates ─────────────────────────────────────────────────────────────

/// A scored base color. `l`, `c` and `h` are the OKLCH coordinates `hex`
/// decodes to, so they already include gamut mapping and 8-bit rounding.
#[derive(Debug, Clone, PartialEq)]
pub struct OptimizationCandidate {
    pub hex: HexColor,
    pub l: f64,
    pub c: f64,
    pub h: f64,
    /// Weighted distance from the input.
    pub distance: f64,
    pub pass_rate: Option<f64>,
    pub penalty: f64,
    /// Number of failing mandatory checks.
    pub mandatory_failures: usize,
}

impl OptimizationCandidate {
    fn new(hex: HexColor, color: Color, distance: f64, audit: AuditSummary) -> Self {
        Self {
            hex,
            l: color.l,
            c: color.c,
            h: color.h,
            distance,
            pass_rate: audit.pass_rate,
            penalty: audit.penalty,
            mandatory_failures: audit.mandatory_failures,
        }
    }

    #[must_use]
    pub fn summary(&self) -> AuditSummary {
        AuditSummary {
            pass_rate: self.pass_rate,
            penalty: self.penalty,
            mandatory_failures: self.mandatory_failures,
        }
    }

    /// Ranking order: fewer mandatory failures, then lower penalty, then
    /// closer to the input.
    #[must_use]
    pub fn rank(&self, other: &Self) -> Ordering {
        self.mandatory_failures
            .cmp(&other.mandatory_failures)
            .then_with(|| self.penalty.total_cmp(&other.penalty))
            .then_with(|| self.distance.total_cmp(&other.distance))
    }

    fn better_than(&self, other: &Self) -> bool {
        self.rank(other) == Ordering::Less
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct OptimizeOutcome {
    pub best: OptimizationCandidate,
    /// Whether `best` meets the target pass rate with no mandatory failure.
    pub met_target: bool,
    /// Rings searched before stopping. Zero when the input already passed.
    pub rings_evaluated: usize,
    /// Grid and refinement points scored, cache hits included.
    pub candidates_scored: usize,
}

// ─── Search ─────────────────────────────────────────────────────────────────

struct Search<'a> {
    origin: Color,
    chroma_floor: f64,
    spacing: f64,
    level_count: usize,
    surfaces: &'a Surfaces,
    options: &'a OptimizeOptions,
    cache: HashMap<HexColor, AuditSummary>,
    scored: usize,
}

impl Search<'_> {
    fn audit(&mut self, hex: HexColor) -> AuditSummary {
        let (spacing, level_count, surfaces, mode) =
            (self.spacing, self.level_count, self.surfaces, self.options.mode);
        *self
            .cache
            .entry(hex)
            .or_insert_with(|| evaluate(hex, spacing, level_count, surfaces, mode).summary())
    }

    /// Score one requested point. The candidate describes the color the
    /// returned hex actually decodes to, after gamut mapping and 8-bit
    /// quantization. `None` when that color drifts past the hue cap or
    /// falls under the chroma floor.
    fn score(&mut self, l: f64, c: f64, h: f64) -> Option<(Color, OptimizationCandidate)> {
        let point = Color::oklch(l.clamp(0.0, 1.0), c.max(self.chroma_floor), normalize_hue(h));
        let hex = oklch_to_hex(point.l, point.c, point.h);
        let actual = hex.to_oklch();

        if actual.c < self.chroma_floor {
            return None;
        }
        if let Some(cap) = self.options.max_hue_drift_deg {
            if !actual.is_achromatic() && hue_diff(actual.h, self.origin.h) > cap + BUDGET_EPS {
                return None;
            }
        }

        let audit = self.audit(hex);
        self.scored += 1;
        let distance = self.options.weights.distance(self.origin, actual);
        Some((point, OptimizationCandidate::new(hex, actual, distance, audit)))
    }

    fn hues(&self, ring: Ring) -> Vec<f64> {
        if !self.options.allow_hue_drift || ring.hue_span <= 0.0 {
            return vec![self.origin.h];
        }
        offsets(ring.hue_span, self.options.hue_step_deg)
            .map(|dh| normalize_hue(self.origin.h + dh))
            .collect()
    }

    fn run_ring(&mut self, ring: Ring) -> Option<OptimizationCandidate> {
        let Color { l: l0, c: c0, .. } = self.origin;
        let grid = self.options.grid_step;
        let mut ring_best: Option<(Color, OptimizationCandidate)> = None;

        for h in self.hues(ring) {
            for dl in offsets(ring.dl, grid) {
                for dc in offsets(ring.dc, grid) {
                    if let Some((point, cand)) = self.score(l0 + dl, c0 + dc, h) {
                        if ring_best.as_ref().is_none_or(|(_, b)| cand.better_than(b)) {
                            ring_best = Some((point, cand));
                        }
                    }
                }
            }
        }

        // Refine around the requested point, not the decoded one, so the
        // fine grid stays aligned with the coarse one.
        let (center, mut best) = ring_best?;
        let refine = self.options.refine_step;
        let reach = (grid / refine).ceil() as i32;
        let (center_dl, center_dc) = (center.l - l0, center.c - c0);

        for i in -reach..=reach {
            for j in -reach..=reach {
                let dl = f64::from(i).mul_add(refine, center_dl);
                let dc = f64::from(j).mul_add(refine, center_dc);
                if dl.abs() > ring.dl + BUDGET_EPS || dc.abs() > ring.dc + BUDGET_EPS {
                    continue;
                }
                if let Some((_, cand)) = self.score(l0 + dl, c0 + dc, center.h) {
                    if cand.better_than(&best) {
                        trace!(
                            hex = %cand.hex,
                            penalty = cand.penalty,
                            "refinement improved ring best"
                        );
                        best = cand;
                    }
                }
            }
        }

        Some(best)
    }
}

/// Symmetric grid offsets `-n·step ..= n·step` that stay within `budget`.
fn offsets(budget: f64, step: f64) -> impl Iterator<Item = f64> {
    let n = if budget > 0.0 { (budget / step + BUDGET_EPS).floor() as i32 } else { 0 };
    (-n..=n).map(move |i| f64::from(i) * step)
}

/// Search for the nearest base color whose ladders meet
/// `options.target_pass_rate` with no mandatory failure.
///
/// Always returns a candidate. If the input already passes it comes back
/// unchanged; if nothing within budget passes, the best-ranked candidate
/// comes back with `met_target = false`.
#[must_use]
#[instrument(skip(surfaces, options), fields(mode = ?options.mode, strategy = %options.strategy))]
pub fn find_nearest_passing_base(
    base: HexColor,
    spacing: f64,
    level_count: usize,
    surfaces: &Surfaces,
    options: &OptimizeOptions,
) -> OptimizeOutcome {
    let options = options.sanitized();
    let origin = base.to_oklch();
    let target = options.target_pass_rate;

    let mut search = Search {
        origin,
        chroma_floor: options.min_chroma_abs.max(origin.c * options.min_chroma_ratio),
        spacing,
        level_count,
        surfaces,
        options: &options,
        cache: HashMap::new(),
        scored: 0,
    };

    let seed = OptimizationCandidate::new(base, origin, 0.0, search.audit(base));
    if seed.summary().meets(target) {
        debug!(pass_rate = ?seed.pass_rate, "input already meets target");
        return OptimizeOutcome {
            best: seed,
            met_target: true,
            rings_evaluated: 0,
            candidates_scored: 0,
        };
    }

    let mut best = seed;
    let mut rings_evaluated = 0;

    for ring in options.rings() {
        rings_evaluated += 1;
        let Some(ring_best) = search.run_ring(ring) else {
            continue;
        };
        debug!(
            ring = rings_evaluated,
            dl = ring.dl,
            dc = ring.dc,
            hue_span = ring.hue_span,
            hex = %ring_best.hex,
            penalty = ring_best.penalty,
            mandatory_failures = ring_best.mandatory_failures,
            "ring searched"
        );
        if ring_best.better_than(&best) {
            best = ring_best;
        }
        if best.summary().meets(target) {
            break;
        }
    }

    let met_target = best.summary().meets(target);
    if met_target {
        info!(
            hex = %best.hex,
            distance = best.distance,
            rings = rings_evaluated,
            "found passing base"
        );
    } else {
        warn!(
            hex = %best.hex,
            pass_rate = ?best.pass_rate,
            penalty = best.penalty,
            mandatory_failures = best.mandatory_failures,
            "no base within budget meets target"
        );
    }

    OptimizeOutcome { best, met_target, rings_evaluated, candidates_scored: search.scored }
}
