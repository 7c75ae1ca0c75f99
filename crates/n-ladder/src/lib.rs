//! # n-ladder: accessible color ladders from one brand color
//!
//! Turns a single base color into tints and shades, maps semantic UI roles
//! onto the result, checks those roles against WCAG contrast thresholds,
//! and, when the checks fail, searches for the nearest base color that
//! passes.
//!
//! # Architecture
//!
//! ```text
//! base hex + spacing + level count
//!     │
//!     ▼
//! ladder.rs:   tints / base / shades (curve.rs tables, OKLCH)
//!     │
//!     ▼
//! roles.rs:    default / hover / disabled / tint-n / shade-n → step keys
//!     │
//!     ▼
//! audit.rs:    fixed catalog of fg/bg pairs per theme → pass rate, penalty
//!     │
//!     ▼  (failing)
//! optimize.rs: ring search around the base → nearest passing candidate
//! ```
//!
//! Everything here is a pure function of its inputs; callers hold the
//! state.

// Single-char math variables are standard in color science.
#![allow(clippy::many_single_char_names)]
// Level counts and grid indices become floats.
#![allow(clippy::cast_precision_loss)]
// Grid sizes are small and positive.
#![allow(clippy::cast_possible_truncation)]
// Lightness/chroma/hue names are inherently similar.
#![allow(clippy::similar_names)]

pub mod audit;
pub mod config;
pub mod contrast;
pub mod curve;
pub mod ladder;
pub mod optimize;
pub mod policy;
pub mod roles;
pub mod spacing;
pub mod surfaces;

pub use audit::{AuditMode, AuditResult, AuditSummary, Check, evaluate};
pub use config::{ChromaConfig, ConfigError};
pub use contrast::{contrast_ratio, relative_luminance, solve_on_color};
pub use ladder::{Ladder, LadderStep, Theme, generate_ladder};
pub use optimize::{
    DistanceWeights, OptimizationCandidate, OptimizeOptions, OptimizeOutcome, Strategy,
    find_nearest_passing_base,
};
pub use policy::Policy;
pub use roles::{Role, RoleKeys, compute_role_keys};
pub use spacing::{Spacing, SpacingPreset};
pub use surfaces::{SurfacePair, Surfaces};
