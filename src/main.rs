// SPDX-License-Identifier: MIT
//
// n-chroma: accessible OKLCH color ladders from a single brand color.
//
// This is the command-line front end over the two library crates:
//
//   n-color  → hex codec, OKLCH conversion, gamut mapping
//   n-ladder → ladders, roles, WCAG audit, base-color search
//
// Every subcommand resolves its inputs the same way: built-in defaults,
// then the TOML config file (if any), then command-line flags. Reports go
// to stdout as plain text; logs go to stderr, filtered by RUST_LOG.
//
//   n-chroma ladder   --base '#6D94A2' --spacing open
//   n-chroma audit    --base '#6D94A2' --mode light
//   n-chroma optimize --base '#CCCCCC' --mode light --target 0.95

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing::debug;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

use n_color::HexColor;
use n_ladder::{
    AuditMode, AuditResult, ChromaConfig, Ladder, OptimizeOutcome, Spacing, Strategy, Theme,
    compute_role_keys, evaluate, find_nearest_passing_base, generate_ladder,
};

// ─── Command line ───────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(
    name = "n-chroma",
    version,
    about = "Accessible OKLCH color ladders from a single brand color"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the tint/shade ladder and its role assignments
    Ladder {
        #[command(flatten)]
        input: InputArgs,

        /// Only print this theme (both by default)
        #[arg(long, value_enum)]
        theme: Option<ThemeArg>,
    },

    /// Run the contrast audit
    Audit {
        #[command(flatten)]
        input: InputArgs,

        /// Which themes to audit
        #[arg(long, value_enum)]
        mode: Option<ModeArg>,

        /// Only list failing checks
        #[arg(long)]
        failures_only: bool,
    },

    /// Search for the nearest base color that passes the audit
    Optimize {
        #[command(flatten)]
        input: InputArgs,

        /// Which themes to audit
        #[arg(long, value_enum)]
        mode: Option<ModeArg>,

        /// Target pass rate (0.0–1.0)
        #[arg(long)]
        target: Option<f64>,

        /// Let the search move the hue
        #[arg(long)]
        allow_hue_drift: bool,

        /// Ring order
        #[arg(long, value_enum)]
        strategy: Option<StrategyArg>,

        /// Largest lightness change
        #[arg(long)]
        max_dl: Option<f64>,

        /// Largest chroma change
        #[arg(long)]
        max_dc: Option<f64>,
    },
}

#[derive(Args, Debug)]
struct InputArgs {
    /// Brand color, e.g. '#6D94A2'
    #[arg(long, short)]
    base: Option<HexColor>,

    /// Spacing scale: a positive number or tight, snug, regular, relaxed, open
    #[arg(long, short)]
    spacing: Option<Spacing>,

    /// Number of ladder levels (3–10)
    #[arg(long, short)]
    levels: Option<usize>,

    /// TOML config file
    #[arg(long, short, env = "N_CHROMA_CONFIG")]
    config: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ThemeArg {
    Light,
    Dark,
}

impl From<ThemeArg> for Theme {
    fn from(arg: ThemeArg) -> Self {
        match arg {
            ThemeArg::Light => Self::Light,
            ThemeArg::Dark => Self::Dark,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ModeArg {
    Combined,
    #[value(alias = "light-only")]
    Light,
    #[value(alias = "dark-only")]
    Dark,
}

impl From<ModeArg> for AuditMode {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::Combined => Self::Combined,
            ModeArg::Light => Self::LightOnly,
            ModeArg::Dark => Self::DarkOnly,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum StrategyArg {
    #[value(name = "l-first")]
    LFirst,
    Lc,
}

impl From<StrategyArg> for Strategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::LFirst => Self::LFirst,
            StrategyArg::Lc => Self::Lc,
        }
    }
}

// ─── Input resolution ───────────────────────────────────────────────────────

/// Config file values with command-line overrides applied.
struct Resolved {
    base: HexColor,
    config: ChromaConfig,
}

impl Resolved {
    fn spacing(&self) -> f64 {
        self.config.spacing.scale()
    }
}

fn resolve(input: &InputArgs) -> Result<Resolved> {
    let mut config = match &input.config {
        Some(path) => ChromaConfig::load(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => ChromaConfig::default(),
    };

    if let Some(spacing) = input.spacing {
        config.spacing = spacing;
    }
    if let Some(levels) = input.levels {
        config.levels = levels;
    }

    let base = input
        .base
        .or(config.base)
        .context("no base color: pass --base or set `base` in the config file")?;

    debug!(%base, spacing = %config.spacing, levels = config.levels, "resolved input");
    Ok(Resolved { base, config })
}

// ─── Reports ────────────────────────────────────────────────────────────────

fn print_ladder(ladder: &Ladder) {
    println!("{} ladder, spacing {:.3}", ladder.theme, ladder.spacing);
    for step in ladder {
        let ratio = n_ladder::contrast_ratio(step.on, step.hex);
        println!(
            "  {:<8} {:<8} {}  on {}  {:>5.2}:1",
            step.key, step.label, step.hex, step.on, ratio
        );
    }

    let keys = compute_role_keys(&ladder.steps);
    let roles: Vec<String> = keys.iter().map(|(role, key)| format!("{role}={key}")).collect();
    println!("  roles: {}", roles.join(" "));
}

fn format_rate(rate: Option<f64>) -> String {
    rate.map_or_else(|| "n/a".to_owned(), |r| format!("{:.1}%", r * 100.0))
}

fn print_audit(result: &AuditResult, failures_only: bool) {
    for check in &result.checks {
        if failures_only && check.pass {
            continue;
        }
        let mut flags = Vec::new();
        if check.is_mandatory() {
            flags.push("mandatory");
        }
        if check.is_exempt() {
            flags.push("exempt");
        }
        println!(
            "  {} {:<30} {} on {}  {:>5.2}:1 (need {:.1}) {}",
            if check.pass { "pass" } else { "FAIL" },
            check.id(),
            check.fg,
            check.bg,
            check.ratio,
            check.target,
            flags.join(",")
        );
    }
    println!(
        "pass rate {}, penalty {:.3}, mandatory failures {}",
        format_rate(result.pass_rate),
        result.penalty,
        result.mandatory_failures.len()
    );
    for id in &result.mandatory_failures {
        println!("  mandatory: {id}");
    }
}

fn print_outcome(base: HexColor, outcome: &OptimizeOutcome) {
    let best = &outcome.best;
    let origin = base.to_oklch();
    println!("input  {base}  L {:.3} C {:.3} H {:.1}", origin.l, origin.c, origin.h);
    println!("best   {}  L {:.3} C {:.3} H {:.1}", best.hex, best.l, best.c, best.h);
    println!(
        "       ΔL {:+.3} ΔC {:+.3} distance {:.4}",
        best.l - origin.l,
        best.c - origin.c,
        best.distance
    );
    println!(
        "pass rate {}, penalty {:.3}, mandatory failures {}",
        format_rate(best.pass_rate),
        best.penalty,
        best.mandatory_failures
    );
    println!(
        "{} after {} ring(s), {} candidates scored",
        if outcome.met_target { "target met" } else { "target NOT met" },
        outcome.rings_evaluated,
        outcome.candidates_scored
    );
}

// ─── Main ───────────────────────────────────────────────────────────────────

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Ladder { input, theme } => {
            let r = resolve(&input)?;
            let themes: Vec<Theme> = theme.map_or_else(|| Theme::ALL.to_vec(), |t| vec![t.into()]);
            for (i, theme) in themes.into_iter().enumerate() {
                if i > 0 {
                    println!();
                }
                print_ladder(&generate_ladder(r.base, r.spacing(), r.config.levels, theme));
            }
        }

        Commands::Audit { input, mode, failures_only } => {
            let r = resolve(&input)?;
            let mode = mode.map_or(r.config.optimizer.mode, AuditMode::from);
            let result = evaluate(r.base, r.spacing(), r.config.levels, &r.config.surfaces, mode);
            print_audit(&result, failures_only);

            let target = r.config.optimizer.target_pass_rate;
            if !result.meets(target) {
                println!("below target {:.1}%", target * 100.0);
            }
        }

        Commands::Optimize { input, mode, target, allow_hue_drift, strategy, max_dl, max_dc } => {
            let r = resolve(&input)?;
            let mut options = r.config.optimizer.clone();
            if let Some(mode) = mode {
                options.mode = mode.into();
            }
            if let Some(target) = target {
                options.target_pass_rate = target;
            }
            if allow_hue_drift {
                options.allow_hue_drift = true;
            }
            if let Some(strategy) = strategy {
                options.strategy = strategy.into();
            }
            if let Some(max_dl) = max_dl {
                options.max_dl = max_dl;
            }
            if let Some(max_dc) = max_dc {
                options.max_dc = max_dc;
            }

            let outcome = find_nearest_passing_base(
                r.base,
                r.spacing(),
                r.config.levels,
                &r.config.surfaces,
                &options,
            );
            print_outcome(r.base, &outcome);
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::WARN.into())
                .from_env_lossy(),
        )
        .init();

    run(Cli::parse())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_optimize_flags() {
        let cli = Cli::try_parse_from([
            "n-chroma", "optimize", "--base", "#cccccc", "--mode", "light", "--strategy", "lc",
            "--spacing", "open", "--target", "0.9",
        ])
        .unwrap();
        let Commands::Optimize { input, mode, strategy, target, .. } = cli.command else {
            panic!("expected optimize");
        };
        assert_eq!(input.base, Some(HexColor::from_rgb8(0xCC, 0xCC, 0xCC)));
        assert_eq!(input.spacing, Some(Spacing::Preset(n_ladder::SpacingPreset::Open)));
        assert!(matches!(mode, Some(ModeArg::Light)));
        assert!(matches!(strategy, Some(StrategyArg::Lc)));
        assert_eq!(target, Some(0.9));
    }

    #[test]
    fn rejects_bad_base() {
        assert!(Cli::try_parse_from(["n-chroma", "ladder", "--base", "#12"]).is_err());
    }

    #[test]
    fn base_comes_from_flag_or_config() {
        let input = InputArgs { base: None, spacing: None, levels: Some(7), config: None };
        assert!(resolve(&input).is_err());

        let input = InputArgs { base: Some(HexColor::BLACK), ..input };
        let r = resolve(&input).unwrap();
        assert_eq!(r.base, HexColor::BLACK);
        assert_eq!(r.config.levels, 7);
    }
}
