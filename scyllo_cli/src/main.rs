//! `scyllo`, enzyme constrained prediction of scyllo-inositol production
//!
//! **Usage:**
//! ```text
//! scyllo augment --model iYO844.json --output sc_iYO844.json
//! scyllo optimize --model sc_iYO844.json [-g 0.3] [-u 100] [-t full]
//! ```
mod logging;

use std::path::{Path, PathBuf};
use std::process;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use scyllo_core::augment::{augment, AugmentationPlan};
use scyllo_core::configuration::{Solver, CONFIGURATION};
use scyllo_core::enzyme::builder::{BuildSettings, DEFAULT_GROWTH_RATE, DEFAULT_UPTAKE_BOUND};
use scyllo_core::enzyme::catalogue::ReactionCatalogue;
use scyllo_core::enzyme::regime::Regime;
use scyllo_core::flexnet::steady_state::fba;
use scyllo_core::metabolic_model::model::Model;
use scyllo_core::pipeline::{run, RunSettings};

/// Predict scyllo-inositol production of B. subtilis under enzyme constraints
#[derive(Parser, Debug)]
#[command(name = "scyllo", version, about)]
struct Cli {
    /// Linear programming solver
    #[arg(long, value_enum, default_value_t = SolverChoice::Clarabel, global = true)]
    solver: SolverChoice,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Add the scyllo-inositol pathway to a model and write the result
    Augment {
        /// COBRA json file of the base model
        #[arg(long)]
        model: PathBuf,
        /// Where the augmented model is written
        #[arg(long)]
        output: PathBuf,
    },
    /// Maximize scyllo-inositol production under enzyme constraints
    Optimize {
        /// COBRA json file of the augmented model
        #[arg(long)]
        model: PathBuf,
        /// Json reaction catalogue, the built-in catalogue is used when absent
        #[arg(long)]
        catalogue: Option<PathBuf>,
        /// Growth rate (h-1)
        #[arg(short, long, default_value_t = DEFAULT_GROWTH_RATE)]
        growth: f64,
        /// Upper bound for the glucose uptake rate (mmol gDW-1 h-1)
        #[arg(short = 'u', long, default_value_t = DEFAULT_UPTAKE_BOUND)]
        glc_uptake_bound: f64,
        /// Constraints added: full (g+s), capacity-only (gecko-only, g), pool-only
        /// (smoment-only, s) or none (n)
        #[arg(short = 't', long, default_value = "full")]
        regime: Regime,
    },
}

#[derive(Copy, Clone, Debug, PartialEq, ValueEnum)]
enum SolverChoice {
    Clarabel,
    Microlp,
}

fn main() -> Result<()> {
    logging::init("warn");
    let cli = Cli::parse();
    select_solver(cli.solver);

    match cli.command {
        Command::Augment { model, output } => augment_model(&model, &output),
        Command::Optimize {
            model,
            catalogue,
            growth,
            glc_uptake_bound,
            regime,
        } => {
            let settings = RunSettings {
                regime,
                build: BuildSettings {
                    growth_rate: growth,
                    uptake_bound: glc_uptake_bound,
                    ..BuildSettings::default()
                },
            };
            optimize(&model, catalogue.as_deref(), &settings)
        }
    }
}

fn select_solver(choice: SolverChoice) {
    let solver = match choice {
        SolverChoice::Clarabel => Solver::Clarabel,
        SolverChoice::Microlp => Solver::Microlp,
    };
    if let Ok(mut config) = CONFIGURATION.write() {
        config.solver = solver;
    }
}

fn augment_model(model_path: &Path, output: &Path) -> Result<()> {
    let base = Model::read_json(model_path)
        .with_context(|| format!("reading model {}", model_path.display()))?;
    let augmented = augment(&base, &AugmentationPlan::scyllo_inositol())
        .context("adding the scyllo-inositol pathway")?;
    augmented
        .write_json(output)
        .with_context(|| format!("writing model {}", output.display()))?;

    let solution = fba(&augmented).context("running flux balance analysis")?;
    match solution.objective_value {
        Some(value) => println!(
            "The scyllo-inositol production is: {} mmol gDW-1 h-1",
            value
        ),
        None => println!("Flux balance analysis status: {}", solution.status),
    }
    Ok(())
}

fn optimize(
    model_path: &Path,
    catalogue_path: Option<&Path>,
    settings: &RunSettings,
) -> Result<()> {
    let model = Model::read_json(model_path)
        .with_context(|| format!("reading model {}", model_path.display()))?;
    let catalogue = match catalogue_path {
        Some(path) => ReactionCatalogue::read_json(path)
            .with_context(|| format!("reading catalogue {}", path.display()))?,
        None => ReactionCatalogue::scyllo_default().context("loading built-in catalogue")?,
    };
    let report = run(&model, &catalogue, settings)?;

    println!("{}", report.summary());
    println!("Growth rate: {} h-1", report.growth_rate);
    match (report.uptake_flow, report.production) {
        (Some(uptake), Some(production)) if report.is_optimal() => {
            println!("Glucose uptake rate: {} mmol gDW-1 h-1", uptake);
            println!("Scyllo-inositol production: {} mmol gDW-1 h-1", production);
            Ok(())
        }
        _ => {
            println!("Solver status: {}", report.status);
            process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;

    fn parse_optimize(args: &[&str]) -> (Option<PathBuf>, f64, f64, Regime) {
        let cli = Cli::try_parse_from(
            ["scyllo", "optimize", "--model", "sc_iYO844.json"]
                .iter()
                .chain(args),
        )
        .unwrap();
        match cli.command {
            Command::Optimize {
                catalogue,
                growth,
                glc_uptake_bound,
                regime,
                ..
            } => (catalogue, growth, glc_uptake_bound, regime),
            Command::Augment { .. } => panic!("expected the optimize subcommand"),
        }
    }

    #[test]
    fn optimize_defaults() {
        let (catalogue, growth, uptake, regime) = parse_optimize(&[]);
        assert!(catalogue.is_none());
        assert_eq!(growth, 0.3);
        assert_eq!(uptake, 100.);
        assert_eq!(regime, Regime::Full);
    }

    #[test]
    fn optimize_flags() {
        let (_, growth, uptake, regime) = parse_optimize(&["-g", "0.2", "-u", "20", "-t", "n"]);
        assert_eq!(growth, 0.2);
        assert_eq!(uptake, 20.);
        assert_eq!(regime, Regime::Unconstrained);
        let (_, _, uptake, _) = parse_optimize(&["--glc-uptake-bound", "4"]);
        assert_eq!(uptake, 4.);
    }

    #[test]
    fn regime_aliases() {
        for (token, expected) in [
            ("g+s", Regime::Full),
            ("gecko-only", Regime::CapacityOnly),
            ("capacity-only", Regime::CapacityOnly),
            ("smoment-only", Regime::PoolOnly),
            ("pool-only", Regime::PoolOnly),
            ("n", Regime::Unconstrained),
            ("none", Regime::Unconstrained),
        ] {
            let (_, _, _, regime) = parse_optimize(&["-t", token]);
            assert_eq!(regime, expected, "{}", token);
            let (_, _, _, regime) = parse_optimize(&["--regime", token]);
            assert_eq!(regime, expected, "{}", token);
        }
    }

    #[test]
    fn invalid_regime_rejected() {
        let err = Cli::try_parse_from([
            "scyllo",
            "optimize",
            "--model",
            "sc_iYO844.json",
            "-t",
            "bogus",
        ])
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValueValidation);
        assert_ne!(err.exit_code(), 0);
    }

    #[test]
    fn optimize_requires_model() {
        let err = Cli::try_parse_from(["scyllo", "optimize"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn augment_paths_and_solver() {
        let cli = Cli::try_parse_from([
            "scyllo",
            "augment",
            "--model",
            "iYO844.json",
            "--output",
            "sc_iYO844.json",
            "--solver",
            "microlp",
        ])
        .unwrap();
        assert_eq!(cli.solver, SolverChoice::Microlp);
        match cli.command {
            Command::Augment { model, output } => {
                assert_eq!(model, PathBuf::from("iYO844.json"));
                assert_eq!(output, PathBuf::from("sc_iYO844.json"));
            }
            Command::Optimize { .. } => panic!("expected the augment subcommand"),
        }
        let cli = Cli::try_parse_from(["scyllo", "augment", "--model", "a", "--output", "b"])
            .unwrap();
        assert_eq!(cli.solver, SolverChoice::Clarabel);
    }
}
