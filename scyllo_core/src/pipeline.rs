//! Lower, constrain and solve a model in one run
use thiserror::Error;
use tracing::info;

use crate::enzyme::builder::{build_constraints, BuildError, BuildSettings, DEFAULT_UPTAKE_BOUND};
use crate::enzyme::catalogue::ReactionCatalogue;
use crate::enzyme::regime::Regime;
use crate::flexnet::steady_state::{solve_with, SolveError};
use crate::flexnet::{FlexNet, NetworkError};
use crate::metabolic_model::model::Model;
use crate::optimize::problem::ProblemError;
use crate::optimize::solvers::{configured_solver, Solver};
use crate::optimize::OptimizationStatus;

/// Parameters of one run
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RunSettings {
    pub regime: Regime,
    pub build: BuildSettings,
}

/// Outcome of one run
#[derive(Clone, Debug, PartialEq)]
pub struct RunReport {
    pub regime: Regime,
    /// Growth rate the growth channel was fixed to
    pub growth_rate: f64,
    /// Bound applied to the uptake channel
    pub uptake_bound: f64,
    pub status: OptimizationStatus,
    /// Maximal rate of the product channel, None without a solution
    pub production: Option<f64>,
    /// Realized rate of the uptake channel, None without a solution
    pub uptake_flow: Option<f64>,
    /// Number of network constraints handed to the solver
    pub constraints: usize,
}

impl RunReport {
    pub fn is_optimal(&self) -> bool {
        self.status.has_solution()
    }

    /// Summary of the constraints applied during the run
    pub fn summary(&self) -> String {
        self.regime.summary(self.uptake_bound != DEFAULT_UPTAKE_BOUND)
    }
}

/// Lower `model`, add the enzyme constraints of the catalogue and maximize production
/// with the configured solver
pub fn run(
    model: &Model,
    catalogue: &ReactionCatalogue,
    settings: &RunSettings,
) -> Result<RunReport, PipelineError> {
    let solver = configured_solver().map_err(ProblemError::from)?;
    run_with(model, catalogue, settings, solver.as_ref())
}

/// [`run`] with the given solver
pub fn run_with(
    model: &Model,
    catalogue: &ReactionCatalogue,
    settings: &RunSettings,
    solver: &dyn Solver,
) -> Result<RunReport, PipelineError> {
    let mut network = FlexNet::from_model(model)?;
    let objective = build_constraints(&mut network, catalogue, settings.regime, &settings.build)?;
    let solution = solve_with(
        &network,
        &objective,
        &settings.build.uptake_channel,
        solver,
    )?;
    info!(
        regime = %settings.regime,
        status = %solution.status,
        production = solution.objective_value,
        "run finished"
    );
    Ok(RunReport {
        regime: settings.regime,
        growth_rate: settings.build.growth_rate,
        uptake_bound: settings.build.uptake_bound,
        status: solution.status,
        production: solution.objective_value,
        uptake_flow: solution.uptake_flow,
        constraints: network.constraints().len(),
    })
}

/// Errors raised during a run
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PipelineError {
    #[error("Unable to lower model: {0}")]
    Network(#[from] NetworkError),
    #[error("Unable to build enzyme constraints: {0}")]
    Build(#[from] BuildError),
    #[error("Unable to solve network: {0}")]
    Solve(#[from] SolveError),
}

impl From<ProblemError> for PipelineError {
    fn from(value: ProblemError) -> Self {
        PipelineError::Solve(SolveError::Problem(value))
    }
}
