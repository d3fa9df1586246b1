//! Steady state analysis of a flow network
//!
//! Every metabolite stock is balanced (total production equals total consumption), enzyme
//! stock levels are held constant, and the network constraints are added verbatim.
use indexmap::IndexMap;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::flexnet::constraint::{level_variable_id, Relation};
use crate::flexnet::stock::StockKind;
use crate::flexnet::{FlexNet, NetworkError};
use crate::metabolic_model::model::Model;
use crate::metabolic_model::reaction::{backward_channel_id, forward_channel_id};
use crate::optimize::objective::{Objective, ObjectiveSense};
use crate::optimize::problem::{Problem, ProblemError};
use crate::optimize::solvers::{configured_solver, Solver};
use crate::optimize::OptimizationStatus;

/// Result of a steady state analysis
#[derive(Clone, Debug, PartialEq)]
pub struct FluxSolution {
    /// Status reported by the solver
    pub status: OptimizationStatus,
    /// Optimal objective value, None unless the status carries a solution
    pub objective_value: Option<f64>,
    /// Realized rate of the uptake channel, None unless the status carries a solution
    pub uptake_flow: Option<f64>,
    /// Map of channel ids to realized rates, None unless the status carries a solution
    pub flows: Option<IndexMap<String, f64>>,
}

impl FluxSolution {
    /// Whether the solver found a usable flow
    pub fn is_optimal(&self) -> bool {
        self.status.has_solution()
    }

    /// Realized rate of a channel
    pub fn flow(&self, channel: &str) -> Option<f64> {
        self.flows.as_ref().and_then(|flows| flows.get(channel).copied())
    }
}

impl FlexNet {
    /// Translate the network and `objective` into a linear program
    ///
    /// Rates are named after their channel, enzyme stock levels are fixed variables named
    /// `level[<stock>]`, and each metabolite stock contributes a `balance_<stock>`
    /// equality.
    pub fn to_problem(&self, objective: &Objective) -> Result<Problem, SolveError> {
        let mut problem = Problem::new(objective.sense());
        for channel in self.channels().values() {
            problem.add_new_variable(&channel.id, channel.lower_bound, channel.upper_bound)?;
        }
        for stock in self.stocks().values().filter(|s| s.is_enzyme()) {
            problem.add_new_variable(&level_variable_id(&stock.id), stock.level, stock.level)?;
        }

        // Collect the balance of each metabolite stock over every channel touching it
        let mut balances: IndexMap<&str, (Vec<&str>, Vec<f64>)> = self
            .stocks()
            .values()
            .filter(|s| s.kind == StockKind::Metabolite)
            .map(|s| (s.id.as_str(), (Vec::new(), Vec::new())))
            .collect();
        for channel in self.channels().values() {
            for (stock, coefficient) in &channel.stoichiometry {
                if let Some((ids, coefficients)) = balances.get_mut(stock.as_str()) {
                    ids.push(channel.id.as_str());
                    coefficients.push(*coefficient);
                }
            }
        }
        for (stock, (ids, coefficients)) in balances {
            if ids.is_empty() {
                continue;
            }
            problem.add_new_equality_constraint(
                &format!("balance_{}", stock),
                &ids,
                &coefficients,
                0.,
            )?;
        }

        for constraint in self.constraints() {
            let ids: Vec<String> = constraint
                .terms
                .iter()
                .map(|t| t.variable.variable_id())
                .collect();
            let ids: Vec<&str> = ids.iter().map(String::as_str).collect();
            let coefficients: Vec<f64> = constraint.terms.iter().map(|t| t.coefficient).collect();
            match constraint.relation {
                Relation::Equal => problem.add_new_equality_constraint(
                    &constraint.id,
                    &ids,
                    &coefficients,
                    constraint.rhs,
                )?,
                Relation::LessEqual => problem.add_new_inequality_constraint(
                    &constraint.id,
                    &ids,
                    &coefficients,
                    f64::NEG_INFINITY,
                    constraint.rhs,
                )?,
                Relation::GreaterEqual => problem.add_new_inequality_constraint(
                    &constraint.id,
                    &ids,
                    &coefficients,
                    constraint.rhs,
                    f64::INFINITY,
                )?,
            }
        }

        for term in objective.terms() {
            if self.channel(&term.variable_id).is_none() {
                return Err(NetworkError::UnknownChannel(term.variable_id.clone()).into());
            }
            problem.add_new_linear_objective_term(&term.variable_id, term.coefficient)?;
        }
        Ok(problem)
    }
}

/// Solve the network at steady state with the configured solver
///
/// # Parameters
/// - network: Network to analyze
/// - objective: Linear objective over channel rates
/// - uptake_channel: Channel whose realized rate is reported as the uptake flow
///
/// # Errors
/// Infeasible and unbounded problems are reported through [`FluxSolution::status`].
/// Errors are only returned when the problem can't be built or handed to the solver.
pub fn solve(
    network: &FlexNet,
    objective: &Objective,
    uptake_channel: &str,
) -> Result<FluxSolution, SolveError> {
    let solver = configured_solver().map_err(ProblemError::from)?;
    solve_with(network, objective, uptake_channel, solver.as_ref())
}

/// Solve the network at steady state with the given solver
pub fn solve_with(
    network: &FlexNet,
    objective: &Objective,
    uptake_channel: &str,
    solver: &dyn Solver,
) -> Result<FluxSolution, SolveError> {
    network.require_channel(uptake_channel)?;
    steady_state(network, objective, Some(uptake_channel), solver)
}

fn steady_state(
    network: &FlexNet,
    objective: &Objective,
    uptake_channel: Option<&str>,
    solver: &dyn Solver,
) -> Result<FluxSolution, SolveError> {
    let mut problem = network.to_problem(objective)?;
    debug!(
        variables = problem.variables().len(),
        constraints = problem.constraints().len(),
        "built steady state problem"
    );
    let solution = problem.solve_with(solver)?;
    if !solution.status.has_solution() {
        warn!(status = %solution.status, "steady state analysis found no solution");
        return Ok(FluxSolution {
            status: solution.status,
            objective_value: None,
            uptake_flow: None,
            flows: None,
        });
    }
    let flows: Option<IndexMap<String, f64>> = solution.variable_values.map(|values| {
        values
            .into_iter()
            .filter(|(id, _)| network.channel(id).is_some())
            .collect()
    });
    let uptake_flow = match (uptake_channel, &flows) {
        (Some(channel), Some(flows)) => flows.get(channel).copied(),
        _ => None,
    };
    info!(
        status = %solution.status,
        objective = solution.objective_value,
        "steady state analysis finished"
    );
    Ok(FluxSolution {
        status: solution.status,
        objective_value: solution.objective_value,
        uptake_flow,
        flows,
    })
}

/// Flux balance analysis of a model against its own objective
///
/// The objective map of the model is maximized, with forward channels weighted by the
/// objective coefficient and backward channels by its negation.
pub fn fba(model: &Model) -> Result<FluxSolution, SolveError> {
    let solver = configured_solver().map_err(ProblemError::from)?;
    fba_with(model, solver.as_ref())
}

/// Flux balance analysis with the given solver
pub fn fba_with(model: &Model, solver: &dyn Solver) -> Result<FluxSolution, SolveError> {
    let network = FlexNet::from_model(model)?;
    let mut objective = Objective::new(ObjectiveSense::Maximize);
    for (reaction_id, coefficient) in &model.objective {
        let forward = forward_channel_id(reaction_id);
        network.require_channel(&forward)?;
        objective.add_linear_term(&forward, *coefficient);
        let backward = backward_channel_id(reaction_id);
        if network.channel(&backward).is_some() {
            objective.add_linear_term(&backward, -coefficient);
        }
    }
    steady_state(&network, &objective, None, solver)
}

/// Errors raised while setting up a steady state analysis
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SolveError {
    #[error(transparent)]
    Network(#[from] NetworkError),
    #[error(transparent)]
    Problem(#[from] ProblemError),
}
