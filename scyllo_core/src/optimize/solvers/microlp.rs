//! Implements a solver interface for the microlp simplex solver
use ::microlp::{
    ComparisonOp, Error as LpError, LinearExpr, OptimizationDirection, Problem as LpProblem,
};
use indexmap::IndexMap;
use tracing::debug;

use crate::optimize::constraint::{Constraint, ConstraintTerm};
use crate::optimize::objective::ObjectiveSense;
use crate::optimize::problem::Problem;
use crate::optimize::solvers::{Solver, SolverError};
use crate::optimize::{OptimizationStatus, ProblemSolution};

/// Pure Rust simplex solver, exact up to floating point error
#[derive(Clone, Copy, Debug, Default)]
pub struct MicrolpSolver;

impl Solver for MicrolpSolver {
    fn name(&self) -> &'static str {
        "microlp"
    }

    fn solve(&self, problem: &Problem) -> Result<ProblemSolution, SolverError> {
        let variables = problem.variables();
        if variables.is_empty() {
            return Err(SolverError::EmptyProblem);
        }
        let index_of = |id: &str| {
            variables
                .get(id)
                .map(|v| v.index())
                .ok_or_else(|| SolverError::UnknownVariable(id.to_string()))
        };

        let direction = match problem.objective().sense() {
            ObjectiveSense::Maximize => OptimizationDirection::Maximize,
            ObjectiveSense::Minimize => OptimizationDirection::Minimize,
        };
        let mut costs = vec![0.; variables.len()];
        for term in problem.objective().terms() {
            costs[index_of(term.variable_id.as_str())?] += term.coefficient;
        }

        let mut lp = LpProblem::new(direction);
        let lp_vars: Vec<_> = variables
            .values()
            .map(|v| lp.add_var(costs[v.index()], (v.lower_bound, v.upper_bound)))
            .collect();

        let expression = |terms: &[ConstraintTerm]| -> Result<LinearExpr, SolverError> {
            let mut expr = LinearExpr::empty();
            for term in terms {
                expr.add(lp_vars[index_of(term.variable_id.as_str())?], term.coefficient);
            }
            Ok(expr)
        };
        for constraint in problem.constraints().values() {
            let terms = constraint.get_terms();
            match constraint {
                Constraint::Equality { equals, .. } => {
                    lp.add_constraint(expression(terms)?, ComparisonOp::Eq, *equals)
                }
                Constraint::Inequality {
                    lower_bound,
                    upper_bound,
                    ..
                } => {
                    if upper_bound.is_finite() {
                        lp.add_constraint(expression(terms)?, ComparisonOp::Le, *upper_bound);
                    }
                    if lower_bound.is_finite() {
                        lp.add_constraint(expression(terms)?, ComparisonOp::Ge, *lower_bound);
                    }
                }
            }
        }

        let solution = match lp.solve() {
            Ok(solution) => solution,
            Err(error) => {
                let status = match error {
                    LpError::Infeasible => OptimizationStatus::Infeasible,
                    LpError::Unbounded => OptimizationStatus::Unbounded,
                    #[allow(unreachable_patterns)]
                    _ => OptimizationStatus::NumericalError,
                };
                debug!(status = %status, "microlp finished without a solution");
                return Ok(ProblemSolution::unsolved(status));
            }
        };
        let variable_values: IndexMap<String, f64> = variables
            .values()
            .map(|v| (v.id.clone(), solution[lp_vars[v.index()]]))
            .collect();
        debug!(objective = solution.objective(), "microlp finished");
        Ok(ProblemSolution {
            status: OptimizationStatus::Optimal,
            objective_value: Some(solution.objective()),
            variable_values: Some(variable_values),
        })
    }
}
