//! Solver interfaces used to optimize a [`Problem`]
pub mod clarabel;

use crate::configuration::{Configuration, Solver as ConfiguredSolver};
use crate::optimize::problem::Problem;
use crate::optimize::ProblemSolution;
use thiserror::Error;

cfg_if::cfg_if! {
    if #[cfg(feature = "minilp")] {
        pub mod microlp;

        fn microlp_solver() -> Result<Box<dyn Solver>, SolverError> {
            Ok(Box::new(microlp::MicrolpSolver))
        }
    } else {
        fn microlp_solver() -> Result<Box<dyn Solver>, SolverError> {
            Err(SolverError::Unavailable("microlp (enable the minilp feature)".to_string()))
        }
    }
}

/// A linear programming backend
pub trait Solver {
    /// Short name of the backend, used in logs
    fn name(&self) -> &'static str;

    /// Optimize the problem
    ///
    /// Infeasible and unbounded problems are not errors, they are reported through the
    /// status of the returned [`ProblemSolution`]
    fn solve(&self, problem: &Problem) -> Result<ProblemSolution, SolverError>;
}

/// Create the solver selected in the global configuration
pub fn configured_solver() -> Result<Box<dyn Solver>, SolverError> {
    let (solver, tolerance) = Configuration::solver_settings();
    match solver {
        ConfiguredSolver::Clarabel => Ok(Box::new(clarabel::ClarabelSolver::with_tolerance(
            tolerance,
        ))),
        ConfiguredSolver::Microlp => microlp_solver(),
    }
}

/// Errors raised while handing a problem to a solver
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SolverError {
    /// The problem has no variables
    #[error("Problem has no variables to optimize")]
    EmptyProblem,
    /// A constraint or objective term refers to a variable the problem does not hold
    #[error("Variable {0} is not part of the problem")]
    UnknownVariable(String),
    /// The requested solver was not compiled in
    #[error("Solver {0} is not available")]
    Unavailable(String),
}
