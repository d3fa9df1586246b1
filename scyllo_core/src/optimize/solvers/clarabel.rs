//! Implements a solver interface for Clarabel
//!
//! Clarabel solves `min q'x` subject to `Ax + s = b` with `s` in a product of cones, so
//! equalities become zero cone rows and everything else (variable bounds included) becomes
//! a nonnegative cone row of the form `a'x <= b`.
use ::clarabel::algebra::CscMatrix;
use ::clarabel::solver::*;
use indexmap::IndexMap;
use nalgebra_sparse::CooMatrix;
use tracing::debug;

use crate::optimize::constraint::Constraint;
use crate::optimize::objective::ObjectiveSense;
use crate::optimize::problem::Problem;
use crate::optimize::solvers::{Solver, SolverError};
use crate::optimize::{OptimizationStatus, ProblemSolution};

/// Clarabel interior point solver
#[derive(Clone, Debug)]
pub struct ClarabelSolver {
    tolerance: f64,
    max_iter: u32,
}

impl Default for ClarabelSolver {
    fn default() -> Self {
        ClarabelSolver {
            tolerance: 1e-8,
            max_iter: 200,
        }
    }
}

impl ClarabelSolver {
    pub fn with_tolerance(tolerance: f64) -> Self {
        ClarabelSolver {
            tolerance,
            ..ClarabelSolver::default()
        }
    }
}

/// Rows of the form `terms (=|<=) rhs`
#[derive(Default)]
struct Rows {
    terms: Vec<Vec<(usize, f64)>>,
    rhs: Vec<f64>,
}

impl Rows {
    fn push(&mut self, terms: Vec<(usize, f64)>, rhs: f64) {
        self.terms.push(terms);
        self.rhs.push(rhs);
    }

    fn len(&self) -> usize {
        self.rhs.len()
    }
}

impl Solver for ClarabelSolver {
    fn name(&self) -> &'static str {
        "clarabel"
    }

    fn solve(&self, problem: &Problem) -> Result<ProblemSolution, SolverError> {
        let variables = problem.variables();
        let n = variables.len();
        if n == 0 {
            return Err(SolverError::EmptyProblem);
        }
        let index_of = |id: &str| {
            variables
                .get(id)
                .map(|v| v.index())
                .ok_or_else(|| SolverError::UnknownVariable(id.to_string()))
        };

        let mut zero_rows = Rows::default();
        let mut nonneg_rows = Rows::default();
        for var in variables.values() {
            let j = var.index();
            if var.is_fixed() {
                zero_rows.push(vec![(j, 1.)], var.lower_bound);
                continue;
            }
            if var.upper_bound.is_finite() {
                nonneg_rows.push(vec![(j, 1.)], var.upper_bound);
            }
            if var.lower_bound.is_finite() {
                nonneg_rows.push(vec![(j, -1.)], -var.lower_bound);
            }
        }
        for constraint in problem.constraints().values() {
            let terms = constraint
                .get_terms()
                .iter()
                .map(|t| Ok((index_of(t.variable_id.as_str())?, t.coefficient)))
                .collect::<Result<Vec<_>, SolverError>>()?;
            if terms.is_empty() {
                // A row without terms reduces to 0 (=|<=) rhs
                if !empty_row_satisfied(constraint) {
                    debug!(constraint = constraint.get_id(), "empty constraint is violated");
                    return Ok(ProblemSolution::unsolved(OptimizationStatus::Infeasible));
                }
                continue;
            }
            match constraint {
                Constraint::Equality { equals, .. } => zero_rows.push(terms, *equals),
                Constraint::Inequality {
                    lower_bound,
                    upper_bound,
                    ..
                } => {
                    if lower_bound == upper_bound {
                        zero_rows.push(terms, *upper_bound);
                        continue;
                    }
                    if upper_bound.is_finite() {
                        nonneg_rows.push(terms.clone(), *upper_bound);
                    }
                    if lower_bound.is_finite() {
                        let negated = terms.iter().map(|(j, c)| (*j, -c)).collect();
                        nonneg_rows.push(negated, -lower_bound);
                    }
                }
            }
        }

        // Assemble A through a COO matrix, which sums repeated entries
        let m = zero_rows.len() + nonneg_rows.len();
        let mut coo = CooMatrix::new(m, n);
        for (i, row) in zero_rows.terms.iter().chain(&nonneg_rows.terms).enumerate() {
            for (j, coefficient) in row {
                coo.push(i, *j, *coefficient);
            }
        }
        let (col_offsets, row_indices, values) =
            nalgebra_sparse::CscMatrix::from(&coo).disassemble();
        let a = CscMatrix::new(m, n, col_offsets, row_indices, values);
        let b: Vec<f64> = zero_rows.rhs.iter().chain(&nonneg_rows.rhs).copied().collect();
        let p = CscMatrix::<f64>::zeros((n, n));

        // Clarabel minimizes, so maximization flips the sign of the linear cost
        let sign = match problem.objective().sense() {
            ObjectiveSense::Minimize => 1.,
            ObjectiveSense::Maximize => -1.,
        };
        let mut q = vec![0.; n];
        for term in problem.objective().terms() {
            q[index_of(term.variable_id.as_str())?] += sign * term.coefficient;
        }

        let mut cones: Vec<SupportedConeT<f64>> = Vec::new();
        if zero_rows.len() > 0 {
            cones.push(SupportedConeT::ZeroConeT(zero_rows.len()));
        }
        if nonneg_rows.len() > 0 {
            cones.push(SupportedConeT::NonnegativeConeT(nonneg_rows.len()));
        }

        let settings = DefaultSettings::<f64> {
            verbose: false,
            max_iter: self.max_iter,
            tol_gap_abs: self.tolerance,
            tol_gap_rel: self.tolerance,
            tol_feas: self.tolerance,
            ..DefaultSettings::default()
        };
        let mut solver = DefaultSolver::new(&p, &q, &a, &b, &cones, settings);
        solver.solve();

        let status = convert_status(solver.solution.status);
        debug!(
            status = %status,
            rows = m,
            "clarabel finished"
        );
        if !status.has_solution() {
            return Ok(ProblemSolution::unsolved(status));
        }
        let variable_values: IndexMap<String, f64> = variables
            .values()
            .map(|v| (v.id.clone(), solver.solution.x[v.index()]))
            .collect();
        let objective_value = problem
            .objective()
            .evaluate(|id| variable_values.get(id).copied().unwrap_or_default());
        Ok(ProblemSolution {
            status,
            objective_value: Some(objective_value),
            variable_values: Some(variable_values),
        })
    }
}

fn empty_row_satisfied(constraint: &Constraint) -> bool {
    match constraint {
        Constraint::Equality { equals, .. } => *equals == 0.,
        Constraint::Inequality {
            lower_bound,
            upper_bound,
            ..
        } => *lower_bound <= 0. && *upper_bound >= 0.,
    }
}

fn convert_status(status: SolverStatus) -> OptimizationStatus {
    match status {
        SolverStatus::Solved => OptimizationStatus::Optimal,
        SolverStatus::AlmostSolved => OptimizationStatus::AlmostOptimal,
        SolverStatus::PrimalInfeasible | SolverStatus::AlmostPrimalInfeasible => {
            OptimizationStatus::Infeasible
        }
        // Dual infeasibility certifies an unbounded primal
        SolverStatus::DualInfeasible | SolverStatus::AlmostDualInfeasible => {
            OptimizationStatus::Unbounded
        }
        SolverStatus::NumericalError => OptimizationStatus::NumericalError,
        SolverStatus::Unsolved => OptimizationStatus::Unoptimized,
        _ => OptimizationStatus::SolverHalted,
    }
}
