use std::sync::{LazyLock, RwLock};

/// Global defaults read when models, networks, and solvers are created
pub static CONFIGURATION: LazyLock<RwLock<Configuration>> =
    LazyLock::new(|| RwLock::new(Configuration::default()));

pub struct Configuration {
    /// Lower flux bound given to reactions which don't specify one
    pub lower_bound: f64,
    /// Upper flux bound given to reactions which don't specify one
    pub upper_bound: f64,
    /// Feasibility/optimality tolerance handed to the solver
    pub tolerance: f64,
    /// Solver used for steady state analysis
    pub solver: Solver,
}

impl Default for Configuration {
    fn default() -> Self {
        Configuration {
            lower_bound: -1000.,
            upper_bound: 1000.,
            tolerance: 1e-08,
            solver: Solver::default(),
        }
    }
}

impl Configuration {
    /// Read a copy of the default reaction bounds, falling back to the built-in values if
    /// the lock was poisoned
    pub(crate) fn default_bounds() -> (f64, f64) {
        match CONFIGURATION.read() {
            Ok(config) => (config.lower_bound, config.upper_bound),
            Err(_) => {
                let config = Configuration::default();
                (config.lower_bound, config.upper_bound)
            }
        }
    }

    /// Read the configured solver and tolerance
    pub(crate) fn solver_settings() -> (Solver, f64) {
        match CONFIGURATION.read() {
            Ok(config) => (config.solver, config.tolerance),
            Err(_) => {
                let config = Configuration::default();
                (config.solver, config.tolerance)
            }
        }
    }
}

/// Enum used to specify the default solver to use
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum Solver {
    /// Use the Clarabel interior point solver
    #[default]
    Clarabel,
    /// Use the microlp simplex solver, requires the minilp feature to be enabled
    Microlp,
}
