//! Typed linear constraints over channel rates and stock levels
use std::fmt::{Display, Formatter};

/// A variable of the network seen by the optimizer
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum NetVariable {
    /// Rate of a channel
    Rate(String),
    /// Level of a stock
    Level(String),
}

impl NetVariable {
    /// Id of the optimization variable standing for this network variable
    ///
    /// Rates use the channel id, levels use `level[<stock>]`
    pub fn variable_id(&self) -> String {
        match self {
            NetVariable::Rate(channel) => channel.clone(),
            NetVariable::Level(stock) => level_variable_id(stock),
        }
    }
}

/// Id of the optimization variable holding the level of `stock`
pub fn level_variable_id(stock: &str) -> String {
    format!("level[{}]", stock)
}

impl Display for NetVariable {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            NetVariable::Rate(channel) => write!(f, "rate({})", channel),
            NetVariable::Level(stock) => write!(f, "level({})", stock),
        }
    }
}

/// Relation between the left hand side and the right hand side of a constraint
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Relation {
    LessEqual,
    GreaterEqual,
    Equal,
}

impl Display for Relation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Relation::LessEqual => write!(f, "<="),
            Relation::GreaterEqual => write!(f, ">="),
            Relation::Equal => write!(f, "=="),
        }
    }
}

/// Shape of a network constraint
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ConstraintKind {
    /// `rate <= kcat * ea`
    Capacity,
    /// `rate - kcat / mw * level(E_total) <= 0`
    PoolCapacity,
    /// `rate >= kcat * ea`
    ObligatoryFlux,
    /// `rate == 0` on the unused direction of a reversible reaction
    DirectionLock,
    /// `rate(growth) == growth_rate`
    GrowthFix,
    /// `rate(uptake) <= uptake_bound`
    UptakeBound,
}

impl ConstraintKind {
    /// Prefix of the ids of constraints of this kind
    pub fn prefix(&self) -> &'static str {
        match self {
            ConstraintKind::Capacity => "cap",
            ConstraintKind::PoolCapacity => "pool",
            ConstraintKind::ObligatoryFlux => "oblig",
            ConstraintKind::DirectionLock => "lock",
            ConstraintKind::GrowthFix => "growth",
            ConstraintKind::UptakeBound => "uptake",
        }
    }

    /// Deterministic id of the constraint of this kind on `channel`
    pub fn constraint_id(&self, channel: &str) -> String {
        format!("{}_{}", self.prefix(), channel)
    }
}

/// A coefficient applied to a network variable
#[derive(Clone, Debug, PartialEq)]
pub struct NetTerm {
    pub variable: NetVariable,
    pub coefficient: f64,
}

impl NetTerm {
    pub fn rate(channel: &str, coefficient: f64) -> Self {
        NetTerm {
            variable: NetVariable::Rate(channel.to_string()),
            coefficient,
        }
    }

    pub fn level(stock: &str, coefficient: f64) -> Self {
        NetTerm {
            variable: NetVariable::Level(stock.to_string()),
            coefficient,
        }
    }
}

/// A linear constraint of the network: `Σ terms (relation) rhs`
#[derive(Clone, Debug, PartialEq)]
pub struct NetConstraint {
    pub id: String,
    pub kind: ConstraintKind,
    pub terms: Vec<NetTerm>,
    pub relation: Relation,
    pub rhs: f64,
}

impl NetConstraint {
    /// Create a constraint on the rate of a single channel, with an id derived from the
    /// kind and the channel
    pub fn on_rate(kind: ConstraintKind, channel: &str, relation: Relation, rhs: f64) -> Self {
        NetConstraint {
            id: kind.constraint_id(channel),
            kind,
            terms: vec![NetTerm::rate(channel, 1.)],
            relation,
            rhs,
        }
    }

    /// The pool aware capacity bound `rate(channel) - coefficient * level(pool) <= 0`
    pub fn pool_capacity(channel: &str, pool: &str, coefficient: f64) -> Self {
        let kind = ConstraintKind::PoolCapacity;
        NetConstraint {
            id: kind.constraint_id(channel),
            kind,
            terms: vec![NetTerm::rate(channel, 1.), NetTerm::level(pool, -coefficient)],
            relation: Relation::LessEqual,
            rhs: 0.,
        }
    }

    /// Whether `variable` is one of the terms of the constraint
    pub fn involves(&self, variable: &NetVariable) -> bool {
        self.terms.iter().any(|t| &t.variable == variable)
    }

    /// Coefficient of `variable`, 0 when it is absent
    pub fn coefficient(&self, variable: &NetVariable) -> f64 {
        self.terms
            .iter()
            .filter(|t| &t.variable == variable)
            .map(|t| t.coefficient)
            .sum()
    }
}

impl Display for NetConstraint {
    /// Display a constraint
    ///
    /// # Examples
    /// ```rust
    /// use scyllo_core::flexnet::constraint::NetConstraint;
    /// let constraint = NetConstraint::pool_capacity("R1_f", "E_total", 2.);
    /// assert_eq!(format!("{}", constraint), "pool_R1_f: rate(R1_f) - 2*level(E_total) <= 0");
    /// ```
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let mut lhs = String::new();
        for (i, term) in self.terms.iter().enumerate() {
            let magnitude = term.coefficient.abs();
            let sign = match (i, term.coefficient < 0.) {
                (0, true) => "-",
                (0, false) => "",
                (_, true) => " - ",
                (_, false) => " + ",
            };
            lhs.push_str(sign);
            if magnitude != 1. {
                lhs.push_str(&format!("{}*", magnitude));
            }
            lhs.push_str(&term.variable.to_string());
        }
        write!(f, "{}: {} {} {}", self.id, lhs, self.relation, self.rhs)
    }
}
