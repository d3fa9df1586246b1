//! Provides the Stock struct, a named quantity in the flow network
use std::fmt::{Display, Formatter};

/// A metabolite pool or enzyme abundance pool
#[derive(Clone, Debug, PartialEq)]
pub struct Stock {
    /// Used to identify the stock, must be unique within a network
    pub id: String,
    /// Amount held by the stock
    ///
    /// Metabolite stocks are balanced at steady state, so this is only meaningful for
    /// enzyme stocks whose level stays constant
    pub level: f64,
    /// What the stock represents
    pub kind: StockKind,
}

/// Kinds of stocks held by the network
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum StockKind {
    /// Produced and consumed by channels, balanced at steady state
    Metabolite,
    /// Read by enzyme handlers only, never consumed
    Enzyme,
}

impl Stock {
    /// Create a metabolite stock with a level of 0
    pub fn metabolite(id: &str) -> Self {
        Stock {
            id: id.to_string(),
            level: 0.,
            kind: StockKind::Metabolite,
        }
    }

    /// Create an enzyme stock with a constant level
    pub fn enzyme(id: &str, level: f64) -> Self {
        Stock {
            id: id.to_string(),
            level,
            kind: StockKind::Enzyme,
        }
    }

    pub fn is_enzyme(&self) -> bool {
        self.kind == StockKind::Enzyme
    }
}

impl Display for Stock {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.kind {
            StockKind::Metabolite => write!(f, "{}", self.id),
            StockKind::Enzyme => write!(f, "{} [{}]", self.id, self.level),
        }
    }
}
