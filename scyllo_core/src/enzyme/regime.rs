//! Constraint regimes selecting which enzyme constraints are applied
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use thiserror::Error;

/// Combination of enzyme constraint shapes applied to the whole catalogue
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub enum Regime {
    /// Per-reaction capacity bounds (GECKO) and total enzyme pool bounds (sMOMENT)
    #[default]
    Full,
    /// Per-reaction capacity bounds only
    CapacityOnly,
    /// Total enzyme pool bounds only
    PoolOnly,
    /// No enzyme constraints
    Unconstrained,
}

impl Regime {
    pub const ALL: [Regime; 4] = [
        Regime::Full,
        Regime::CapacityOnly,
        Regime::PoolOnly,
        Regime::Unconstrained,
    ];

    /// Whether the total enzyme stock and pool aware bounds are used
    pub fn uses_pool(&self) -> bool {
        matches!(self, Regime::Full | Regime::PoolOnly)
    }

    /// Whether per-reaction enzyme stocks and capacity bounds are used
    pub fn uses_capacity(&self) -> bool {
        matches!(self, Regime::Full | Regime::CapacityOnly)
    }

    /// Whether reversible catalogue entries are locked to their catalyzed direction
    pub fn locks_directions(&self) -> bool {
        *self != Regime::Unconstrained
    }

    /// Human readable summary of the constraints applied
    ///
    /// `uptake_constrained` adds the glucose uptake rate to the summary, it is used when
    /// the uptake bound differs from its default.
    pub fn summary(&self, uptake_constrained: bool) -> String {
        let label = match self {
            Regime::Full => "GECKO+sMOMENT",
            Regime::CapacityOnly => "GECKO",
            Regime::PoolOnly => "sMOMENT",
            Regime::Unconstrained => return "No enzymatic constraints".to_string(),
        };
        match uptake_constrained {
            true => format!("{}+glucose uptake rate constraints", label),
            false => format!("{} constraints", label),
        }
    }
}

impl FromStr for Regime {
    type Err = InvalidRegimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "full" | "g+s" => Ok(Regime::Full),
            "capacity-only" | "gecko-only" | "g" => Ok(Regime::CapacityOnly),
            "pool-only" | "smoment-only" | "s" => Ok(Regime::PoolOnly),
            "none" | "n" => Ok(Regime::Unconstrained),
            _ => Err(InvalidRegimeError(s.to_string())),
        }
    }
}

impl Display for Regime {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let token = match self {
            Regime::Full => "full",
            Regime::CapacityOnly => "capacity-only",
            Regime::PoolOnly => "pool-only",
            Regime::Unconstrained => "none",
        };
        write!(f, "{}", token)
    }
}

/// Error for a regime token that names no regime
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error(
    "Invalid regime {0}, expected one of full (g+s), capacity-only (gecko-only, g), \
     pool-only (smoment-only, s), none (n)"
)]
pub struct InvalidRegimeError(pub String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_tokens() {
        assert_eq!("full".parse::<Regime>(), Ok(Regime::Full));
        assert_eq!("g+s".parse::<Regime>(), Ok(Regime::Full));
        assert_eq!("gecko-only".parse::<Regime>(), Ok(Regime::CapacityOnly));
        assert_eq!("g".parse::<Regime>(), Ok(Regime::CapacityOnly));
        assert_eq!("sMOMENT-only".parse::<Regime>(), Ok(Regime::PoolOnly));
        assert_eq!("s".parse::<Regime>(), Ok(Regime::PoolOnly));
        assert_eq!("n".parse::<Regime>(), Ok(Regime::Unconstrained));
        for regime in Regime::ALL {
            assert_eq!(regime.to_string().parse::<Regime>(), Ok(regime));
        }
    }

    #[test]
    fn invalid_token() {
        assert_eq!(
            "gecko+pool".parse::<Regime>(),
            Err(InvalidRegimeError("gecko+pool".to_string()))
        );
        assert!("".parse::<Regime>().is_err());
    }

    #[test]
    fn summaries() {
        assert_eq!(Regime::Full.summary(false), "GECKO+sMOMENT constraints");
        assert_eq!(
            Regime::CapacityOnly.summary(true),
            "GECKO+glucose uptake rate constraints"
        );
        assert_eq!(Regime::PoolOnly.summary(false), "sMOMENT constraints");
        assert_eq!(Regime::Unconstrained.summary(true), "No enzymatic constraints");
    }

    #[test]
    fn flags() {
        assert!(Regime::Full.uses_pool() && Regime::Full.uses_capacity());
        assert!(!Regime::CapacityOnly.uses_pool());
        assert!(!Regime::PoolOnly.uses_capacity());
        assert!(!Regime::Unconstrained.locks_directions());
        assert!(Regime::PoolOnly.locks_directions());
    }
}
