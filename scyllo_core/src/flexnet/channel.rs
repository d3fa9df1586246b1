//! Provides the Channel struct, a directed flow between stocks
use std::fmt::{Display, Formatter};

use indexmap::IndexMap;

use crate::metabolic_model::reaction::{backward_channel_id, forward_channel_id};

/// One direction of a metabolic reaction
#[derive(Clone, Debug, PartialEq)]
pub struct Channel {
    /// Used to identify the channel, `<reaction>_f` or `<reaction>_b`
    pub id: String,
    /// Map of stock ids to signed coefficients, negative for consumed stocks
    pub stoichiometry: IndexMap<String, f64>,
    /// Lower bound on the rate, never negative
    pub lower_bound: f64,
    /// Upper bound on the rate, never negative
    pub upper_bound: f64,
    /// Id of the reaction the channel was lowered from
    pub reaction_id: String,
    /// Which direction of the reaction the channel carries
    pub direction: Direction,
}

/// Direction of a reaction carried by a channel
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Forward,
    Backward,
}

impl Direction {
    /// Id of the channel carrying this direction of `reaction_id`
    pub fn channel_id(&self, reaction_id: &str) -> String {
        match self {
            Direction::Forward => forward_channel_id(reaction_id),
            Direction::Backward => backward_channel_id(reaction_id),
        }
    }

    /// The opposite direction
    pub fn reverse(&self) -> Direction {
        match self {
            Direction::Forward => Direction::Backward,
            Direction::Backward => Direction::Forward,
        }
    }
}

impl Display for Direction {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Direction::Forward => write!(f, "forward"),
            Direction::Backward => write!(f, "backward"),
        }
    }
}

impl Channel {
    /// Create a channel carrying `direction` of the reaction `reaction_id`
    pub fn new(
        reaction_id: &str,
        direction: Direction,
        stoichiometry: IndexMap<String, f64>,
        lower_bound: f64,
        upper_bound: f64,
    ) -> Self {
        Channel {
            id: direction.channel_id(reaction_id),
            stoichiometry,
            lower_bound,
            upper_bound,
            reaction_id: reaction_id.to_string(),
            direction,
        }
    }
}

impl Display for Channel {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let mut consumed = Vec::new();
        let mut produced = Vec::new();
        for (stock, coefficient) in &self.stoichiometry {
            if *coefficient < 0. {
                consumed.push(format!("{} {}", -coefficient, stock));
            } else {
                produced.push(format!("{} {}", coefficient, stock));
            }
        }
        write!(
            f,
            "{}: {} -> {} [{}, {}]",
            self.id,
            consumed.join(" + "),
            produced.join(" + "),
            self.lower_bound,
            self.upper_bound
        )
    }
}
