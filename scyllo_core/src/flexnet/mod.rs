//! Flow network representation of a metabolic model
//!
//! Reactions are lowered into directed channels between stocks, enzyme handlers attach
//! catalysis structure to channels, and typed constraints restrict channel rates.
pub mod channel;
pub mod constraint;
pub mod handler;
pub mod lowering;
pub mod steady_state;
pub mod stock;

use indexmap::IndexMap;
use thiserror::Error;

use crate::flexnet::channel::Channel;
use crate::flexnet::constraint::{NetConstraint, NetVariable};
use crate::flexnet::handler::EnzymeHandler;
use crate::flexnet::stock::Stock;

/// A network of stocks connected by channels
#[derive(Clone, Debug, Default)]
pub struct FlexNet {
    /// Map of stock ids to stocks
    stocks: IndexMap<String, Stock>,
    /// Map of channel ids to channels
    channels: IndexMap<String, Channel>,
    /// Map of handler ids to enzyme handlers
    handlers: IndexMap<String, EnzymeHandler>,
    /// Constraints in the order they were added
    constraints: Vec<NetConstraint>,
}

impl FlexNet {
    pub fn new_empty() -> Self {
        FlexNet::default()
    }

    // region Accessors
    pub fn stocks(&self) -> &IndexMap<String, Stock> {
        &self.stocks
    }

    pub fn channels(&self) -> &IndexMap<String, Channel> {
        &self.channels
    }

    pub fn handlers(&self) -> &IndexMap<String, EnzymeHandler> {
        &self.handlers
    }

    pub fn constraints(&self) -> &[NetConstraint] {
        &self.constraints
    }

    pub fn stock(&self, id: &str) -> Option<&Stock> {
        self.stocks.get(id)
    }

    pub fn channel(&self, id: &str) -> Option<&Channel> {
        self.channels.get(id)
    }

    /// Get a channel, failing with [`NetworkError::UnknownChannel`] when it is absent
    pub fn require_channel(&self, id: &str) -> Result<&Channel, NetworkError> {
        self.channels
            .get(id)
            .ok_or_else(|| NetworkError::UnknownChannel(id.to_string()))
    }

    /// Get a stock, failing with [`NetworkError::UnknownStock`] when it is absent
    pub fn require_stock(&self, id: &str) -> Result<&Stock, NetworkError> {
        self.stocks
            .get(id)
            .ok_or_else(|| NetworkError::UnknownStock(id.to_string()))
    }
    // endregion Accessors

    // region Adding Components
    /// Add a stock to the network
    pub fn add_stock(&mut self, stock: Stock) -> Result<(), NetworkError> {
        if self.stocks.contains_key(&stock.id) {
            return Err(NetworkError::DuplicateStock(stock.id));
        }
        self.stocks.insert(stock.id.clone(), stock);
        Ok(())
    }

    /// Add a channel to the network, every stock it touches must already be present
    pub fn add_channel(&mut self, channel: Channel) -> Result<(), NetworkError> {
        if self.channels.contains_key(&channel.id) {
            return Err(NetworkError::DuplicateChannel(channel.id));
        }
        for stock in channel.stoichiometry.keys() {
            self.require_stock(stock)?;
        }
        self.channels.insert(channel.id.clone(), channel);
        Ok(())
    }

    /// Add an enzyme handler, its channel and stocks must already be present
    pub fn add_handler(&mut self, handler: EnzymeHandler) -> Result<(), NetworkError> {
        if self.handlers.contains_key(&handler.id) {
            return Err(NetworkError::DuplicateHandler(handler.id));
        }
        self.require_channel(&handler.channel)?;
        for stock in handler.binding.iter().chain(handler.pool.iter()) {
            self.require_stock(stock)?;
        }
        self.handlers.insert(handler.id.clone(), handler);
        Ok(())
    }

    /// Append a constraint, every variable it uses must refer to a channel or stock of
    /// the network
    pub fn add_constraint(&mut self, constraint: NetConstraint) -> Result<(), NetworkError> {
        if self.constraints.iter().any(|c| c.id == constraint.id) {
            return Err(NetworkError::DuplicateConstraint(constraint.id));
        }
        for term in &constraint.terms {
            match &term.variable {
                NetVariable::Rate(channel) => {
                    self.require_channel(channel)?;
                }
                NetVariable::Level(stock) => {
                    self.require_stock(stock)?;
                }
            }
        }
        self.constraints.push(constraint);
        Ok(())
    }
    // endregion Adding Components
}

/// Errors raised while building or editing a network
#[derive(Error, Debug, Clone, PartialEq)]
pub enum NetworkError {
    #[error("Stock {0} already exists in the network")]
    DuplicateStock(String),
    #[error("Channel {0} already exists in the network")]
    DuplicateChannel(String),
    #[error("Handler {0} already exists in the network")]
    DuplicateHandler(String),
    #[error("Constraint {0} already exists in the network")]
    DuplicateConstraint(String),
    #[error("Stock {0} is not part of the network")]
    UnknownStock(String),
    #[error("Channel {0} is not part of the network")]
    UnknownChannel(String),
}
