//! This module provides a struct for representing reactions
use crate::configuration::Configuration;
use derive_builder::Builder;
use indexmap::IndexMap;

/// Represents a reaction in the metabolic model
#[derive(Builder, Debug, Clone, PartialEq)]
pub struct Reaction {
    /// Used to identify the reaction
    #[builder(setter(into))]
    pub id: String,
    /// Metabolite stoichiometry of the reaction, negative coefficients are consumed
    #[builder(default = "IndexMap::new()")]
    pub metabolites: IndexMap<String, f64>,
    /// Human-readable reaction name
    #[builder(default = "None", setter(strip_option, into))]
    pub name: Option<String>,
    /// Gene reaction rule, kept as written in the model file
    #[builder(default = "None")]
    pub gene_reaction_rule: Option<String>,
    /// Lower flux bound
    #[builder(default = "Configuration::default_bounds().0")]
    pub lower_bound: f64,
    /// Upper flux bound
    #[builder(default = "Configuration::default_bounds().1")]
    pub upper_bound: f64,
    /// Reaction subsystem
    #[builder(default = "None")]
    pub subsystem: Option<String>,
    /// Notes about the reaction
    #[builder(default = "None")]
    pub notes: Option<String>,
    /// Reaction Annotations
    #[builder(default = "None")]
    pub annotation: Option<String>,
}

impl Reaction {
    /// Whether the reaction is allowed to run backwards
    pub fn is_reversible(&self) -> bool {
        self.lower_bound < 0f64
    }

    /// Block the reaction entirely
    pub fn knock_out(&mut self) {
        self.lower_bound = 0f64;
        self.upper_bound = 0f64;
    }

    /// Determine the upper bound of the forward channel
    pub(crate) fn get_forward_upper_bound(&self) -> f64 {
        self.upper_bound.max(0f64)
    }

    /// Determine the lower bound of the forward channel
    pub(crate) fn get_forward_lower_bound(&self) -> f64 {
        self.lower_bound.max(0f64)
    }

    /// Determine the upper bound of the backward channel
    pub(crate) fn get_backward_upper_bound(&self) -> f64 {
        (-self.lower_bound).max(0f64)
    }

    /// Determine the lower bound of the backward channel
    pub(crate) fn get_backward_lower_bound(&self) -> f64 {
        (-self.upper_bound).max(0f64)
    }
}

/// Channel id of the forward direction of the reaction `reaction_id`
pub fn forward_channel_id(reaction_id: &str) -> String {
    format!("{}_f", reaction_id)
}

/// Channel id of the backward direction of the reaction `reaction_id`
pub fn backward_channel_id(reaction_id: &str) -> String {
    format!("{}_b", reaction_id)
}
