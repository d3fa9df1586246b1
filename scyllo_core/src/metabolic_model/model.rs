//! This module provides the Model struct for representing an entire metabolic model
use std::fmt::{Display, Formatter};

use crate::metabolic_model::gene::Gene;
use crate::metabolic_model::metabolite::Metabolite;
use crate::metabolic_model::reaction::Reaction;

use indexmap::IndexMap;
use thiserror::Error;

/// Represents a Genome Scale Metabolic Model
#[derive(Clone, Debug, PartialEq)]
pub struct Model {
    /// Map of reaction ids to Reaction Objects
    pub reactions: IndexMap<String, Reaction>,
    /// Map of gene ids to Gene Objects
    pub genes: IndexMap<String, Gene>,
    /// Map of metabolite ids to Metabolite Objects
    pub metabolites: IndexMap<String, Metabolite>,
    /// Map of reaction ids to objective function coefficients
    pub objective: IndexMap<String, f64>,
    /// Id associated with the Model
    pub id: Option<String>,
    /// Compartments in the model
    ///
    /// An IndexMap<String, String> of {short name: long name}
    pub compartments: Option<IndexMap<String, String>>,
    /// A version identifier for the Model, stored as a string
    pub version: Option<String>,
}

impl Model {
    pub fn new_empty() -> Self {
        Model {
            reactions: IndexMap::new(),
            genes: IndexMap::new(),
            metabolites: IndexMap::new(),
            objective: IndexMap::new(),
            id: None,
            compartments: None,
            version: None,
        }
    }

    /// Add a reaction to the model
    ///
    /// # Parameters
    /// - reaction: Reaction to add
    ///
    /// # Errors
    /// [`ModelError::DuplicateEntity`] if a reaction with the same id is already present
    ///
    /// # Examples
    /// ```rust
    /// use scyllo_core::metabolic_model::model::Model;
    /// use scyllo_core::metabolic_model::reaction::ReactionBuilder;
    /// let mut model = Model::new_empty();
    /// let new_reaction = ReactionBuilder::default().id("new_reaction").build().unwrap();
    /// model.add_reaction(new_reaction).unwrap();
    /// ```
    pub fn add_reaction(&mut self, reaction: Reaction) -> Result<(), ModelError> {
        if self.reactions.contains_key(&reaction.id) {
            return Err(ModelError::DuplicateEntity {
                kind: EntityKind::Reaction,
                id: reaction.id,
            });
        }
        let id = reaction.id.clone();
        self.reactions.insert(id, reaction);
        Ok(())
    }

    /// Add a metabolite to the model
    ///
    /// # Errors
    /// [`ModelError::DuplicateEntity`] if a metabolite with the same id is already present
    pub fn add_metabolite(&mut self, metabolite: Metabolite) -> Result<(), ModelError> {
        if self.metabolites.contains_key(&metabolite.id) {
            return Err(ModelError::DuplicateEntity {
                kind: EntityKind::Metabolite,
                id: metabolite.id,
            });
        }
        let id = metabolite.id.clone();
        self.metabolites.insert(id, metabolite);
        Ok(())
    }

    /// Add a gene to the model
    ///
    /// # Errors
    /// [`ModelError::DuplicateEntity`] if a gene with the same id is already present
    pub fn add_gene(&mut self, gene: Gene) -> Result<(), ModelError> {
        if self.genes.contains_key(&gene.id) {
            return Err(ModelError::DuplicateEntity {
                kind: EntityKind::Gene,
                id: gene.id,
            });
        }
        let id = gene.id.clone();
        self.genes.insert(id, gene);
        Ok(())
    }

    /// Get a mutable reference to a reaction
    pub fn reaction_mut(&mut self, id: &str) -> Result<&mut Reaction, ModelError> {
        self.reactions
            .get_mut(id)
            .ok_or_else(|| ModelError::missing(EntityKind::Reaction, id))
    }

    /// Set both flux bounds of a reaction to 0
    pub fn knock_out(&mut self, id: &str) -> Result<(), ModelError> {
        self.reaction_mut(id)?.knock_out();
        Ok(())
    }

    /// Update the lower flux bound of a reaction
    pub fn set_lower_bound(&mut self, id: &str, lower_bound: f64) -> Result<(), ModelError> {
        self.reaction_mut(id)?.lower_bound = lower_bound;
        Ok(())
    }

    /// Make `reaction_id` the sole objective of the model, with a coefficient of 1
    pub fn set_objective(&mut self, reaction_id: &str) -> Result<(), ModelError> {
        if !self.reactions.contains_key(reaction_id) {
            return Err(ModelError::missing(EntityKind::Reaction, reaction_id));
        }
        self.objective.clear();
        self.objective.insert(reaction_id.to_string(), 1.0);
        Ok(())
    }

    /// Check that a metabolite is present
    pub fn require_metabolite(&self, id: &str) -> Result<(), ModelError> {
        match self.metabolites.contains_key(id) {
            true => Ok(()),
            false => Err(ModelError::missing(EntityKind::Metabolite, id)),
        }
    }

    /// Check that a reaction is present
    pub fn require_reaction(&self, id: &str) -> Result<(), ModelError> {
        match self.reactions.contains_key(id) {
            true => Ok(()),
            false => Err(ModelError::missing(EntityKind::Reaction, id)),
        }
    }
}

/// Kind of model entity, used for error reporting
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum EntityKind {
    Metabolite,
    Reaction,
    Gene,
}

impl Display for EntityKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            EntityKind::Metabolite => write!(f, "metabolite"),
            EntityKind::Reaction => write!(f, "reaction"),
            EntityKind::Gene => write!(f, "gene"),
        }
    }
}

/// Errors associated with editing a Model
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModelError {
    /// A referenced metabolite or reaction is not in the model
    #[error("The {kind} {id} is not present in the model")]
    MissingEntity { kind: EntityKind, id: String },
    /// Tried to add an entity whose id is already taken
    #[error("The {kind} {id} is already present in the model")]
    DuplicateEntity { kind: EntityKind, id: String },
}

impl ModelError {
    fn missing(kind: EntityKind, id: &str) -> Self {
        ModelError::MissingEntity {
            kind,
            id: id.to_string(),
        }
    }
}
