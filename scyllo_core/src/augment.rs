//! Extends a metabolic model with a production pathway
use indexmap::{IndexMap, IndexSet};
use tracing::info;

use crate::metabolic_model::metabolite::Metabolite;
use crate::metabolic_model::model::{EntityKind, Model, ModelError};
use crate::metabolic_model::reaction::Reaction;

/// Changes applied to a model by [`augment`]
#[derive(Clone, Debug, PartialEq)]
pub struct AugmentationPlan {
    /// Metabolites added to the model
    pub metabolites: Vec<Metabolite>,
    /// Reactions added to the model
    pub reactions: Vec<Reaction>,
    /// Reactions whose bounds are set to 0
    pub knockouts: Vec<String>,
    /// Reaction whose lower bound is widened, and the new lower bound
    pub uptake: Option<(String, f64)>,
    /// Reaction made the sole objective of the model
    pub objective: String,
}

impl AugmentationPlan {
    /// The scyllo-inositol pathway for iYO844
    ///
    /// Adds scyllo-inositol (`scino_c`) with its synthesis from glucose 6-phosphate through
    /// myo-inositol 1-phosphate and 2-inosose, and an exchange reaction for it. `INSCR` is
    /// knocked out, glucose uptake is allowed up to 100 and `scino_synthesis` becomes the
    /// objective.
    pub fn scyllo_inositol() -> Self {
        AugmentationPlan {
            metabolites: vec![Metabolite {
                id: "scino_c".to_string(),
                name: Some("scyllo-inositol".to_string()),
                compartment: Some("c".to_string()),
                charge: 0,
                formula: None,
                notes: None,
                annotation: None,
            }],
            reactions: vec![
                pathway_reaction(
                    "MI1P_synthesis",
                    "Synthesis of myo-inositol-1-phosphate",
                    &[("g6p_c", -1.), ("mi1p__D_c", 1.)],
                ),
                pathway_reaction(
                    "scino_synthesis",
                    "Synthesis of scyllo-inositol",
                    &[
                        ("2ins_c", -1.),
                        ("scino_c", 1.),
                        ("nadph_c", -1.),
                        ("nadp_c", 1.),
                        ("h_c", -1.),
                    ],
                ),
                pathway_reaction(
                    "EX_scino",
                    "Exchange reaction to allow scyllo-inositol to leave the system",
                    &[("scino_c", -1.)],
                ),
            ],
            knockouts: vec!["INSCR".to_string()],
            uptake: Some(("EX_glc__D_e".to_string(), -100.)),
            objective: "scino_synthesis".to_string(),
        }
    }
}

/// An irreversible reaction with bounds [0, 1000]
fn pathway_reaction(id: &str, name: &str, stoichiometry: &[(&str, f64)]) -> Reaction {
    Reaction {
        id: id.to_string(),
        metabolites: stoichiometry
            .iter()
            .map(|(met, coefficient)| (met.to_string(), *coefficient))
            .collect::<IndexMap<String, f64>>(),
        name: Some(name.to_string()),
        gene_reaction_rule: None,
        lower_bound: 0.,
        upper_bound: 1000.,
        subsystem: None,
        notes: None,
        annotation: None,
    }
}

/// Apply `plan` to a copy of `base`
///
/// Every reference made by the plan is checked before anything changes, so a failure
/// leaves no partially augmented model behind.
///
/// # Errors
/// [`ModelError::MissingEntity`] when a new reaction uses an unknown metabolite, or a
/// knockout, uptake or objective reaction doesn't exist; [`ModelError::DuplicateEntity`]
/// when a new metabolite or reaction id is already taken
pub fn augment(base: &Model, plan: &AugmentationPlan) -> Result<Model, ModelError> {
    validate(base, plan)?;

    let mut model = base.clone();
    for metabolite in &plan.metabolites {
        model.add_metabolite(metabolite.clone())?;
    }
    for reaction in &plan.reactions {
        model.add_reaction(reaction.clone())?;
    }
    for knockout in &plan.knockouts {
        model.knock_out(knockout)?;
    }
    if let Some((reaction_id, lower_bound)) = &plan.uptake {
        model.set_lower_bound(reaction_id, *lower_bound)?;
    }
    model.set_objective(&plan.objective)?;
    info!(
        metabolites = plan.metabolites.len(),
        reactions = plan.reactions.len(),
        knockouts = plan.knockouts.len(),
        objective = %plan.objective,
        "augmented model"
    );
    Ok(model)
}

fn validate(base: &Model, plan: &AugmentationPlan) -> Result<(), ModelError> {
    let mut new_metabolites = IndexSet::new();
    for metabolite in &plan.metabolites {
        if base.metabolites.contains_key(&metabolite.id)
            || !new_metabolites.insert(metabolite.id.as_str())
        {
            return Err(ModelError::DuplicateEntity {
                kind: EntityKind::Metabolite,
                id: metabolite.id.clone(),
            });
        }
    }
    let mut new_reactions = IndexSet::new();
    for reaction in &plan.reactions {
        if base.reactions.contains_key(&reaction.id)
            || !new_reactions.insert(reaction.id.as_str())
        {
            return Err(ModelError::DuplicateEntity {
                kind: EntityKind::Reaction,
                id: reaction.id.clone(),
            });
        }
        for metabolite in reaction.metabolites.keys() {
            if !new_metabolites.contains(metabolite.as_str()) {
                base.require_metabolite(metabolite)?;
            }
        }
    }
    let require_reaction = |id: &str| match new_reactions.contains(id) {
        true => Ok(()),
        false => base.require_reaction(id),
    };
    for knockout in &plan.knockouts {
        require_reaction(knockout)?;
    }
    if let Some((reaction_id, _)) = &plan.uptake {
        require_reaction(reaction_id)?;
    }
    require_reaction(&plan.objective)
}
