//! Module providing JSON IO for Models, in the COBRA json layout
use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use crate::metabolic_model::gene::Gene;
use crate::metabolic_model::metabolite::Metabolite;
use crate::metabolic_model::model::{Model, ModelError};
use crate::metabolic_model::reaction::{Reaction, ReactionBuilder, ReactionBuilderError};

// region JSON Model
/// Represents a JSON serialized model, used for reading and writing models in json format
#[derive(Serialize, Deserialize)]
struct JsonModel {
    metabolites: Vec<JsonMetabolite>,
    reactions: Vec<JsonReaction>,
    #[serde(default)]
    genes: Vec<JsonGene>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    compartments: Option<IndexMap<String, String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    version: Option<String>,
}

#[derive(Serialize, Deserialize)]
struct JsonMetabolite {
    id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    compartment: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    charge: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    formula: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    notes: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    annotation: Option<Value>,
}

#[derive(Serialize, Deserialize)]
struct JsonReaction {
    id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    metabolites: IndexMap<String, f64>,
    lower_bound: f64,
    upper_bound: f64,
    #[serde(default)]
    gene_reaction_rule: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    objective_coefficient: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    subsystem: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    notes: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    annotation: Option<Value>,
}

#[derive(Serialize, Deserialize)]
struct JsonGene {
    id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    notes: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    annotation: Option<Value>,
}
// endregion JSON Model

// region Conversions
/// Notes and annotations are free-form, so they are kept as json strings on the model side
fn value_to_string(value: Option<Value>) -> Option<String> {
    value.map(|v| v.to_string())
}

fn string_to_value(string: &Option<String>) -> Option<Value> {
    string
        .as_ref()
        .map(|s| serde_json::from_str(s).unwrap_or_else(|_| Value::String(s.clone())))
}

impl From<JsonGene> for Gene {
    fn from(g: JsonGene) -> Self {
        Self {
            id: g.id,
            name: g.name,
            notes: value_to_string(g.notes),
            annotation: value_to_string(g.annotation),
        }
    }
}

impl From<JsonMetabolite> for Metabolite {
    fn from(m: JsonMetabolite) -> Self {
        Self {
            id: m.id,
            name: m.name,
            compartment: m.compartment,
            charge: m.charge.unwrap_or_default(),
            formula: m.formula,
            notes: value_to_string(m.notes),
            annotation: value_to_string(m.annotation),
        }
    }
}

impl From<&Gene> for JsonGene {
    fn from(g: &Gene) -> Self {
        Self {
            id: g.id.clone(),
            name: g.name.clone(),
            notes: string_to_value(&g.notes),
            annotation: string_to_value(&g.annotation),
        }
    }
}

impl From<&Metabolite> for JsonMetabolite {
    fn from(m: &Metabolite) -> Self {
        Self {
            id: m.id.clone(),
            name: m.name.clone(),
            compartment: m.compartment.clone(),
            charge: Some(m.charge),
            formula: m.formula.clone(),
            notes: string_to_value(&m.notes),
            annotation: string_to_value(&m.annotation),
        }
    }
}

impl Model {
    /// Read a model from a COBRA json file
    pub fn read_json<P: AsRef<Path>>(path: P) -> Result<Model, JsonError> {
        let path = path.as_ref();
        let model_str = match fs::read_to_string(path) {
            Ok(data) => data,
            Err(err) => return Err(JsonError::UnableToRead(format!("{:?}", err))),
        };
        let model = Model::from_json_str(&model_str)?;
        debug!(
            path = %path.display(),
            reactions = model.reactions.len(),
            metabolites = model.metabolites.len(),
            "read json model"
        );
        Ok(model)
    }

    /// Parse a model from a COBRA json string
    pub fn from_json_str(model_str: &str) -> Result<Model, JsonError> {
        let json_model = match serde_json::from_str::<JsonModel>(model_str) {
            Ok(model) => model,
            Err(err) => return Err(JsonError::UnableToParse(format!("{:?}", err))),
        };
        Model::from_json(json_model)
    }

    /// Write the model to a COBRA json file
    pub fn write_json<P: AsRef<Path>>(&self, path: P) -> Result<(), JsonError> {
        let model_string = self.to_json_string()?;
        fs::write(path, model_string)?;
        Ok(())
    }

    /// Serialize the model to a COBRA json string
    pub fn to_json_string(&self) -> Result<String, JsonError> {
        let json_model = self.to_json();
        Ok(serde_json::to_string_pretty(&json_model)?)
    }

    fn from_json(json_model: JsonModel) -> Result<Self, JsonError> {
        let mut model = Model::new_empty();
        model.id = json_model.id;
        model.compartments = json_model.compartments;
        model.version = json_model.version;
        // Start by converting the genes and metabolites using the From methods
        for gene in json_model.genes {
            model.add_gene(Gene::from(gene))?;
        }
        for metabolite in json_model.metabolites {
            model.add_metabolite(Metabolite::from(metabolite))?;
        }
        // Now the reactions, adding to the objective along the way
        for rxn in json_model.reactions {
            let gene_reaction_rule = match rxn.gene_reaction_rule.is_empty() {
                true => None,
                false => Some(rxn.gene_reaction_rule),
            };
            let new_reaction = ReactionBuilder::default()
                .id(rxn.id.clone())
                .metabolites(rxn.metabolites)
                .gene_reaction_rule(gene_reaction_rule)
                .lower_bound(rxn.lower_bound)
                .upper_bound(rxn.upper_bound)
                .subsystem(rxn.subsystem)
                .notes(value_to_string(rxn.notes))
                .annotation(value_to_string(rxn.annotation))
                .build()?;
            model.add_reaction(Reaction {
                name: rxn.name,
                ..new_reaction
            })?;
            // Objective coefficients of 0 are written by some tools for every reaction
            if let Some(coef) = rxn.objective_coefficient.filter(|c| *c != 0.) {
                model.objective.insert(rxn.id, coef);
            }
        }
        Ok(model)
    }

    fn to_json(&self) -> JsonModel {
        let json_genes: Vec<JsonGene> = self.genes.values().map(JsonGene::from).collect();
        let json_metabolites: Vec<JsonMetabolite> =
            self.metabolites.values().map(JsonMetabolite::from).collect();
        let json_reactions: Vec<JsonReaction> = self
            .reactions
            .values()
            .map(|r| JsonReaction {
                id: r.id.clone(),
                name: r.name.clone(),
                metabolites: r.metabolites.clone(),
                lower_bound: r.lower_bound,
                upper_bound: r.upper_bound,
                gene_reaction_rule: r.gene_reaction_rule.clone().unwrap_or_default(),
                objective_coefficient: self.objective.get(&r.id).copied(),
                subsystem: r.subsystem.clone(),
                notes: string_to_value(&r.notes),
                annotation: string_to_value(&r.annotation),
            })
            .collect();

        JsonModel {
            metabolites: json_metabolites,
            reactions: json_reactions,
            genes: json_genes,
            id: self.id.clone(),
            compartments: self.compartments.clone(),
            version: self.version.clone(),
        }
    }
}

#[derive(Error, Debug)]
pub enum JsonError {
    #[error("Unable to read file due to {0}")]
    UnableToRead(String),
    #[error("Unable to parse json due to {0}")]
    UnableToParse(String),
    #[error("Unable to build reaction")]
    UnableToBuildReaction(#[from] ReactionBuilderError),
    #[error(transparent)]
    InvalidModel(#[from] ModelError),
    #[error("Serde json parse error")]
    SerdeJsonParseError(#[from] serde_json::Error),
    #[error("Unable to write to file")]
    UnableToWrite(#[from] std::io::Error),
}

// endregion Conversions

#[cfg(test)]
pub(crate) mod json_tests {
    use super::*;
    use crate::metabolic_model::model::EntityKind;
    use std::path::PathBuf;

    pub(crate) fn toy_model_path() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("test_data")
            .join("test_models")
            .join("toy_bsub.json")
    }

    #[test]
    fn json_metabolite() {
        let data = r#"{
"id":"g6p_c",
"name":"D-Glucose 6-phosphate",
"compartment":"c",
"charge":-2,
"formula":"C6H11O9P",
"annotation":{
"bigg.metabolite":[
"g6p"
],
"kegg.compound":[
"C00092"
]
}
}"#;
        let met: JsonMetabolite = serde_json::from_str(data).unwrap();
        assert_eq!(met.id, "g6p_c");
        assert_eq!(met.charge.unwrap(), -2);
        let model_met = Metabolite::from(met);
        assert_eq!(model_met.name.unwrap(), "D-Glucose 6-phosphate");
        assert_eq!(model_met.compartment.unwrap(), "c");
        assert!(model_met.annotation.unwrap().contains("C00092"));
    }

    #[test]
    fn json_reaction() {
        let data = r#"{
"id":"INSCR",
"name":"2-inosose consuming reaction",
"metabolites":{
"2ins_c":-1.0,
"ru5p__D_c":1.0
},
"lower_bound":0.0,
"upper_bound":1000.0,
"gene_reaction_rule":"BSU39690"
}"#;
        let reaction: JsonReaction = serde_json::from_str(data).unwrap();
        assert_eq!(reaction.id, "INSCR");
        assert!((reaction.metabolites["2ins_c"] + 1.0).abs() < 1e-25);
        assert!((reaction.upper_bound - 1000.0).abs() < 1e-25);
        assert!(reaction.objective_coefficient.is_none());
        assert!(reaction.subsystem.is_none());
    }

    #[test]
    fn read_json() {
        let model = Model::read_json(toy_model_path()).unwrap();
        assert_eq!(model.id.as_deref(), Some("toy_bsub"));
        assert_eq!(model.version.as_deref(), Some("1"));
        assert_eq!(model.metabolites.len(), 10);
        assert_eq!(model.reactions.len(), 9);
        assert_eq!(model.genes.len(), 7);

        let (_, met) = model.metabolites.first().unwrap();
        assert_eq!(met.id, "glc__D_e");
        assert_eq!(met.formula.as_deref(), Some("C6H12O6"));

        let pgi = &model.reactions["PGI"];
        assert_eq!(pgi.name.as_deref(), Some("Glucose-6-phosphate isomerase"));
        assert!((pgi.lower_bound + 1000.).abs() < 1e-25);
        assert_eq!(pgi.gene_reaction_rule.as_deref(), Some("BSU31350"));
        assert!(model.reactions["EX_glc__D_e"].gene_reaction_rule.is_none());

        assert_eq!(model.objective.len(), 1);
        assert!((model.objective["BIOMASS_BS_10"] - 1.0).abs() < 1e-25);

        let mut expected_compartments: IndexMap<String, String> = IndexMap::new();
        expected_compartments.insert("c".to_string(), "cytosol".to_string());
        expected_compartments.insert("e".to_string(), "extracellular space".to_string());
        assert_eq!(model.compartments.clone().unwrap(), expected_compartments);
    }

    #[test]
    fn missing_file() {
        let res = Model::read_json("no/such/model.json");
        assert!(matches!(res, Err(JsonError::UnableToRead(_))));
    }

    #[test]
    fn malformed_json() {
        let res = Model::from_json_str(r#"{"metabolites": [], "reactions": [{"id": "R"}]}"#);
        assert!(matches!(res, Err(JsonError::UnableToParse(_))));
    }

    #[test]
    fn duplicate_ids() {
        let res = Model::from_json_str(
            r#"{"metabolites": [{"id": "g6p_c"}, {"id": "g6p_c"}], "reactions": []}"#,
        );
        assert!(matches!(
            res,
            Err(JsonError::InvalidModel(ModelError::DuplicateEntity {
                kind: EntityKind::Metabolite,
                ref id,
            })) if id == "g6p_c"
        ));
        let res = Model::from_json_str(
            r#"{"metabolites": [], "reactions": [
                {"id": "R", "metabolites": {}, "lower_bound": 0.0, "upper_bound": 1.0},
                {"id": "R", "metabolites": {}, "lower_bound": -1.0, "upper_bound": 1.0}
            ]}"#,
        );
        assert!(matches!(
            res,
            Err(JsonError::InvalidModel(ModelError::DuplicateEntity {
                kind: EntityKind::Reaction,
                ..
            }))
        ));
        let res = Model::from_json_str(
            r#"{"metabolites": [], "reactions": [], "genes": [{"id": "BSU1"}, {"id": "BSU1"}]}"#,
        );
        assert!(matches!(
            res,
            Err(JsonError::InvalidModel(ModelError::DuplicateEntity {
                kind: EntityKind::Gene,
                ..
            }))
        ));
    }

    #[test]
    fn write_then_read() {
        let model = Model::read_json(toy_model_path()).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let out_path = dir.path().join("toy_copy.json");
        model.write_json(&out_path).unwrap();
        let reread = Model::read_json(&out_path).unwrap();

        assert_eq!(reread.id, model.id);
        assert_eq!(reread.compartments, model.compartments);
        assert_eq!(
            reread.reactions.keys().collect::<Vec<_>>(),
            model.reactions.keys().collect::<Vec<_>>()
        );
        for (id, rxn) in &model.reactions {
            assert_eq!(&reread.reactions[id], rxn);
        }
        assert_eq!(reread.objective, model.objective);
        assert_eq!(reread.genes, model.genes);
    }
}
