//! Kinetic parameters of the enzymes constraining the network
//!
//! A catalogue is read from a JSON table of the form
//! ```json
//! {
//!   "total_enzyme": 0.01067,
//!   "reactions": {
//!     "G6PDH2r": {"class": "forward-only", "kcat": 626400.0, "ea": 8.05e-06, "mw": 58.0}
//!   }
//! }
//! ```
//! where `kcat` is in h⁻¹, `ea` in mmol gDW⁻¹ and `mw` in kDa. Entries keep the order of
//! the file.
use std::fmt::{Display, Formatter};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use indexmap::IndexMap;
use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;
use tracing::debug;

use crate::flexnet::channel::Direction;

/// Built-in catalogue for the scyllo-inositol producing B. subtilis model
const SCYLLO_CATALOGUE: &str = include_str!("../../data/scyllo_catalogue.json");

/// How an enzyme catalyzes its reaction
#[derive(Serialize, Deserialize, Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum KineticClass {
    /// Irreversible reaction catalyzed in the forward direction
    #[serde(alias = "fonly")]
    ForwardOnly,
    /// Reversible reaction catalyzed in the forward direction
    #[serde(alias = "fcat")]
    ForwardReversibleCatalyzed,
    /// Reversible reaction catalyzed in the backward direction
    #[serde(alias = "bcat")]
    BackwardReversibleCatalyzed,
    /// Reaction of the product pathway, which must carry flux
    #[serde(alias = "scillo")]
    ProductPathway,
}

impl KineticClass {
    pub const ALL: [KineticClass; 4] = [
        KineticClass::ForwardOnly,
        KineticClass::ForwardReversibleCatalyzed,
        KineticClass::BackwardReversibleCatalyzed,
        KineticClass::ProductPathway,
    ];

    /// Direction of the reaction the enzyme catalyzes
    pub fn catalyzed_direction(&self) -> Direction {
        match self {
            KineticClass::BackwardReversibleCatalyzed => Direction::Backward,
            _ => Direction::Forward,
        }
    }

    /// Directions whose channels must exist for an entry of this class
    pub fn required_directions(&self) -> &'static [Direction] {
        match self {
            KineticClass::ForwardOnly | KineticClass::ProductPathway => &[Direction::Forward],
            KineticClass::ForwardReversibleCatalyzed
            | KineticClass::BackwardReversibleCatalyzed => {
                &[Direction::Forward, Direction::Backward]
            }
        }
    }

    /// Whether the reaction is reversible but catalyzed in one direction only
    pub fn is_reversible(&self) -> bool {
        matches!(
            self,
            KineticClass::ForwardReversibleCatalyzed | KineticClass::BackwardReversibleCatalyzed
        )
    }
}

impl Display for KineticClass {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let token = match self {
            KineticClass::ForwardOnly => "forward-only",
            KineticClass::ForwardReversibleCatalyzed => "forward-reversible-catalyzed",
            KineticClass::BackwardReversibleCatalyzed => "backward-reversible-catalyzed",
            KineticClass::ProductPathway => "product-pathway",
        };
        write!(f, "{}", token)
    }
}

/// Kinetic parameters of the enzyme catalyzing one reaction
///
/// Entries are only created through [`CatalogueEntry::new`], so every parameter is
/// finite and positive.
#[derive(Clone, Debug, PartialEq)]
pub struct CatalogueEntry {
    /// Id of the catalyzed reaction
    pub(crate) reaction_id: String,
    pub(crate) class: KineticClass,
    /// Turnover number (h⁻¹)
    pub(crate) kcat: f64,
    /// Enzyme abundance (mmol gDW⁻¹)
    pub(crate) ea: f64,
    /// Molecular weight (kDa)
    pub(crate) mw: f64,
}

impl CatalogueEntry {
    /// Create a new entry, checking that every parameter is finite and positive
    pub fn new(
        reaction_id: &str,
        class: KineticClass,
        kcat: f64,
        ea: f64,
        mw: f64,
    ) -> Result<Self, CatalogueError> {
        for (parameter, value) in [("kcat", kcat), ("ea", ea), ("mw", mw)] {
            if !(value.is_finite() && value > 0.) {
                return Err(CatalogueError::InvalidEntry {
                    reaction: reaction_id.to_string(),
                    parameter,
                    value,
                });
            }
        }
        Ok(CatalogueEntry {
            reaction_id: reaction_id.to_string(),
            class,
            kcat,
            ea,
            mw,
        })
    }

    // region Accessors
    pub fn reaction_id(&self) -> &str {
        &self.reaction_id
    }

    pub fn class(&self) -> KineticClass {
        self.class
    }

    pub fn kcat(&self) -> f64 {
        self.kcat
    }

    pub fn ea(&self) -> f64 {
        self.ea
    }

    pub fn mw(&self) -> f64 {
        self.mw
    }
    // endregion Accessors

    /// Capacity of the enzyme, `kcat * ea`
    pub fn capacity(&self) -> f64 {
        self.kcat * self.ea
    }

    /// Coefficient of the total enzyme level in the pool aware bound, `kcat / mw`
    pub fn pool_coefficient(&self) -> f64 {
        self.kcat / self.mw
    }

    /// Every channel the entry may touch
    pub fn required_channels(&self) -> Vec<String> {
        self.class
            .required_directions()
            .iter()
            .map(|d| d.channel_id(&self.reaction_id))
            .collect()
    }
}

/// Ordered collection of catalogue entries and the total enzyme abundance
#[derive(Clone, Debug, PartialEq)]
pub struct ReactionCatalogue {
    /// Level of the total enzyme stock (g gDW⁻¹)
    total_enzyme: f64,
    /// Map of reaction ids to entries, in file order
    entries: IndexMap<String, CatalogueEntry>,
}

impl ReactionCatalogue {
    /// Create an empty catalogue
    pub fn new(total_enzyme: f64) -> Result<Self, CatalogueError> {
        if !(total_enzyme.is_finite() && total_enzyme > 0.) {
            return Err(CatalogueError::InvalidTotalEnzyme(total_enzyme));
        }
        Ok(ReactionCatalogue {
            total_enzyme,
            entries: IndexMap::new(),
        })
    }

    /// The catalogue of the scyllo-inositol study, 20 entries with a total enzyme
    /// abundance of 0.01067
    pub fn scyllo_default() -> Result<Self, CatalogueError> {
        Self::from_json_str(SCYLLO_CATALOGUE)
    }

    // region Accessors
    pub fn total_enzyme(&self) -> f64 {
        self.total_enzyme
    }

    pub fn entries(&self) -> &IndexMap<String, CatalogueEntry> {
        &self.entries
    }

    pub fn get(&self, reaction_id: &str) -> Option<&CatalogueEntry> {
        self.entries.get(reaction_id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
    // endregion Accessors

    /// Add an entry at the end of the catalogue
    pub fn add_entry(&mut self, entry: CatalogueEntry) -> Result<(), CatalogueError> {
        if self.entries.contains_key(&entry.reaction_id) {
            return Err(CatalogueError::DuplicateEntry(entry.reaction_id));
        }
        self.entries.insert(entry.reaction_id.clone(), entry);
        Ok(())
    }

    // region IO
    /// Read a catalogue from a JSON file
    pub fn read_json<P: AsRef<Path>>(path: P) -> Result<Self, CatalogueError> {
        let file = File::open(path.as_ref())?;
        let reader = BufReader::new(file);
        let table: CatalogueTable = serde_json::from_reader(reader)?;
        let catalogue = Self::from_table(table)?;
        debug!(
            path = %path.as_ref().display(),
            entries = catalogue.len(),
            "read reaction catalogue"
        );
        Ok(catalogue)
    }

    /// Read a catalogue from a JSON string
    pub fn from_json_str(catalogue_str: &str) -> Result<Self, CatalogueError> {
        let table: CatalogueTable = serde_json::from_str(catalogue_str)?;
        Self::from_table(table)
    }

    /// Write the catalogue as a JSON string
    pub fn to_json_string(&self) -> Result<String, CatalogueError> {
        let table = CatalogueTable {
            total_enzyme: self.total_enzyme,
            reactions: self
                .entries
                .values()
                .map(|e| {
                    (
                        e.reaction_id.clone(),
                        TableEntry {
                            class: e.class,
                            kcat: e.kcat,
                            ea: e.ea,
                            mw: e.mw,
                        },
                    )
                })
                .collect(),
        };
        Ok(serde_json::to_string_pretty(&table)?)
    }

    fn from_table(table: CatalogueTable) -> Result<Self, CatalogueError> {
        let mut catalogue = ReactionCatalogue::new(table.total_enzyme)?;
        for (id, entry) in table.reactions {
            catalogue.add_entry(CatalogueEntry::new(
                &id,
                entry.class,
                entry.kcat,
                entry.ea,
                entry.mw,
            )?)?;
        }
        Ok(catalogue)
    }
    // endregion IO
}

/// On disk layout of a catalogue
#[derive(Serialize, Deserialize, Debug)]
#[serde(deny_unknown_fields)]
struct CatalogueTable {
    total_enzyme: f64,
    /// Kept as pairs so a repeated reaction key reaches [`ReactionCatalogue::add_entry`]
    #[serde(
        serialize_with = "serialize_reactions",
        deserialize_with = "deserialize_reactions"
    )]
    reactions: Vec<(String, TableEntry)>,
}

fn serialize_reactions<S: Serializer>(
    reactions: &[(String, TableEntry)],
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_map(reactions.iter().map(|(id, entry)| (id, entry)))
}

fn deserialize_reactions<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Vec<(String, TableEntry)>, D::Error> {
    struct ReactionsVisitor;

    impl<'de> Visitor<'de> for ReactionsVisitor {
        type Value = Vec<(String, TableEntry)>;

        fn expecting(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
            write!(f, "a map of reaction ids to catalogue entries")
        }

        fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
            let mut reactions = Vec::with_capacity(map.size_hint().unwrap_or_default());
            while let Some(pair) = map.next_entry::<String, TableEntry>()? {
                reactions.push(pair);
            }
            Ok(reactions)
        }
    }

    deserializer.deserialize_map(ReactionsVisitor)
}

#[derive(Serialize, Deserialize, Debug)]
#[serde(deny_unknown_fields)]
struct TableEntry {
    class: KineticClass,
    kcat: f64,
    ea: f64,
    mw: f64,
}

/// Errors raised while loading a catalogue
#[derive(Error, Debug)]
pub enum CatalogueError {
    #[error("Unable to read catalogue file")]
    UnableToRead(#[from] std::io::Error),
    #[error("Unable to parse catalogue: {0}")]
    UnableToParse(#[from] serde_json::Error),
    #[error("Entry {reaction} has invalid {parameter} {value}, it must be finite and positive")]
    InvalidEntry {
        reaction: String,
        parameter: &'static str,
        value: f64,
    },
    #[error("Total enzyme abundance {0} must be finite and positive")]
    InvalidTotalEnzyme(f64),
    #[error("Reaction {0} appears more than once in the catalogue")]
    DuplicateEntry(String),
}

#[cfg(test)]
pub(crate) mod catalogue_tests {
    use super::*;
    use std::path::PathBuf;

    pub(crate) fn toy_catalogue_path() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("test_data")
            .join("catalogues")
            .join("toy_catalogue.json")
    }

    #[test]
    fn class_tokens() {
        let class: KineticClass = serde_json::from_str("\"forward-reversible-catalyzed\"").unwrap();
        assert_eq!(class, KineticClass::ForwardReversibleCatalyzed);
        let class: KineticClass = serde_json::from_str("\"bcat\"").unwrap();
        assert_eq!(class, KineticClass::BackwardReversibleCatalyzed);
        let class: KineticClass = serde_json::from_str("\"scillo\"").unwrap();
        assert_eq!(class, KineticClass::ProductPathway);
        for class in KineticClass::ALL {
            let token = serde_json::to_string(&class).unwrap();
            assert_eq!(token, format!("\"{}\"", class));
        }
        assert!(serde_json::from_str::<KineticClass>("\"sideways\"").is_err());
    }

    #[test]
    fn read_toy_catalogue() {
        let catalogue = ReactionCatalogue::read_json(toy_catalogue_path()).unwrap();
        assert_eq!(catalogue.total_enzyme(), 1.);
        let ids: Vec<&str> = catalogue.entries().keys().map(String::as_str).collect();
        assert_eq!(
            ids,
            vec!["PGI", "G6PDH2r", "MI1PP", "INS2D", "scino_synthesis"]
        );
        let pgi = catalogue.get("PGI").unwrap();
        assert_eq!(pgi.class, KineticClass::ForwardReversibleCatalyzed);
        assert!((pgi.capacity() - 10.).abs() < 1e-12);
        assert!((pgi.pool_coefficient() - 20.).abs() < 1e-12);
        assert_eq!(pgi.required_channels(), vec!["PGI_f", "PGI_b"]);
    }

    #[test]
    fn scyllo_default() {
        let catalogue = ReactionCatalogue::scyllo_default().unwrap();
        assert_eq!(catalogue.len(), 20);
        assert_eq!(catalogue.total_enzyme(), 0.01067);
        let pgk = catalogue.get("PGK").unwrap();
        assert_eq!(pgk.class, KineticClass::BackwardReversibleCatalyzed);
        assert_eq!(pgk.class.catalyzed_direction(), Direction::Backward);
        let products = catalogue
            .entries()
            .values()
            .filter(|e| e.class == KineticClass::ProductPathway)
            .count();
        assert_eq!(products, 3);
    }

    #[test]
    fn invalid_parameters() {
        let data = r#"{"total_enzyme": 1.0, "reactions": {
            "R1": {"class": "fonly", "kcat": 100.0, "ea": 0.0, "mw": 50.0}}}"#;
        match ReactionCatalogue::from_json_str(data) {
            Err(CatalogueError::InvalidEntry {
                reaction,
                parameter,
                ..
            }) => {
                assert_eq!(reaction, "R1");
                assert_eq!(parameter, "ea");
            }
            other => panic!("expected an invalid entry, got {:?}", other),
        }
        assert!(matches!(
            CatalogueEntry::new("R1", KineticClass::ForwardOnly, -1., 1., 1.),
            Err(CatalogueError::InvalidEntry { parameter: "kcat", .. })
        ));
        assert!(matches!(
            CatalogueEntry::new("R1", KineticClass::ForwardOnly, 1., 1., f64::NAN),
            Err(CatalogueError::InvalidEntry { parameter: "mw", .. })
        ));
        assert!(matches!(
            ReactionCatalogue::new(0.),
            Err(CatalogueError::InvalidTotalEnzyme(_))
        ));
    }

    #[test]
    fn unknown_class() {
        let data = r#"{"total_enzyme": 1.0, "reactions": {
            "R1": {"class": "sideways", "kcat": 100.0, "ea": 0.01, "mw": 50.0}}}"#;
        assert!(matches!(
            ReactionCatalogue::from_json_str(data),
            Err(CatalogueError::UnableToParse(_))
        ));
    }

    #[test]
    fn entry_accessors() {
        let entry =
            CatalogueEntry::new("INS2D", KineticClass::ProductPathway, 20., 0.5, 4.).unwrap();
        assert_eq!(entry.reaction_id(), "INS2D");
        assert_eq!(entry.class(), KineticClass::ProductPathway);
        assert_eq!((entry.kcat(), entry.ea(), entry.mw()), (20., 0.5, 4.));
        assert!((entry.capacity() - 10.).abs() < 1e-12);
        assert!((entry.pool_coefficient() - 5.).abs() < 1e-12);
        assert!(matches!(
            CatalogueEntry::new("INS2D", KineticClass::ProductPathway, 20., 0.5, 0.),
            Err(CatalogueError::InvalidEntry { parameter: "mw", .. })
        ));
    }

    #[test]
    fn duplicate_entry() {
        let mut catalogue = ReactionCatalogue::new(1.).unwrap();
        let entry = CatalogueEntry::new("R1", KineticClass::ForwardOnly, 1., 1., 1.).unwrap();
        catalogue.add_entry(entry.clone()).unwrap();
        assert!(matches!(
            catalogue.add_entry(entry),
            Err(CatalogueError::DuplicateEntry(id)) if id == "R1"
        ));
    }

    #[test]
    fn duplicate_entry_in_file() {
        let data = r#"{"total_enzyme": 1.0, "reactions": {
            "PGI": {"class": "fcat", "kcat": 100.0, "ea": 0.1, "mw": 5.0},
            "G6PDH2r": {"class": "fonly", "kcat": 10.0, "ea": 0.1, "mw": 5.0},
            "PGI": {"class": "bcat", "kcat": 1.0, "ea": 1.0, "mw": 1.0}}}"#;
        assert!(matches!(
            ReactionCatalogue::from_json_str(data),
            Err(CatalogueError::DuplicateEntry(id)) if id == "PGI"
        ));
    }

    #[test]
    fn json_round_trip() {
        let catalogue = ReactionCatalogue::read_json(toy_catalogue_path()).unwrap();
        let json = catalogue.to_json_string().unwrap();
        assert_eq!(ReactionCatalogue::from_json_str(&json).unwrap(), catalogue);
    }
}
