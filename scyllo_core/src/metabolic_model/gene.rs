//! This module provides the Gene struct, carried along so models keep their gene list when
//! they are written back out

use std::fmt::{Display, Formatter};

/// Structure Representing a Gene
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Gene {
    /// Used to identify the gene
    pub id: String,
    /// Human Readable Gene Name
    pub name: Option<String>,
    /// Notes about the gene
    pub notes: Option<String>,
    /// Gene Annotations
    pub annotation: Option<String>,
}

impl Display for Gene {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.id)
    }
}
