// Types extracted from the two inputs
//
// The Python side yields an ordered list of class declarations; the header
// side yields a name -> base map.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A class definition found in Python source
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ClassDeclaration {
    /// Class name
    pub name: String,
    /// Direct base classes written as plain identifiers, in source order
    pub bases: Vec<String>,
    /// Line of the `class` keyword (1-based)
    pub line: usize,
}

impl ClassDeclaration {
    /// Create a declaration with the given bases
    pub fn new<I, S>(name: &str, bases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.to_string(),
            bases: bases.into_iter().map(Into::into).collect(),
            line: 0,
        }
    }

    /// Set the source line
    pub fn at_line(mut self, line: usize) -> Self {
        self.line = line;
        self
    }

    /// Whether any simple-name base was detected
    pub fn has_bases(&self) -> bool {
        !self.bases.is_empty()
    }
}

/// Class name -> declared base, as recorded in the header
pub type HeaderMap = BTreeMap<String, String>;
