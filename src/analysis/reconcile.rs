// Cross-referencing Python classes against header declarations

use crate::parser::{ClassDeclaration, HeaderMap};
use serde::{Deserialize, Serialize};

/// How Python class names map into the header namespace
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NamingConvention {
    /// Prepended to every class and base name
    pub prefix: String,
    /// Python root base that is named differently in the header
    pub alias_root: String,
    /// Header name used for `alias_root`
    pub alias_target: String,
}

impl Default for NamingConvention {
    fn default() -> Self {
        Self {
            prefix: "CLib3MF".to_string(),
            alias_root: "Base".to_string(),
            alias_target: "CLib3MFBaseClass".to_string(),
        }
    }
}

impl NamingConvention {
    /// Header name for a Python class
    pub fn class_name(&self, name: &str) -> String {
        format!("{}{}", self.prefix, name)
    }

    /// Header name for a Python base class, with the alias applied
    pub fn base_name(&self, base: &str) -> String {
        let prefixed = self.class_name(base);
        if prefixed == self.class_name(&self.alias_root) {
            self.alias_target.clone()
        } else {
            prefixed
        }
    }
}

/// A class whose header base is not one of its Python bases
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mismatch {
    /// Python class name, unprefixed
    pub class_name: String,
    /// Python bases mapped into the header namespace
    pub expected_bases: Vec<String>,
    /// Base recorded in the header
    pub actual_base: String,
}

/// Compare Python declarations against the header map
///
/// Classes missing from the header are skipped, and so are classes with no
/// plain-name bases: an undetected base is not evidence of a mismatch.
/// Output follows the order of `classes`.
pub fn find_mismatches(
    classes: &[ClassDeclaration],
    header: &HeaderMap,
    naming: &NamingConvention,
) -> Vec<Mismatch> {
    let mut mismatches = Vec::new();

    for class in classes {
        let header_name = naming.class_name(&class.name);
        let Some(actual) = header.get(&header_name) else {
            continue;
        };

        let expected: Vec<String> = class.bases.iter().map(|b| naming.base_name(b)).collect();
        if expected.is_empty() || expected.contains(actual) {
            continue;
        }

        tracing::debug!(
            class = %class.name,
            line = class.line,
            expected = ?expected,
            actual = %actual,
            "inheritance mismatch"
        );
        mismatches.push(Mismatch {
            class_name: class.name.clone(),
            expected_bases: expected,
            actual_base: actual.clone(),
        });
    }

    mismatches
}
