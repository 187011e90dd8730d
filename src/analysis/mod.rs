// Analysis module: parse both inputs and reconcile them

pub mod reconcile;

pub use reconcile::*;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::parser::{parse_header_file, ClassDeclaration, HeaderMap, PythonParser};
use std::path::Path;

/// Result of comparing a Python module against a header
#[derive(Debug)]
pub struct AnalysisResult {
    /// Python classes in declaration order
    pub classes: Vec<ClassDeclaration>,
    /// Header class -> base map
    pub header: HeaderMap,
    /// Detected mismatches, in Python declaration order
    pub mismatches: Vec<Mismatch>,
}

impl AnalysisResult {
    pub fn has_mismatches(&self) -> bool {
        !self.mismatches.is_empty()
    }
}

/// Main analyzer that runs the parse / extract / reconcile steps in order
pub struct Analyzer {
    config: Config,
    parser: PythonParser,
}

impl Analyzer {
    /// Create a new analyzer with the given configuration
    pub fn new(config: Config) -> Result<Self> {
        let parser = PythonParser::new()?;
        Ok(Self { config, parser })
    }

    /// Compare the classes of `python_file` with the declarations in `header_file`
    ///
    /// Both paths are checked before anything is parsed.
    pub fn analyze(&mut self, python_file: &Path, header_file: &Path) -> Result<AnalysisResult> {
        for path in [python_file, header_file] {
            if !path.exists() {
                return Err(Error::FileNotFound(path.to_path_buf()));
            }
        }

        let classes = self.parser.parse_file(python_file)?;
        let header = parse_header_file(header_file)?;
        let mismatches = find_mismatches(&classes, &header, &self.config.naming);

        tracing::debug!(
            python_classes = classes.len(),
            header_classes = header.len(),
            mismatches = mismatches.len(),
            "analysis complete"
        );

        Ok(AnalysisResult {
            classes,
            header,
            mismatches,
        })
    }
}
