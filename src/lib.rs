//! inherit-diff - Check Python class inheritance against a C++ wrapper header
//!
//! Parses the classes of a Python module with tree-sitter, extracts
//! `class X : public Y` declarations from a header, and reports classes whose
//! header base disagrees with their Python bases under a prefix naming
//! convention. Optionally renders the Python hierarchy with Graphviz.

pub mod analysis;
pub mod cli;
pub mod config;
pub mod error;
pub mod output;
pub mod parser;

// Re-export main types
pub use analysis::{find_mismatches, AnalysisResult, Analyzer, Mismatch, NamingConvention};
pub use config::Config;
pub use error::{Error, Result};
pub use output::{DiagramRenderer, InheritanceGraph};
pub use parser::{ClassDeclaration, HeaderMap, PythonParser};
