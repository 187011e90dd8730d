// Parser module for extracting class hierarchies from both inputs

pub mod ast;
mod header;
mod python;

pub use ast::*;
pub use header::{parse_header, parse_header_file};
pub use python::PythonParser;
