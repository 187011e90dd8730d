// Line-based extractor for C++ wrapper headers

use crate::error::{Error, Result};
use crate::parser::ast::HeaderMap;
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::Path;

/// `class <Name> : public <Base>`, anchored at the start of the line.
/// Only the first base is captured.
static CLASS_DECL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^class (\w+)\s*:\s*public\s*(\w+)").expect("class declaration pattern is valid")
});

/// Read a header file and extract its class -> base map
pub fn parse_header_file(path: &Path) -> Result<HeaderMap> {
    let source = std::fs::read_to_string(path).map_err(|e| {
        Error::Io(std::io::Error::new(e.kind(), format!("{}: {}", path.display(), e)))
    })?;

    let classes = parse_header(&source);
    tracing::debug!(path = %path.display(), classes = classes.len(), "parsed header");
    Ok(classes)
}

/// Extract single-inheritance declarations from header text
///
/// Lines that don't match are skipped. When a class shows up more than once
/// the last declaration wins.
pub fn parse_header(source: &str) -> HeaderMap {
    let mut classes = HeaderMap::new();

    for line in source.lines() {
        if let Some((name, base)) = match_declaration(line) {
            if let Some(previous) = classes.insert(name.to_string(), base.to_string()) {
                tracing::trace!(class = %name, previous = %previous, base = %base, "header redeclares class");
            }
        }
    }

    classes
}

fn match_declaration(line: &str) -> Option<(&str, &str)> {
    let caps = CLASS_DECL.captures(line)?;
    Some((caps.get(1)?.as_str(), caps.get(2)?.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_single_declaration() {
        let map = parse_header("class CLib3MFMesh : public CLib3MFBase {\n");
        assert_eq!(map.len(), 1);
        assert_eq!(map["CLib3MFMesh"], "CLib3MFBase");
    }

    #[test]
    fn test_whitespace_variants() {
        let map = parse_header("class A:public B\nclass C   :   public   D\n");
        assert_eq!(map["A"], "B");
        assert_eq!(map["C"], "D");
    }

    #[test]
    fn test_unrelated_lines_ignored() {
        let source = "\
#include <node.h>
struct Foo : public Bar {};
class Forward;
class Private : private Hidden {
  // class Nested : public Commented
};
typedef int CLib3MFHandle;
";
        assert!(parse_header(source).is_empty());
    }

    #[test]
    fn test_indented_declaration_ignored() {
        let map = parse_header("    class Inner : public Outer {\n");
        assert!(map.is_empty());
    }

    #[test]
    fn test_only_first_base_kept() {
        let map = parse_header("class Multi : public First, public Second {\n");
        assert_eq!(map["Multi"], "First");
    }

    #[test]
    fn test_last_declaration_wins() {
        let map = parse_header("class A : public B\nclass A : public C\n");
        assert_eq!(map.len(), 1);
        assert_eq!(map["A"], "C");
    }

    #[test]
    fn test_parse_header_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "class CLib3MFFoo : public CLib3MFBar {{").unwrap();
        writeln!(file, "}};").unwrap();

        let map = parse_header_file(file.path()).unwrap();
        assert_eq!(map["CLib3MFFoo"], "CLib3MFBar");
    }

    #[test]
    fn test_parse_header_missing_file() {
        let result = parse_header_file(Path::new("/nonexistent/lib3mf_nodewrapper.h"));
        assert!(matches!(result, Err(Error::Io(_))));
    }
}
