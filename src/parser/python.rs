// Python parser using tree-sitter

use crate::error::{Error, Result};
use crate::parser::ast::ClassDeclaration;
use std::path::Path;
use tree_sitter::{Node, Parser};

/// Parser for Python source files
pub struct PythonParser {
    parser: Parser,
}

impl PythonParser {
    /// Create a new Python parser
    pub fn new() -> Result<Self> {
        let mut parser = Parser::new();
        let language = tree_sitter_python::language();
        parser
            .set_language(&language)
            .map_err(|e| Error::Parser(format!("Failed to set Python language: {}", e)))?;
        Ok(Self { parser })
    }

    /// Parse a Python file and collect its class declarations
    pub fn parse_file(&mut self, path: &Path) -> Result<Vec<ClassDeclaration>> {
        let source = std::fs::read_to_string(path).map_err(|e| {
            Error::Io(std::io::Error::new(e.kind(), format!("{}: {}", path.display(), e)))
        })?;

        self.parse_source(&source, path)
    }

    /// Parse Python source code
    ///
    /// Every `class` statement in the tree is returned in pre-order, so an
    /// outer class comes before the classes nested in its body. Any syntax
    /// error fails the whole parse, including Python 2 statements and bad
    /// indentation that tree-sitter recovers from silently.
    pub fn parse_source(&mut self, source: &str, path: &Path) -> Result<Vec<ClassDeclaration>> {
        let tree = self
            .parser
            .parse(source, None)
            .ok_or_else(|| Error::parser("Failed to parse source"))?;

        let root = tree.root_node();
        if root.has_error() {
            return Err(Error::parse(path, describe_syntax_error(&root)));
        }
        if let Some((node, what)) = first_rejected(root, source.as_bytes()) {
            return Err(Error::parse(path, describe_at(&node, what)));
        }

        let mut classes = Vec::new();
        visit_node(&root, source.as_bytes(), &mut classes);

        tracing::debug!(path = %path.display(), classes = classes.len(), "parsed python source");
        Ok(classes)
    }
}

/// Visit a node, recording classes and recursing into every child
fn visit_node(node: &Node, source: &[u8], classes: &mut Vec<ClassDeclaration>) {
    if node.kind() == "class_definition" {
        if let Some(class) = parse_class(node, source) {
            tracing::trace!(name = %class.name, bases = ?class.bases, line = class.line, "class");
            classes.push(class);
        }
    }

    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        visit_node(&child, source, classes);
    }
}

/// Parse a class definition node
fn parse_class(node: &Node, source: &[u8]) -> Option<ClassDeclaration> {
    let name = node
        .child_by_field_name("name")?
        .utf8_text(source)
        .ok()?
        .to_string();

    let bases = node
        .child_by_field_name("superclasses")
        .map(|args| extract_bases(&args, source))
        .unwrap_or_default();

    Some(ClassDeclaration {
        name,
        bases,
        line: node.start_position().row + 1,
    })
}

/// Extract the bases that are plain names
///
/// Dotted, subscripted and call bases are dropped along with keyword
/// arguments such as `metaclass=`.
fn extract_bases(node: &Node, source: &[u8]) -> Vec<String> {
    let mut bases = Vec::new();
    let mut cursor = node.walk();

    for child in node.named_children(&mut cursor) {
        if let Some(ident) = simple_name(child) {
            if let Ok(text) = ident.utf8_text(source) {
                bases.push(text.to_string());
            }
        }
    }

    bases
}

/// Unwrap `(Name)` down to `Name`
fn simple_name(node: Node) -> Option<Node> {
    match node.kind() {
        "identifier" => Some(node),
        "parenthesized_expression" => {
            let inner = node.named_child(0)?;
            if node.named_child_count() == 1 {
                simple_name(inner)
            } else {
                None
            }
        }
        _ => None,
    }
}

/// Describe the first ERROR or MISSING node under `root`
fn describe_syntax_error(root: &Node) -> String {
    match first_error(*root) {
        Some(node) if node.is_missing() => {
            describe_at(&node, &format!("missing `{}`", node.kind()))
        }
        Some(node) => describe_at(&node, "invalid syntax"),
        None => "invalid syntax".to_string(),
    }
}

fn describe_at(node: &Node, what: &str) -> String {
    let pos = node.start_position();
    format!("{} at line {}, column {}", what, pos.row + 1, pos.column + 1)
}

fn first_error(node: Node) -> Option<Node> {
    if node.is_error() || node.is_missing() {
        return Some(node);
    }
    if !node.has_error() {
        return None;
    }

    let mut cursor = node.walk();
    let children: Vec<Node> = node.children(&mut cursor).collect();
    children.into_iter().find_map(first_error)
}

/// Find the first construct tree-sitter accepts but Python 3 rejects
fn first_rejected<'a>(node: Node<'a>, source: &[u8]) -> Option<(Node<'a>, &'static str)> {
    match node.kind() {
        "print_statement" => return Some((node, "Python 2 `print` statement")),
        "exec_statement" => return Some((node, "Python 2 `exec` statement")),
        "except_clause" => {
            let mut cursor = node.walk();
            let comma = node
                .children(&mut cursor)
                .find(|c| !c.is_named() && c.kind() == ",");
            if let Some(comma) = comma {
                return Some((comma, "Python 2 `except X, name` clause"));
            }
        }
        "module" | "block" => {
            if let Some(found) = misindented_statement(node, source) {
                return Some(found);
            }
        }
        _ => {}
    }

    let mut cursor = node.walk();
    let children: Vec<Node> = node.children(&mut cursor).collect();
    children
        .into_iter()
        .find_map(|child| first_rejected(child, source))
}

/// Check that the statements of a module or block line up
///
/// Module statements start at column 0. A block takes the column of its
/// first statement; a suite written on the header line allows no further
/// lines. Comments may sit at any indentation.
fn misindented_statement<'a>(node: Node<'a>, source: &[u8]) -> Option<(Node<'a>, &'static str)> {
    let mut expected = (node.kind() == "module").then_some(0);
    let mut inline_suite = false;

    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        if matches!(child.kind(), "comment" | "line_continuation") {
            continue;
        }
        if !starts_line(&child, source) {
            if expected.is_none() {
                inline_suite = true;
            }
            continue;
        }
        if inline_suite {
            return Some((child, "unexpected indent"));
        }

        let column = child.start_position().column;
        match expected {
            None => expected = Some(column),
            Some(want) if column == want => {}
            Some(want) if column > want => return Some((child, "unexpected indent")),
            Some(_) => {
                return Some((child, "unindent does not match any outer indentation level"))
            }
        }
    }

    None
}

/// Whether only whitespace precedes `node` on its line
fn starts_line(node: &Node, source: &[u8]) -> bool {
    let start = node.start_byte();
    let line_start = source[..start]
        .iter()
        .rposition(|&b| b == b'\n')
        .map_or(0, |i| i + 1);
    source[line_start..start]
        .iter()
        .all(|&b| matches!(b, b' ' | b'\t' | b'\x0c'))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(source: &str) -> Vec<ClassDeclaration> {
        let mut parser = PythonParser::new().unwrap();
        parser.parse_source(source, Path::new("test.py")).unwrap()
    }

    fn names(classes: &[ClassDeclaration]) -> Vec<&str> {
        classes.iter().map(|c| c.name.as_str()).collect()
    }

    #[test]
    fn test_parser_new() {
        let parser = PythonParser::new();
        assert!(parser.is_ok());
    }

    #[test]
    fn test_empty_file() {
        assert!(parse("").is_empty());
    }

    #[test]
    fn test_no_classes() {
        let classes = parse("import os\n\ndef main():\n    return os.getcwd()\n");
        assert!(classes.is_empty());
    }

    #[test]
    fn test_simple_class() {
        let classes = parse("class MyClass: pass");
        assert_eq!(classes.len(), 1);
        assert_eq!(classes[0].name, "MyClass");
        assert!(classes[0].bases.is_empty());
        assert_eq!(classes[0].line, 1);
    }

    #[test]
    fn test_class_with_bases() {
        let classes = parse("class MyClass(Base, Mixin): pass");
        assert_eq!(classes[0].bases, vec!["Base", "Mixin"]);
    }

    #[test]
    fn test_empty_parens() {
        let classes = parse("class MyClass(): pass");
        assert!(classes[0].bases.is_empty());
    }

    #[test]
    fn test_non_simple_bases_are_dropped() {
        let classes = parse(
            "class A(module.Base, Generic[T], make_base(), Real, metaclass=Meta, *extra): pass",
        );
        assert_eq!(classes[0].bases, vec!["Real"]);
    }

    #[test]
    fn test_only_qualified_base() {
        let classes = parse("class Handle(ctypes.Structure): pass");
        assert_eq!(classes.len(), 1);
        assert!(classes[0].bases.is_empty());
    }

    #[test]
    fn test_parenthesized_base() {
        let classes = parse("class A((Base)): pass");
        assert_eq!(classes[0].bases, vec!["Base"]);
    }

    #[test]
    fn test_nested_classes_in_preorder() {
        let source = "\
class Outer(Base):
    class Inner(Outer):
        class Innermost: pass

def factory():
    class Local(Base):
        pass
    return Local

class Last(Outer): pass
";
        let classes = parse(source);
        assert_eq!(names(&classes), vec!["Outer", "Inner", "Innermost", "Local", "Last"]);
        assert_eq!(classes[1].bases, vec!["Outer"]);
        assert_eq!(classes[3].line, 6);
    }

    #[test]
    fn test_decorated_class() {
        let classes = parse("@dataclass\nclass Point(Base):\n    x: int = 0\n");
        assert_eq!(names(&classes), vec!["Point"]);
        assert_eq!(classes[0].line, 2);
    }

    #[test]
    fn test_duplicate_names_kept() {
        let classes = parse("class A: pass\nclass A(B): pass\n");
        assert_eq!(names(&classes), vec!["A", "A"]);
    }

    #[test]
    fn test_syntax_error() {
        let mut parser = PythonParser::new().unwrap();
        let result = parser.parse_source("class Broken(:\n    pass\n", Path::new("broken.py"));
        match result {
            Err(Error::Parse { path, message }) => {
                assert_eq!(path, Path::new("broken.py"));
                assert!(message.contains("line 1"), "unexpected message: {}", message);
            }
            other => panic!("Expected parse error, got {:?}", other),
        }
    }

    fn parse_error(source: &str) -> String {
        let mut parser = PythonParser::new().unwrap();
        match parser.parse_source(source, Path::new("legacy.py")) {
            Err(Error::Parse { message, .. }) => message,
            other => panic!("Expected parse error for {:?}, got {:?}", source, other),
        }
    }

    #[test]
    fn test_python2_print_rejected() {
        let message = parse_error("print \"hello\"\nclass Foo(Bar): pass\n");
        assert!(message.contains("print"), "unexpected message: {}", message);
        assert!(message.contains("line 1"), "unexpected message: {}", message);
    }

    #[test]
    fn test_python2_exec_rejected() {
        let message = parse_error("class Foo(Bar):\n    exec \"x = 1\"\n");
        assert!(message.contains("exec"), "unexpected message: {}", message);
    }

    #[test]
    fn test_python2_except_comma_rejected() {
        let source = "\
class Foo(Bar):
    def run(self):
        try:
            pass
        except Exception, e:
            pass
";
        let message = parse_error(source);
        assert!(message.contains("except"), "unexpected message: {}", message);
        assert!(message.contains("line 5"), "unexpected message: {}", message);
    }

    #[test]
    fn test_unexpected_indent_rejected() {
        let message = parse_error("class Foo(Bar):\n    x = 1\n      y = 2\n");
        assert!(message.contains("unexpected indent"), "unexpected message: {}", message);
        assert!(message.contains("line 3"), "unexpected message: {}", message);
    }

    #[test]
    fn test_inconsistent_dedent_rejected() {
        let message = parse_error("def f():\n        x = 1\n    y = 2\n\nclass Foo(Bar): pass\n");
        assert!(message.contains("line 3"), "unexpected message: {}", message);
    }

    #[test]
    fn test_indented_module_statement_rejected() {
        let message = parse_error("  class Foo(Bar): pass\n");
        assert!(message.contains("line 1"), "unexpected message: {}", message);
    }

    #[test]
    fn test_python3_constructs_accepted() {
        let source = "\
# leading comment
import sys

def main(code):
    print(\"hello\", file=sys.stderr)
    exec(code)
        # comments may sit at any indentation
    a = 1; b = (2,
        3)
    try:
        pass
    except (ValueError, KeyError) as e:
        pass
    if a: b = 2
    return a + \\
        b

class Foo(Bar):
    x = 1
  # dedented comment
    y = 2
";
        let classes = parse(source);
        assert_eq!(names(&classes), vec!["Foo"]);
    }

    #[test]
    fn test_missing_file() {
        let mut parser = PythonParser::new().unwrap();
        let result = parser.parse_file(Path::new("/nonexistent/lib3mf.py"));
        assert!(matches!(result, Err(Error::Io(_))));
    }
}
