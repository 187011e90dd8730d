// Inheritance diagrams for inherit-diff
//
// Builds a petgraph graph from the Python declarations and renders it with
// the Graphviz command-line tools.

use crate::config::DiagramConfig;
use crate::error::{Error, Result};
use crate::parser::ClassDeclaration;
use petgraph::dot::{Config as DotConfig, Dot};
use petgraph::graph::{DiGraph, NodeIndex};
use std::collections::HashMap;
use std::path::PathBuf;
use std::process::Command;

/// Output formats accepted by Graphviz
const GRAPHVIZ_FORMATS: &[&str] = &[
    "bmp", "canon", "cgimage", "cmap", "cmapx", "cmapx_np", "dot", "dot_json", "eps", "exr",
    "fig", "gd", "gd2", "gif", "gtk", "gv", "ico", "imap", "imap_np", "ismap", "jp2", "jpe",
    "jpeg", "jpg", "json", "json0", "pct", "pdf", "pic", "pict", "plain", "plain-ext", "png",
    "pov", "ps", "ps2", "psd", "sgi", "svg", "svgz", "tga", "tif", "tiff", "tk", "vdx", "vml",
    "vmlz", "vrml", "wbmp", "webp", "xdot", "xdot1.2", "xdot1.4", "xdot_json",
];

/// Comment written at the top of the DOT source
const GRAPH_COMMENT: &str = "Class Inheritance Tree";

/// Whether Graphviz knows how to write `format`
///
/// The format doubles as the file extension, so `format:renderer`
/// selectors such as `png:cairo` are rejected.
pub fn is_supported_format(format: &str) -> bool {
    GRAPHVIZ_FORMATS.contains(&format)
}

/// Directed base -> derived graph of Python classes
///
/// Edge weights hold the line of the derived class declaration.
#[derive(Debug, Default)]
pub struct InheritanceGraph {
    graph: DiGraph<String, usize>,
    nodes: HashMap<String, NodeIndex>,
}

impl InheritanceGraph {
    /// Build the graph from declarations
    ///
    /// Each (base, class) pair becomes an edge. Classes with no detected
    /// base are added as standalone nodes. Nodes are shared by name.
    pub fn from_classes(classes: &[ClassDeclaration]) -> Self {
        let mut graph = Self::default();

        for class in classes {
            if class.bases.is_empty() {
                graph.node(&class.name);
                continue;
            }
            let derived = graph.node(&class.name);
            for base in &class.bases {
                let base = graph.node(base);
                graph.graph.add_edge(base, derived, class.line);
            }
        }

        graph
    }

    fn node(&mut self, name: &str) -> NodeIndex {
        if let Some(&idx) = self.nodes.get(name) {
            return idx;
        }
        let idx = self.graph.add_node(name.to_string());
        self.nodes.insert(name.to_string(), idx);
        idx
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Nodes without any incoming or outgoing edge
    pub fn isolated_nodes(&self) -> Vec<&str> {
        self.graph
            .node_indices()
            .filter(|&idx| self.graph.neighbors_undirected(idx).next().is_none())
            .map(|idx| self.graph[idx].as_str())
            .collect()
    }

    /// Whether `derived` is drawn as inheriting from `base`
    pub fn has_edge(&self, base: &str, derived: &str) -> bool {
        match (self.nodes.get(base), self.nodes.get(derived)) {
            (Some(&from), Some(&to)) => self.graph.contains_edge(from, to),
            _ => false,
        }
    }

    /// Serialize to Graphviz DOT
    pub fn to_dot(&self) -> String {
        format!(
            "// {}\n{}",
            GRAPH_COMMENT,
            Dot::with_config(&self.graph, &[DotConfig::EdgeNoLabel])
        )
    }
}

/// Writes the DOT source and runs the layout engine over it
pub struct DiagramRenderer {
    config: DiagramConfig,
}

impl DiagramRenderer {
    pub fn new(config: DiagramConfig) -> Self {
        Self { config }
    }

    /// Render `graph`, returning the path of the rendered file
    pub fn render(&self, graph: &InheritanceGraph) -> Result<PathBuf> {
        let format = &self.config.format;
        if !is_supported_format(format) {
            return Err(Error::render(format!("unsupported format: {}", format)));
        }

        std::fs::create_dir_all(&self.config.output_dir)?;
        let source = self.config.source_path();
        std::fs::write(&source, graph.to_dot())?;

        let output = self.config.rendered_path();
        tracing::debug!(
            engine = %self.config.engine,
            format = %format,
            output = %output.display(),
            "rendering diagram"
        );

        let result = Command::new(&self.config.engine)
            .arg(format!("-T{}", format))
            .arg("-o")
            .arg(&output)
            .arg(&source)
            .output()
            .map_err(|e| {
                Error::render(format!(
                    "failed to run `{}` (is Graphviz installed?): {}",
                    self.config.engine, e
                ))
            })?;

        if !result.status.success() {
            let stderr = String::from_utf8_lossy(&result.stderr);
            return Err(Error::render(format!(
                "`{}` exited with {}: {}",
                self.config.engine,
                result.status,
                stderr.trim()
            )));
        }

        Ok(output)
    }
}
