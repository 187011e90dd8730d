use crate::analysis::NamingConvention;
use crate::error::{Error, Result};
use crate::output::is_supported_format;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default config file looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "inherit-diff.toml";

/// Main configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub naming: NamingConvention,
    pub diagram: DiagramConfig,
    pub report: ReportConfig,
}

/// Diagram settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DiagramConfig {
    /// Graphviz output format (pdf, png, svg, ...)
    pub format: String,
    /// Layout engine executable
    pub engine: String,
    /// Directory the diagram files are written to
    pub output_dir: PathBuf,
    /// Base file name shared by the DOT source and the rendered file
    pub file_stem: String,
}

/// Text report settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    pub source_label: String,
    pub header_label: String,
}

impl Default for DiagramConfig {
    fn default() -> Self {
        Self {
            format: "pdf".to_string(),
            engine: "dot".to_string(),
            output_dir: PathBuf::from("."),
            file_stem: "class_inheritance_tree".to_string(),
        }
    }
}

impl DiagramConfig {
    /// Path of the DOT source file
    pub fn source_path(&self) -> PathBuf {
        self.output_dir.join(&self.file_stem)
    }

    /// File name of the rendered diagram, e.g. `class_inheritance_tree.pdf`
    pub fn rendered_file_name(&self) -> String {
        format!("{}.{}", self.file_stem, self.format)
    }

    /// Path of the rendered diagram
    pub fn rendered_path(&self) -> PathBuf {
        self.output_dir.join(self.rendered_file_name())
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            source_label: "Python".to_string(),
            header_label: "Node.js".to_string(),
        }
    }
}

impl Config {
    /// Load config from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load config from file or return defaults
    ///
    /// A missing file is the normal case and is silent; a file that exists
    /// but fails to load is logged and ignored.
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }
        match Self::load(path) {
            Ok(config) => config,
            Err(error) => {
                tracing::warn!(%error, path = %path.display(), "ignoring config file");
                Self::default()
            }
        }
    }

    /// Merge CLI arguments into config (CLI takes precedence)
    pub fn merge_cli(&mut self, format: Option<String>) {
        if let Some(fmt) = format {
            self.diagram.format = fmt;
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.naming.prefix.is_empty() {
            return Err(Error::config_validation("naming.prefix must not be empty"));
        }

        if self.naming.alias_root.is_empty() || self.naming.alias_target.is_empty() {
            return Err(Error::config_validation(
                "naming.alias_root and naming.alias_target must not be empty",
            ));
        }

        if !is_supported_format(&self.diagram.format) {
            return Err(Error::config_validation(format!(
                "diagram.format `{}` is not a Graphviz output format",
                self.diagram.format
            )));
        }

        if self.diagram.engine.trim().is_empty() {
            return Err(Error::config_validation("diagram.engine must not be empty"));
        }

        if self.diagram.file_stem.is_empty() || self.diagram.file_stem.contains(['/', '\\']) {
            return Err(Error::config_validation(
                "diagram.file_stem must be a plain file name",
            ));
        }

        Ok(())
    }
}
