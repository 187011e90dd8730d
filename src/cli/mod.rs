//! CLI module for inherit-diff

mod args;

pub use args::Args;

use crate::analysis::Analyzer;
use crate::config::{Config, DEFAULT_CONFIG_FILE};
use crate::error::Result;
use crate::output::{render_json, render_text, DiagramRenderer, InheritanceGraph};
use std::path::Path;
use std::process::ExitCode;

/// Environment variable holding a tracing filter
pub const LOG_ENV: &str = "INHERIT_DIFF_LOG";

/// Run the CLI application
pub fn run() -> ExitCode {
    let args = Args::parse_args();
    init_tracing(args.verbose);

    match execute(args) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: bool) {
    let level = if verbose { "debug" } else { "warn" };
    let filter = tracing_subscriber::EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    // Logs go to stderr; stdout carries the report
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn execute(args: Args) -> Result<()> {
    // An explicit config must load; the default one is optional
    let mut cfg = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::load_or_default(Path::new(DEFAULT_CONFIG_FILE)),
    };
    cfg.merge_cli(args.format);

    tracing::debug!(
        python = %args.python_file.display(),
        header = %args.header_file.display(),
        prefix = %cfg.naming.prefix,
        "comparing class inheritance"
    );

    let mut analyzer = Analyzer::new(cfg.clone())?;
    let analysis = analyzer.analyze(&args.python_file, &args.header_file)?;

    if args.json {
        println!("{}", render_json(&analysis)?);
    } else {
        println!("{}", render_text(&analysis.mismatches, &cfg.report));
    }

    if args.diagram {
        let graph = InheritanceGraph::from_classes(&analysis.classes);
        let renderer = DiagramRenderer::new(cfg.diagram.clone());
        renderer.render(&graph)?;
        println!(
            "Class inheritance tree generated and saved as '{}'",
            cfg.diagram.rendered_file_name()
        );
    }

    Ok(())
}
