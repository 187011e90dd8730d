//! CLI argument parsing

use clap::Parser;
use std::path::PathBuf;

/// Check Python class inheritance against a C++ wrapper header
#[derive(Parser, Debug)]
#[command(name = "inherit-diff")]
#[command(about = "Check Python class inheritance against a C++ wrapper header")]
#[command(version)]
pub struct Args {
    /// Python source file
    pub python_file: PathBuf,

    /// C++ wrapper header file
    pub header_file: PathBuf,

    /// Generate inheritance diagram
    #[arg(long)]
    pub diagram: bool,

    /// Format for diagram (e.g. pdf, png, svg)
    #[arg(long)]
    pub format: Option<String>,

    /// Print the report as JSON
    #[arg(long)]
    pub json: bool,

    /// Config file path
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    pub fn parse_args() -> Self {
        Parser::parse()
    }
}
