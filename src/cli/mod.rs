//! CLI argument definitions.

mod commands;

pub use commands::{listing_line, run};

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("GIT_COMMIT_HASH"),
    ", built ",
    env!("BUILD_TIMESTAMP"),
    ")"
);

/// Project VizTree - Python project structure visualizer
#[derive(Debug, Parser)]
#[command(name = "projviz", version, long_version = LONG_VERSION)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file (defaults to the platform config directory)
    #[arg(long, global = true, env = "PROJVIZ_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Scan project structure and generate JSON output
    Scan(ScanArgs),
    /// Show metadata, framework details and totals of a saved scan
    Info(InfoArgs),
    /// Print the bounded text content of one project file as JSON
    File(FileArgs),
}

#[derive(Debug, Args)]
pub struct ScanArgs {
    /// Path to the project directory
    #[arg(long, default_value = ".")]
    pub path: PathBuf,

    /// Output JSON file name
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Print all files and folders in sorted order while scanning
    #[arg(long = "list")]
    pub list: bool,

    /// Additional ignore patterns (can be repeated)
    #[arg(long = "ignore")]
    pub ignore: Vec<String>,
}

#[derive(Debug, Args)]
pub struct InfoArgs {
    /// JSON file with project structure
    #[arg(short = 'j', long = "json-file")]
    pub json_file: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct FileArgs {
    /// JSON file with project structure
    #[arg(short = 'j', long = "json-file")]
    pub json_file: Option<PathBuf>,

    /// File path relative to the project root
    pub path: String,

    /// Maximum number of bytes to return
    #[arg(long)]
    pub max_bytes: Option<usize>,
}
