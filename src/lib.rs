//! # projviz - Project Structure Scanner and Framework Detector
//!
//! Walks a local project directory, builds an ordered tree of its folders and
//! files, and heuristically classifies which Python web framework the project
//! uses. The result is a JSON [`ScanReport`](report::ScanReport) that a viewer
//! can render.
//!
//! ## Overview
//!
//! - **Tree scanning**: depth-first, folders before files, case-insensitive
//!   name order, substring ignore patterns, POSIX relative paths
//! - **Framework detection**: characteristic files, then directories, then
//!   dependency manifests, then a shallow regex search over source files
//! - **Reports**: JSON persistence with `{metadata, tree}` shape
//! - **Content reads**: size-capped file reads confined to the project root
//!
//! ## Modules
//!
//! - [`scanner`]: Tree scanner, nodes, and ignore rules
//! - [`detector`]: Framework detection strategies and metadata
//! - [`report`]: Scan aggregation, statistics, and persistence
//! - [`content`]: Bounded file content reader
//! - [`config`]: Configuration management with environment variable support
//! - [`error`]: Error types
//! - [`paths`]: Platform paths and POSIX path helpers
//! - [`cli`]: Command-line interface
//!
//! ## Usage Example
//!
//! ```no_run
//! use projviz::report::ProjectScan;
//!
//! fn main() -> anyhow::Result<()> {
//!     let outcome = ProjectScan::new(".").run()?;
//!     println!(
//!         "{} nodes, framework: {}",
//!         outcome.node_count, outcome.report.metadata.framework
//!     );
//!     outcome.report.save("project_structure.json".as_ref())?;
//!     Ok(())
//! }
//! ```

/// Command-line interface definitions and command execution
pub mod cli;

/// Configuration management with environment variable overrides
pub mod config;

/// Size-capped reads of individual project files
pub mod content;

/// Heuristic Python web framework detection
pub mod detector;

/// Error types and utilities
pub mod error;

/// Platform config paths and POSIX path helpers
pub mod paths;

/// Scan report aggregation and JSON persistence
pub mod report;

/// Recursive project tree scanning
pub mod scanner;
