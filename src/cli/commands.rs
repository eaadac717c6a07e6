//! Command execution for the `projviz` binary

use super::{Cli, Command, FileArgs, InfoArgs, ScanArgs};
use crate::config::Config;
use crate::content::read_file_content;
use crate::detector::FrameworkId;
use crate::error::VizError;
use crate::report::{ProjectScan, ScanReport, TreeStats};
use crate::scanner::NodeKind;
use anyhow::{Context, Result};
use std::path::PathBuf;
use std::time::Instant;

/// Execute a parsed command line
pub fn run(cli: Cli) -> Result<()> {
    let config = Config::load(cli.config.as_deref()).context("Failed to load configuration")?;

    match cli.command {
        Command::Scan(args) => scan(args, &config),
        Command::Info(args) => info(args, &config),
        Command::File(args) => file(args, &config),
    }
}

/// One line of the `--list` output: `=folder` or `-file`, indented two spaces per level
pub fn listing_line(kind: NodeKind, label: &str, depth: usize) -> String {
    let marker = match kind {
        NodeKind::Folder => '=',
        NodeKind::File => '-',
    };
    let name = label.rsplit('/').next().unwrap_or(label);
    format!("{}{}{}", "  ".repeat(depth), marker, name)
}

fn scan(args: ScanArgs, config: &Config) -> Result<()> {
    let started = Instant::now();
    let output = args
        .output
        .unwrap_or_else(|| config.output.default_output.clone());

    let project = ProjectScan::from_config(&args.path, config).with_ignore_patterns(args.ignore);
    let outcome = if args.list {
        project.run_with(&mut |kind, label, depth| println!("{}", listing_line(kind, label, depth)))
    } else {
        project.run()
    }
    .context("Error scanning project")?;
    let duration_ms = started.elapsed().as_millis();

    let report = &outcome.report;
    report.save(&output)?;

    println!("Project structure saved to {}", output.display());
    println!("Detected framework: {}", report.metadata.framework);
    println!("Project name: {}", report.metadata.project_name);
    println!(
        "{}, duration={}ms",
        summary_line(&report.stats()),
        duration_ms
    );
    Ok(())
}

fn info(args: InfoArgs, config: &Config) -> Result<()> {
    let json_file = report_path(args.json_file, config);
    let report = ScanReport::load(&json_file)?;
    let metadata = &report.metadata;
    let framework = FrameworkId::from_identifier(&metadata.framework);
    let details = framework.info();

    println!("Project name: {}", metadata.project_name);
    println!("Framework: {} ({})", details.name, framework);
    println!("Description: {}", details.description);
    if !details.website.is_empty() {
        println!("Website: {}", details.website);
    }
    println!("Scan date: {}", metadata.scan_date);
    if let Some(root) = &metadata.root_path {
        println!("Root path: {}", root);
    }
    println!("{}", summary_line(&report.stats()));
    Ok(())
}

fn file(args: FileArgs, config: &Config) -> Result<()> {
    let json_file = report_path(args.json_file, config);
    let report = ScanReport::load(&json_file)?;
    let root = report.project_root(&json_file);
    let max_bytes = args.max_bytes.unwrap_or(config.output.max_file_bytes);

    let content = read_file_content(&root, &args.path, max_bytes).map_err(VizError::from)?;
    let json = serde_json::to_string_pretty(&content).context("Failed to serialize content")?;
    println!("{}", json);
    Ok(())
}

fn report_path(json_file: Option<PathBuf>, config: &Config) -> PathBuf {
    json_file.unwrap_or_else(|| config.output.default_output.clone())
}

fn summary_line(stats: &TreeStats) -> String {
    format!(
        "Scan report: nodes={} (folders={}, files={}), root_children={}",
        stats.total, stats.folders, stats.files, stats.root_children
    )
}
