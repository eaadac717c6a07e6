//! Scan reports: aggregation, statistics, and JSON persistence
//!
//! A [`ScanReport`] is the de facto file format written by `projviz scan` and
//! read by any viewer, so its JSON shape must stay
//! `{metadata: {project_name, framework, scan_date, root_path}, tree}`.

use crate::config::Config;
use crate::detector::{Detection, FrameworkDetector};
use crate::error::{ReportError, VizError};
use crate::paths;
use crate::scanner::{Node, PathNamingRules, ScanObserver, TreeScanner};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Metadata block of a scan report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportMetadata {
    pub project_name: String,
    /// Detector identifier, `"unknown"` when nothing matched
    pub framework: String,
    /// Local time of the scan, ISO-8601 without offset
    pub scan_date: String,
    /// Absolute, resolved scan root; older reports may lack it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root_path: Option<String>,
}

/// Aggregate output of one scan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanReport {
    pub metadata: ReportMetadata,
    pub tree: Node,
}

impl ScanReport {
    /// Load a report from disk
    pub fn load(path: &Path) -> Result<Self, VizError> {
        if !path.exists() {
            return Err(ReportError::NotFound(path.display().to_string()).into());
        }

        let content = fs::read_to_string(path).map_err(|e| ReportError::LoadFailed {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

        let report: ScanReport = serde_json::from_str(&content)
            .map_err(|e| ReportError::ParseFailed(e.to_string()))?;

        tracing::info!(
            "Loaded report: name={} framework={}",
            report.metadata.project_name,
            report.metadata.framework
        );
        Ok(report)
    }

    /// Save the report as pretty-printed JSON
    pub fn save(&self, path: &Path) -> Result<(), VizError> {
        let save_failed = |reason: String| ReportError::SaveFailed {
            path: path.display().to_string(),
            reason,
        };

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|e| save_failed(e.to_string()))?;
        }

        let content = serde_json::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        fs::write(path, content).map_err(|e| save_failed(e.to_string()))?;

        tracing::debug!("Saved report to {:?}", path);
        Ok(())
    }

    /// Root directory that file paths in the tree are relative to.
    ///
    /// Falls back to the report file's own directory when the metadata has no root.
    pub fn project_root(&self, report_path: &Path) -> PathBuf {
        match &self.metadata.root_path {
            Some(root) => PathBuf::from(root),
            None => report_path
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| PathBuf::from(".")),
        }
    }

    pub fn stats(&self) -> TreeStats {
        TreeStats::from_tree(&self.tree)
    }
}

/// Folder and file totals derived by walking a tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct TreeStats {
    pub folders: usize,
    /// Every node that is not a folder
    pub files: usize,
    pub total: usize,
    pub root_children: usize,
}

impl TreeStats {
    pub fn from_tree(tree: &Node) -> Self {
        let mut stats = TreeStats {
            root_children: tree.children().len(),
            ..Default::default()
        };
        tree.walk(&mut |node| {
            if node.is_folder() {
                stats.folders += 1;
            } else {
                stats.files += 1;
            }
        });
        stats.total = stats.folders + stats.files;
        stats
    }
}

/// Everything produced by one [`ProjectScan::run_with`] call
#[derive(Debug, Clone)]
pub struct ScanOutcome {
    pub report: ScanReport,
    /// Nodes constructed by the scanner
    pub node_count: usize,
    pub detection: Detection,
}

/// Runs the tree scanner and framework detector against one root
pub struct ProjectScan {
    root: PathBuf,
    extra_ignore_patterns: Vec<String>,
    naming: PathNamingRules,
    max_source_files: Option<usize>,
    source_extensions: Option<Vec<String>>,
}

impl ProjectScan {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            extra_ignore_patterns: Vec::new(),
            naming: PathNamingRules::host(),
            max_source_files: None,
            source_extensions: None,
        }
    }

    /// Scan settings taken from a loaded [`Config`]
    pub fn from_config(root: impl AsRef<Path>, config: &Config) -> Self {
        Self::new(root)
            .with_ignore_patterns(config.scan.extra_ignore_patterns.clone())
            .with_naming_rules(config.scan.naming_rules())
            .with_detector_settings(
                config.detection.max_source_files,
                config.detection.source_extensions.clone(),
            )
    }

    pub fn with_ignore_patterns<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extra_ignore_patterns
            .extend(patterns.into_iter().map(Into::into));
        self
    }

    pub fn with_naming_rules(mut self, naming: PathNamingRules) -> Self {
        self.naming = naming;
        self
    }

    pub fn with_detector_settings(mut self, max_source_files: usize, extensions: Vec<String>) -> Self {
        self.max_source_files = Some(max_source_files);
        self.source_extensions = Some(extensions);
        self
    }

    pub fn run(&self) -> Result<ScanOutcome, VizError> {
        self.run_with(&mut |_, _, _| {})
    }

    /// Scan the tree (announcing nodes to `observer`), then detect the framework
    pub fn run_with(&self, observer: &mut ScanObserver<'_>) -> Result<ScanOutcome, VizError> {
        let mut scanner = TreeScanner::new(&self.root)
            .with_naming_rules(self.naming)
            .with_ignore_patterns(self.extra_ignore_patterns.iter().cloned());
        let (tree, node_count) = scanner.generate_tree_with(observer)?;

        let mut detector = FrameworkDetector::new(&self.root);
        if let Some(max) = self.max_source_files {
            detector = detector.with_max_source_files(max);
        }
        if let Some(extensions) = &self.source_extensions {
            detector = detector.with_source_extensions(extensions.clone());
        }
        let detection = detector.detect();

        let resolved = paths::resolve(&self.root)?;
        let metadata = ReportMetadata {
            project_name: paths::display_name(&resolved),
            framework: detection.framework.as_str().to_string(),
            scan_date: chrono::Local::now()
                .format("%Y-%m-%dT%H:%M:%S%.6f")
                .to_string(),
            root_path: Some(resolved.to_string_lossy().to_string()),
        };

        Ok(ScanOutcome {
            report: ScanReport { metadata, tree },
            node_count,
            detection,
        })
    }
}

/// Scan a project with default settings
pub fn scan_project(root: impl AsRef<Path>) -> Result<ScanReport, VizError> {
    Ok(ProjectScan::new(root).run()?.report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detector::{DetectionStrategy, FrameworkId};
    use crate::scanner::NodeKind;
    use tempfile::TempDir;

    fn sample_project() -> TempDir {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("manage.py"), "import django").unwrap();
        fs::create_dir(temp_dir.path().join("blog")).unwrap();
        fs::write(temp_dir.path().join("blog").join("models.py"), "").unwrap();
        fs::write(temp_dir.path().join("blog").join("views.py"), "").unwrap();
        temp_dir
    }

    #[test]
    fn test_scan_project_metadata() {
        let temp_dir = sample_project();
        let report = scan_project(temp_dir.path()).unwrap();

        let resolved = fs::canonicalize(temp_dir.path()).unwrap();
        assert_eq!(report.metadata.framework, "django");
        assert_eq!(
            report.metadata.project_name,
            resolved.file_name().unwrap().to_string_lossy()
        );
        assert_eq!(
            report.metadata.root_path,
            Some(resolved.to_string_lossy().to_string())
        );
        assert!(chrono::NaiveDateTime::parse_from_str(
            &report.metadata.scan_date,
            "%Y-%m-%dT%H:%M:%S%.f"
        )
        .is_ok());
        assert_eq!(report.tree.value, report.metadata.project_name);
    }

    #[test]
    fn test_run_reports_count_and_strategy() {
        let temp_dir = sample_project();
        let outcome = ProjectScan::new(temp_dir.path()).run().unwrap();
        assert_eq!(outcome.node_count, 5);
        assert_eq!(outcome.detection.framework, FrameworkId::Django);
        assert_eq!(outcome.detection.strategy, Some(DetectionStrategy::Files));
        assert_eq!(outcome.report.stats().total, outcome.node_count);
    }

    #[test]
    fn test_rescan_differs_only_in_timestamp() {
        let temp_dir = sample_project();
        let first = scan_project(temp_dir.path()).unwrap();
        let mut second = scan_project(temp_dir.path()).unwrap();
        second.metadata.scan_date = first.metadata.scan_date.clone();
        assert_eq!(first, second);
    }

    #[test]
    fn test_run_with_observer() {
        let temp_dir = sample_project();
        let mut kinds = Vec::new();
        ProjectScan::new(temp_dir.path())
            .run_with(&mut |kind, _, _| kinds.push(kind))
            .unwrap();
        assert_eq!(
            kinds,
            vec![
                NodeKind::Folder,
                NodeKind::Folder,
                NodeKind::File,
                NodeKind::File,
                NodeKind::File
            ]
        );
    }

    #[test]
    fn test_from_config_applies_ignore_patterns() {
        let temp_dir = sample_project();
        let mut config = Config::default();
        config.scan.extra_ignore_patterns = vec!["blog".to_string()];

        let outcome = ProjectScan::from_config(temp_dir.path(), &config)
            .run()
            .unwrap();
        assert_eq!(outcome.node_count, 2);
    }

    #[test]
    fn test_scan_missing_root_fails() {
        let err = scan_project("/nonexistent/path/12345").unwrap_err();
        assert!(err.is_user_error());
        assert!(matches!(
            err,
            VizError::Scan(crate::error::ScanError::RootNotFound(_))
        ));
    }

    #[test]
    fn test_tree_stats() {
        let temp_dir = sample_project();
        let report = scan_project(temp_dir.path()).unwrap();
        let stats = report.stats();
        assert_eq!(
            stats,
            TreeStats {
                folders: 2,
                files: 3,
                total: 5,
                root_children: 2,
            }
        );
    }

    #[test]
    fn test_save_load() {
        let temp_dir = sample_project();
        let report = scan_project(temp_dir.path()).unwrap();

        let out_dir = TempDir::new().unwrap();
        let path = out_dir.path().join("reports").join("project_structure.json");
        report.save(&path).unwrap();

        let loaded = ScanReport::load(&path).unwrap();
        assert_eq!(loaded, report);
    }

    #[test]
    fn test_saved_json_shape() {
        let temp_dir = sample_project();
        let report = scan_project(temp_dir.path()).unwrap();
        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(json["metadata"]["framework"], "django");
        assert!(json["metadata"]["root_path"].is_string());
        assert_eq!(json["tree"]["type"], "folder");
        assert_eq!(json["tree"]["path"], "");
        assert_eq!(json["tree"]["data"][0]["value"], "blog");
        assert_eq!(json["tree"]["data"][0]["data"][0]["path"], "blog/models.py");
        assert!(json["tree"]["data"][1].get("data").is_none());
    }

    #[test]
    fn test_load_missing_report() {
        let err = ScanReport::load(Path::new("/nonexistent/project_structure.json")).unwrap_err();
        assert!(matches!(err, VizError::Report(ReportError::NotFound(_))));
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn test_load_report_without_root_path() {
        let out_dir = TempDir::new().unwrap();
        let path = out_dir.path().join("legacy.json");
        fs::write(
            &path,
            r#"{
                "metadata": {"project_name": "test_project", "framework": "unknown", "scan_date": "2023-01-01T00:00:00"},
                "tree": {"id": "0", "value": "test_project", "type": "folder", "path": "", "data": []}
            }"#,
        )
        .unwrap();

        let report = ScanReport::load(&path).unwrap();
        assert!(report.metadata.root_path.is_none());
        assert_eq!(report.project_root(&path), out_dir.path());
        assert_eq!(report.stats().total, 1);
    }

    #[test]
    fn test_load_invalid_json() {
        let out_dir = TempDir::new().unwrap();
        let path = out_dir.path().join("broken.json");
        fs::write(&path, "{not json").unwrap();

        let err = ScanReport::load(&path).unwrap_err();
        assert!(matches!(err, VizError::Report(ReportError::ParseFailed(_))));
    }
}
