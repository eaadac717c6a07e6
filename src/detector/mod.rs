//! Heuristic Python web framework detection
//!
//! Runs four strategies against a project root in a fixed order and returns
//! the first hit:
//!
//! 1. characteristic files directly under the root
//! 2. characteristic directories directly under the root
//! 3. framework names inside dependency manifests
//! 4. regex search over the first few source files

mod framework;

pub use framework::{
    FrameworkId, FrameworkInfo, IndicatorSet, framework_info, framework_info_for, indicator_sets,
};

use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Manifests searched by the dependency strategy, in order
pub const DEPENDENCY_MANIFESTS: &[&str] = &["requirements.txt", "pyproject.toml", "setup.py"];

/// Default cap on source files read by the pattern strategy
pub const DEFAULT_MAX_SOURCE_FILES: usize = 10;

/// Which strategy produced a detection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetectionStrategy {
    Files,
    Directories,
    Dependencies,
    SourcePatterns,
}

impl DetectionStrategy {
    pub const ORDER: [DetectionStrategy; 4] = [
        DetectionStrategy::Files,
        DetectionStrategy::Directories,
        DetectionStrategy::Dependencies,
        DetectionStrategy::SourcePatterns,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DetectionStrategy::Files => "files",
            DetectionStrategy::Directories => "directories",
            DetectionStrategy::Dependencies => "dependencies",
            DetectionStrategy::SourcePatterns => "source patterns",
        }
    }
}

/// Result of running the strategy cascade
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Detection {
    pub framework: FrameworkId,
    /// `None` when nothing matched
    pub strategy: Option<DetectionStrategy>,
}

pub struct FrameworkDetector {
    pub(crate) root: PathBuf,
    pub(crate) max_source_files: usize,
    pub(crate) source_extensions: Vec<String>,
}

impl FrameworkDetector {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            max_source_files: DEFAULT_MAX_SOURCE_FILES,
            source_extensions: vec!["py".to_string()],
        }
    }

    pub fn with_max_source_files(mut self, max_source_files: usize) -> Self {
        self.max_source_files = max_source_files;
        self
    }

    pub fn with_source_extensions(mut self, extensions: Vec<String>) -> Self {
        self.source_extensions = extensions;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Run every strategy in priority order and return the framework identifier
    pub fn detect_framework(&self) -> FrameworkId {
        self.detect().framework
    }

    /// Run every strategy in priority order, reporting which one matched
    pub fn detect(&self) -> Detection {
        for strategy in DetectionStrategy::ORDER {
            if let Some(framework) = self.run_strategy(strategy) {
                tracing::info!("Detected {} by {}", framework, strategy.as_str());
                return Detection {
                    framework,
                    strategy: Some(strategy),
                };
            }
        }

        tracing::info!("No framework detected under {:?}", self.root);
        Detection {
            framework: FrameworkId::Unknown,
            strategy: None,
        }
    }

    pub fn run_strategy(&self, strategy: DetectionStrategy) -> Option<FrameworkId> {
        match strategy {
            DetectionStrategy::Files => self.detect_by_files(),
            DetectionStrategy::Directories => self.detect_by_directories(),
            DetectionStrategy::Dependencies => self.detect_by_dependencies(),
            DetectionStrategy::SourcePatterns => self.detect_by_code_analysis(),
        }
    }

    /// First framework with any characteristic file directly under the root
    pub fn detect_by_files(&self) -> Option<FrameworkId> {
        indicator_sets()
            .iter()
            .find(|set| set.files.iter().any(|name| self.root.join(name).exists()))
            .map(|set| set.framework)
    }

    /// First framework with any characteristic subdirectory directly under the root
    pub fn detect_by_directories(&self) -> Option<FrameworkId> {
        indicator_sets()
            .iter()
            .find(|set| {
                set.directories
                    .iter()
                    .any(|name| self.root.join(name).is_dir())
            })
            .map(|set| set.framework)
    }

    /// Search manifests for a framework name; the first manifest with any hit wins
    pub fn detect_by_dependencies(&self) -> Option<FrameworkId> {
        for manifest in DEPENDENCY_MANIFESTS {
            let path = self.root.join(manifest);
            if !path.is_file() {
                continue;
            }

            let content = match fs::read_to_string(&path) {
                Ok(content) => content.to_lowercase(),
                Err(e) => {
                    tracing::debug!("Skipping unreadable manifest {:?}: {}", path, e);
                    continue;
                }
            };

            let hit = FrameworkId::DETECTABLE
                .into_iter()
                .find(|framework| content.contains(framework.as_str()));
            if hit.is_some() {
                tracing::debug!("Dependency match in {}", manifest);
                return hit;
            }
        }
        None
    }

    /// Regex search over the first `max_source_files` source files.
    ///
    /// Nesting is framework, then pattern, then file; the first match wins.
    pub fn detect_by_code_analysis(&self) -> Option<FrameworkId> {
        let sources: Vec<String> = self
            .source_files()
            .into_iter()
            .filter_map(|path| match fs::read_to_string(&path) {
                Ok(content) => Some(content),
                Err(e) => {
                    tracing::debug!("Skipping unreadable source {:?}: {}", path, e);
                    None
                }
            })
            .collect();

        indicator_sets()
            .iter()
            .find(|set| {
                set.patterns
                    .iter()
                    .any(|pattern| sources.iter().any(|content| pattern.is_match(content)))
            })
            .map(|set| set.framework)
    }

    /// Source files anywhere under the root in sorted walk order, capped at
    /// `max_source_files`.
    ///
    /// The tree scanner's ignore patterns do not apply here: a framework import
    /// under `.venv/` or `.github/` still counts as a signal.
    pub fn source_files(&self) -> Vec<PathBuf> {
        WalkDir::new(&self.root)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_file() && self.has_source_extension(entry.path()))
            .take(self.max_source_files)
            .map(|entry| entry.into_path())
            .collect()
    }

    fn has_source_extension(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| self.source_extensions.iter().any(|s| s == ext))
    }
}
