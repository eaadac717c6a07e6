/// Configuration system for projviz
///
/// Supports loading from multiple sources with priority:
/// CLI args > Environment variables > Config file > Defaults
use crate::content::DEFAULT_MAX_FILE_BYTES;
use crate::detector::DEFAULT_MAX_SOURCE_FILES;
use crate::error::{ConfigError, VizError};
use crate::scanner::PathNamingRules;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Tree scanning configuration
    #[serde(default)]
    pub scan: ScanConfig,

    /// Framework detection configuration
    #[serde(default)]
    pub detection: DetectionConfig,

    /// Report output configuration
    #[serde(default)]
    pub output: OutputConfig,
}

/// Tree scanning configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanConfig {
    /// Ignore patterns appended to the built-in defaults
    #[serde(default)]
    pub extra_ignore_patterns: Vec<String>,

    /// Skip Windows reserved device names (CON, NUL, COM1, ...)
    #[serde(default = "default_reserved_device_names")]
    pub reserved_device_names: bool,
}

/// Framework detection configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectionConfig {
    /// Maximum number of source files read by the pattern strategy
    #[serde(default = "default_max_source_files")]
    pub max_source_files: usize,

    /// Extensions (without the dot) treated as source files
    #[serde(default = "default_source_extensions")]
    pub source_extensions: Vec<String>,
}

/// Report output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Default report file written by `scan` and read by `info`/`file`
    #[serde(default = "default_output")]
    pub default_output: PathBuf,

    /// Maximum bytes returned when reading a project file
    #[serde(default = "default_max_file_bytes")]
    pub max_file_bytes: usize,
}

// Default value functions
fn default_reserved_device_names() -> bool {
    PathNamingRules::host().reserved_device_names
}

fn default_max_source_files() -> usize {
    DEFAULT_MAX_SOURCE_FILES
}

fn default_source_extensions() -> Vec<String> {
    vec!["py".to_string()]
}

fn default_output() -> PathBuf {
    PathBuf::from("project_structure.json")
}

fn default_max_file_bytes() -> usize {
    DEFAULT_MAX_FILE_BYTES
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            extra_ignore_patterns: Vec::new(),
            reserved_device_names: default_reserved_device_names(),
        }
    }
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            max_source_files: default_max_source_files(),
            source_extensions: default_source_extensions(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            default_output: default_output(),
            max_file_bytes: default_max_file_bytes(),
        }
    }
}

impl ScanConfig {
    pub fn naming_rules(&self) -> PathNamingRules {
        PathNamingRules {
            reserved_device_names: self.reserved_device_names,
        }
    }
}

impl Config {
    /// Load and validate configuration from file
    pub fn from_file(path: &Path) -> Result<Self, VizError> {
        let config = Self::read_file(path)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse a config file without validating it
    fn read_file(path: &Path) -> Result<Self, VizError> {
        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.display().to_string()).into());
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::LoadFailed(format!("Failed to read config file: {}", e)))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| ConfigError::ParseFailed(format!("Invalid TOML: {}", e)))?;

        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self, path: &Path) -> Result<(), VizError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                ConfigError::SaveFailed(format!("Failed to create config directory: {}", e))
            })?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::SaveFailed(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, content)
            .map_err(|e| ConfigError::SaveFailed(format!("Failed to write config file: {}", e)))?;

        tracing::info!("Saved config to: {}", path.display());
        Ok(())
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), VizError> {
        if self.detection.max_source_files == 0 {
            return Err(ConfigError::InvalidValue {
                key: "detection.max_source_files".to_string(),
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }

        if self.detection.source_extensions.is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "detection.source_extensions".to_string(),
                reason: "must list at least one extension".to_string(),
            }
            .into());
        }

        if let Some(ext) = self
            .detection
            .source_extensions
            .iter()
            .find(|ext| ext.is_empty() || ext.starts_with('.'))
        {
            return Err(ConfigError::InvalidValue {
                key: "detection.source_extensions".to_string(),
                reason: format!("extensions are given without a leading dot, got '{}'", ext),
            }
            .into());
        }

        if self.scan.extra_ignore_patterns.iter().any(String::is_empty) {
            return Err(ConfigError::InvalidValue {
                key: "scan.extra_ignore_patterns".to_string(),
                reason: "an empty pattern would ignore every entry".to_string(),
            }
            .into());
        }

        if self.output.max_file_bytes == 0 {
            return Err(ConfigError::InvalidValue {
                key: "output.max_file_bytes".to_string(),
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }

        Ok(())
    }

    /// Apply environment variable overrides
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Apply `PROJVIZ_*` overrides, looking each key up through `lookup`
    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        // Comma-separated, appended to the file's patterns
        if let Some(patterns) = lookup("PROJVIZ_IGNORE") {
            self.scan.extra_ignore_patterns.extend(
                patterns
                    .split(',')
                    .map(str::trim)
                    .filter(|p| !p.is_empty())
                    .map(String::from),
            );
        }

        if let Some(value) = lookup("PROJVIZ_RESERVED_NAMES")
            && let Ok(enabled) = value.parse()
        {
            self.scan.reserved_device_names = enabled;
        }

        if let Some(value) = lookup("PROJVIZ_MAX_SOURCE_FILES")
            && let Ok(max) = value.parse()
        {
            self.detection.max_source_files = max;
        }

        if let Some(output) = lookup("PROJVIZ_OUTPUT") {
            self.output.default_output = PathBuf::from(output);
        }

        if let Some(value) = lookup("PROJVIZ_MAX_FILE_BYTES")
            && let Ok(max) = value.parse()
        {
            self.output.max_file_bytes = max;
        }
    }

    /// Load an explicit config file, falling back to the default location.
    ///
    /// Environment overrides apply before validation, so an override can fix
    /// a value the file alone gets wrong.
    pub fn load(path: Option<&Path>) -> Result<Self, VizError> {
        Self::load_with(path, |key| std::env::var(key).ok())
    }

    fn load_with(
        path: Option<&Path>,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, VizError> {
        let mut config = match path {
            Some(path) => Self::read_file(path)?,
            None => {
                let default_path = crate::paths::PlatformPaths::default_config_path();
                if default_path.exists() {
                    tracing::info!("Loading config from: {}", default_path.display());
                    Self::read_file(&default_path)?
                } else {
                    Self::default()
                }
            }
        };
        config.apply_overrides(lookup);
        config.validate()?;
        Ok(config)
    }
}
