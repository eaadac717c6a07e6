//! Entry filtering: substring ignore patterns and reserved device names

use serde::{Deserialize, Serialize};

/// Ignore patterns applied to every scan unless the caller replaces them
pub const DEFAULT_IGNORE_PATTERNS: &[&str] = &[
    ".git",
    "__pycache__",
    ".venv",
    "node_modules",
    ".pytest_cache",
    ".mypy_cache",
];

const RESERVED_DEVICE_NAMES: &[&str] = &[
    "CON", "PRN", "AUX", "NUL", "COM1", "COM2", "COM3", "COM4", "COM5", "COM6", "COM7", "COM8",
    "COM9", "LPT1", "LPT2", "LPT3", "LPT4", "LPT5", "LPT6", "LPT7", "LPT8", "LPT9",
];

/// Describes the naming rules of the filesystem being scanned
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathNamingRules {
    /// Whether names like `CON` or `lpt1.txt` refer to devices and must be skipped
    pub reserved_device_names: bool,
}

impl PathNamingRules {
    /// Rules of the host the process runs on
    pub fn host() -> Self {
        Self {
            reserved_device_names: cfg!(windows),
        }
    }

    pub fn windows() -> Self {
        Self {
            reserved_device_names: true,
        }
    }

    pub fn posix() -> Self {
        Self {
            reserved_device_names: false,
        }
    }
}

impl Default for PathNamingRules {
    fn default() -> Self {
        Self::host()
    }
}

/// Decides which directory entries are left out of a scan
#[derive(Debug, Clone)]
pub struct IgnoreRules {
    patterns: Vec<String>,
    naming: PathNamingRules,
}

impl IgnoreRules {
    pub fn new(naming: PathNamingRules) -> Self {
        Self {
            patterns: DEFAULT_IGNORE_PATTERNS.iter().map(|p| p.to_string()).collect(),
            naming,
        }
    }

    /// Append extra substring patterns after the defaults
    pub fn extend<I, S>(&mut self, patterns: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.patterns.extend(patterns.into_iter().map(Into::into));
    }

    pub fn set_naming(&mut self, naming: PathNamingRules) {
        self.naming = naming;
    }

    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    pub fn naming(&self) -> PathNamingRules {
        self.naming
    }

    /// Reserved device name check, comparing the part before the first dot case-insensitively
    pub fn is_reserved_name(&self, name: &str) -> bool {
        if !self.naming.reserved_device_names {
            return false;
        }
        let stem = name.split('.').next().unwrap_or_default().to_uppercase();
        RESERVED_DEVICE_NAMES.contains(&stem.as_str())
    }

    pub fn is_ignored(&self, name: &str) -> bool {
        if self.is_reserved_name(name) {
            return true;
        }
        self.patterns
            .iter()
            .any(|pattern| name.contains(pattern.as_str()))
    }
}

impl Default for IgnoreRules {
    fn default() -> Self {
        Self::new(PathNamingRules::host())
    }
}
