/// Centralized platform-specific path computation
///
/// Provides consistent path handling across Windows, macOS, and Linux following
/// XDG Base Directory conventions on Unix-like systems, plus the helpers that
/// turn host paths into the POSIX-style relative paths stored in scan reports.
use crate::error::ScanError;
use std::path::{Component, Path, PathBuf};

/// Platform-agnostic path utilities
pub struct PlatformPaths;

impl PlatformPaths {
    /// Get the appropriate config directory for the current platform
    ///
    /// - Windows: %APPDATA%
    /// - macOS: ~/Library/Application Support
    /// - Linux/Unix: $XDG_CONFIG_HOME or ~/.config
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            std::env::var("APPDATA")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("."))
        } else if cfg!(target_os = "macos") {
            std::env::var("HOME")
                .map(|home| PathBuf::from(home).join("Library/Application Support"))
                .unwrap_or_else(|_| PathBuf::from("."))
        } else {
            // Linux/Unix - follow XDG Base Directory conventions
            std::env::var("XDG_CONFIG_HOME")
                .map(PathBuf::from)
                .or_else(|_| std::env::var("HOME").map(|home| PathBuf::from(home).join(".config")))
                .unwrap_or_else(|_| PathBuf::from("."))
        }
    }

    /// Returns: {config_dir}/projviz
    pub fn project_config_dir() -> PathBuf {
        Self::config_dir().join("projviz")
    }

    /// Returns: {config_dir}/projviz/config.toml
    pub fn default_config_path() -> PathBuf {
        Self::project_config_dir().join("config.toml")
    }
}

/// Resolve a path to its absolute, symlink-free form
pub fn resolve(path: &Path) -> Result<PathBuf, ScanError> {
    std::fs::canonicalize(path).map_err(|e| ScanError::ResolveFailed {
        path: path.display().to_string(),
        reason: e.to_string(),
    })
}

/// Collapse `.` and `..` components without touching the filesystem.
///
/// `..` never climbs above the path's root, so the result works for prefix
/// checks on paths that may not exist yet.
pub fn normalize_lexically(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                let last_is_normal = matches!(
                    normalized.components().next_back(),
                    Some(Component::Normal(_))
                );
                if last_is_normal {
                    normalized.pop();
                } else if !normalized.has_root() {
                    normalized.push("..");
                }
            }
            other => normalized.push(other),
        }
    }
    normalized
}

/// Base name of a resolved directory, used as the display name of a scan root.
///
/// Filesystem roots have no base name; their full display form is used instead.
pub fn display_name(resolved: &Path) -> String {
    resolved
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| resolved.display().to_string())
}

/// Append one entry name to a POSIX relative path
pub fn join_posix(parent: &str, name: &str) -> String {
    if parent.is_empty() {
        name.to_string()
    } else {
        format!("{}/{}", parent, name)
    }
}
