/// Centralized error types for projviz using thiserror
///
/// Provides domain-specific error types for better error handling and user-facing messages.
use thiserror::Error;

/// Main error type for projviz
#[derive(Error, Debug)]
pub enum VizError {
    #[error("Scan error: {0}")]
    Scan(#[from] ScanError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Report error: {0}")]
    Report(#[from] ReportError),

    #[error("Content error: {0}")]
    Content(#[from] ContentError),
}

/// Errors related to validating the scan root
#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Root directory does not exist: {0}")]
    RootNotFound(String),

    #[error("Root path is not a directory: {0}")]
    NotADirectory(String),

    #[error("Failed to resolve path '{path}': {reason}")]
    ResolveFailed { path: String, reason: String },

    #[error("Failed to list directory '{path}': {reason}")]
    ListFailed { path: String, reason: String },
}

/// Errors related to configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load configuration file: {0}")]
    LoadFailed(String),

    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),

    #[error("Invalid configuration value for '{key}': {reason}")]
    InvalidValue { key: String, reason: String },

    #[error("Failed to save configuration: {0}")]
    SaveFailed(String),

    #[error("Configuration file not found: {0}")]
    FileNotFound(String),
}

/// Errors related to persisted scan reports
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("JSON file {0} not found. Run 'scan' first.")]
    NotFound(String),

    #[error("Failed to read report from '{path}': {reason}")]
    LoadFailed { path: String, reason: String },

    #[error("Failed to save report to '{path}': {reason}")]
    SaveFailed { path: String, reason: String },

    #[error("Failed to parse report: {0}")]
    ParseFailed(String),
}

/// Errors returned by the file content reader
#[derive(Error, Debug)]
pub enum ContentError {
    #[error("Missing path parameter")]
    MissingPath,

    #[error("Path outside project root: {0}")]
    OutsideRoot(String),

    #[error("File not found: {0}")]
    NotFound(String),

    #[error("Failed to read file '{path}': {reason}")]
    ReadFailed { path: String, reason: String },
}

impl VizError {
    /// Check if this is a user error (bad input, missing file) vs system error
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            VizError::Scan(ScanError::RootNotFound(_) | ScanError::NotADirectory(_))
                | VizError::Config(ConfigError::InvalidValue { .. })
                | VizError::Report(ReportError::NotFound(_))
                | VizError::Content(
                    ContentError::MissingPath
                        | ContentError::OutsideRoot(_)
                        | ContentError::NotFound(_)
                )
        )
    }
}

impl ContentError {
    /// HTTP-style status code a viewer should answer with
    pub fn status_code(&self) -> u16 {
        match self {
            ContentError::MissingPath => 400,
            ContentError::OutsideRoot(_) => 403,
            ContentError::NotFound(_) => 404,
            ContentError::ReadFailed { .. } => 500,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = VizError::Scan(ScanError::RootNotFound("/test".to_string()));
        assert_eq!(
            err.to_string(),
            "Scan error: Root directory does not exist: /test"
        );
    }

    #[test]
    fn test_is_user_error() {
        let user_err = VizError::Content(ContentError::OutsideRoot("../x".to_string()));
        assert!(user_err.is_user_error());

        let system_err = VizError::Scan(ScanError::ListFailed {
            path: "/srv/app".to_string(),
            reason: "Input/output error".to_string(),
        });
        assert!(!system_err.is_user_error());
    }

    #[test]
    fn test_content_status_codes() {
        assert_eq!(ContentError::MissingPath.status_code(), 400);
        assert_eq!(ContentError::OutsideRoot("x".into()).status_code(), 403);
        assert_eq!(ContentError::NotFound("x".into()).status_code(), 404);
        let failed = ContentError::ReadFailed {
            path: "x".into(),
            reason: "boom".into(),
        };
        assert_eq!(failed.status_code(), 500);
    }

    #[test]
    fn test_config_error_invalid_value() {
        let err = ConfigError::InvalidValue {
            key: "detection.max_source_files".to_string(),
            reason: "must be greater than 0".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid configuration value for 'detection.max_source_files': must be greater than 0"
        );
    }

    #[test]
    fn test_report_not_found_message() {
        let err = ReportError::NotFound("project_structure.json".to_string());
        assert_eq!(
            err.to_string(),
            "JSON file project_structure.json not found. Run 'scan' first."
        );
    }

    #[test]
    fn test_error_chain() {
        let content_err = ContentError::NotFound("src/missing.py".to_string());
        let viz_err: VizError = content_err.into();
        assert!(matches!(viz_err, VizError::Content(_)));
        assert_eq!(
            viz_err.to_string(),
            "Content error: File not found: src/missing.py"
        );
    }
}
