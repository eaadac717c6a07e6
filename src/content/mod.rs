//! Bounded reads of individual project files for viewers

use crate::error::ContentError;
use crate::paths;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Read;
use std::path::Path;

/// Default cap on returned content
pub const DEFAULT_MAX_FILE_BYTES: usize = 512 * 1024;

/// Text content of one project file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileContent {
    /// Path as requested, relative to the project root
    pub path: String,
    /// `"utf-8"`, or `"latin-1"` when the bytes are not valid UTF-8
    pub encoding: String,
    pub truncated: bool,
    /// Full size on disk in bytes
    pub size: u64,
    pub content: String,
}

/// Read a file under `root`, returning at most `max_bytes` of it.
///
/// Paths that resolve outside `root` (through `..` or symlinks) are rejected.
pub fn read_file_content(
    root: &Path,
    relative: &str,
    max_bytes: usize,
) -> Result<FileContent, ContentError> {
    if relative.is_empty() {
        return Err(ContentError::MissingPath);
    }

    let root =
        fs::canonicalize(root).map_err(|_| ContentError::NotFound(root.display().to_string()))?;

    // Lexical check first, so escapes are rejected whether or not they exist
    let requested = paths::normalize_lexically(&root.join(relative));
    if !requested.starts_with(&root) {
        tracing::warn!("Rejected path outside project root: {}", relative);
        return Err(ContentError::OutsideRoot(relative.to_string()));
    }

    let target = match fs::canonicalize(&requested) {
        Ok(target) => target,
        Err(_) => return Err(ContentError::NotFound(relative.to_string())),
    };

    // Symlinks inside the root may still point elsewhere
    if !target.starts_with(&root) {
        tracing::warn!("Rejected link leaving project root: {}", relative);
        return Err(ContentError::OutsideRoot(relative.to_string()));
    }
    if !target.is_file() {
        return Err(ContentError::NotFound(relative.to_string()));
    }

    let read_failed = |e: std::io::Error| ContentError::ReadFailed {
        path: relative.to_string(),
        reason: e.to_string(),
    };

    let size = fs::metadata(&target).map_err(read_failed)?.len();
    let mut bytes = Vec::new();
    fs::File::open(&target)
        .map_err(read_failed)?
        .take(max_bytes as u64)
        .read_to_end(&mut bytes)
        .map_err(read_failed)?;
    let truncated = size > bytes.len() as u64;

    let (content, encoding) = match String::from_utf8(bytes) {
        Ok(text) => (text, "utf-8"),
        Err(e) => (decode_latin1(e.as_bytes()), "latin-1"),
    };

    tracing::debug!(
        "Read {} ({} of {} bytes, {})",
        relative,
        content.len(),
        size,
        encoding
    );

    Ok(FileContent {
        path: relative.to_string(),
        encoding: encoding.to_string(),
        truncated,
        size,
        content,
    })
}

/// Latin-1 maps every byte to the code point of the same value
fn decode_latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| char::from(b)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_read_utf8_file() {
        let temp_dir = TempDir::new().unwrap();
        fs::create_dir(temp_dir.path().join("src")).unwrap();
        fs::write(temp_dir.path().join("src").join("app.py"), "print(\"héllo\")").unwrap();

        let content =
            read_file_content(temp_dir.path(), "src/app.py", DEFAULT_MAX_FILE_BYTES).unwrap();
        assert_eq!(content.path, "src/app.py");
        assert_eq!(content.encoding, "utf-8");
        assert!(!content.truncated);
        assert_eq!(content.size, "print(\"héllo\")".len() as u64);
        assert_eq!(content.content, "print(\"héllo\")");
    }

    #[test]
    fn test_truncates_large_file() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("big.txt"), "a".repeat(2000)).unwrap();

        let content = read_file_content(temp_dir.path(), "big.txt", 100).unwrap();
        assert!(content.truncated);
        assert_eq!(content.content.len(), 100);
        assert_eq!(content.size, 2000);
    }

    #[test]
    fn test_exact_size_is_not_truncated() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("exact.txt"), "abcd").unwrap();

        let content = read_file_content(temp_dir.path(), "exact.txt", 4).unwrap();
        assert!(!content.truncated);
        assert_eq!(content.content, "abcd");
    }

    #[test]
    fn test_latin1_fallback() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("legacy.txt"), [b'c', b'a', b'f', 0xe9]).unwrap();

        let content = read_file_content(temp_dir.path(), "legacy.txt", 1024).unwrap();
        assert_eq!(content.encoding, "latin-1");
        assert_eq!(content.content, "café");
    }

    #[test]
    fn test_rejects_parent_traversal() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join("project");
        fs::create_dir(&root).unwrap();
        fs::write(temp_dir.path().join("secret.txt"), "secret").unwrap();

        let err = read_file_content(&root, "../secret.txt", 1024).unwrap_err();
        assert!(matches!(err, ContentError::OutsideRoot(_)));
        assert_eq!(err.status_code(), 403);
    }

    #[cfg(unix)]
    #[test]
    fn test_rejects_symlink_escaping_root() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join("project");
        fs::create_dir(&root).unwrap();
        fs::write(temp_dir.path().join("secret.txt"), "secret").unwrap();
        std::os::unix::fs::symlink(temp_dir.path().join("secret.txt"), root.join("link.txt"))
            .unwrap();

        let err = read_file_content(&root, "link.txt", 1024).unwrap_err();
        assert!(matches!(err, ContentError::OutsideRoot(_)));
    }

    #[test]
    fn test_rejects_missing_file_outside_root() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join("project");
        fs::create_dir(&root).unwrap();

        let err = read_file_content(&root, "../missing.txt", 1024).unwrap_err();
        assert!(matches!(err, ContentError::OutsideRoot(_)));
        assert_eq!(err.status_code(), 403);

        let err = read_file_content(&root, "src/../../../etc/nothing", 1024).unwrap_err();
        assert!(matches!(err, ContentError::OutsideRoot(_)));
    }

    #[test]
    fn test_dot_segments_inside_root_are_allowed() {
        let temp_dir = TempDir::new().unwrap();
        fs::create_dir(temp_dir.path().join("src")).unwrap();
        fs::write(temp_dir.path().join("README.md"), "# demo").unwrap();

        let content = read_file_content(temp_dir.path(), "./src/../README.md", 1024).unwrap();
        assert_eq!(content.content, "# demo");
        assert_eq!(content.path, "./src/../README.md");
    }

    #[cfg(unix)]
    #[test]
    fn test_absolute_path_outside_root() {
        let temp_dir = TempDir::new().unwrap();
        let err = read_file_content(temp_dir.path(), "/etc/passwd", 1024).unwrap_err();
        assert!(matches!(err, ContentError::OutsideRoot(_)));
    }

    #[test]
    fn test_missing_path() {
        let temp_dir = TempDir::new().unwrap();
        let err = read_file_content(temp_dir.path(), "", 1024).unwrap_err();
        assert!(matches!(err, ContentError::MissingPath));
    }

    #[test]
    fn test_nonexistent_file() {
        let temp_dir = TempDir::new().unwrap();
        let err = read_file_content(temp_dir.path(), "nope.py", 1024).unwrap_err();
        assert!(matches!(err, ContentError::NotFound(_)));
    }

    #[test]
    fn test_directory_is_not_found() {
        let temp_dir = TempDir::new().unwrap();
        fs::create_dir(temp_dir.path().join("pkg")).unwrap();
        let err = read_file_content(temp_dir.path(), "pkg", 1024).unwrap_err();
        assert!(matches!(err, ContentError::NotFound(_)));
    }
}
