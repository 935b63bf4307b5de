//! Completed checks.
//!
//! A completed check decides whether a step's effect is already present on
//! disk and the step can be skipped. Checks look only at the filesystem;
//! no run state is recorded anywhere else.

use std::path::Path;

/// Result of probing a step.
///
/// The `description` field is user-visible: it appears in skip messages
/// and in the run summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckResult {
    /// Whether the effect is already present (step can be skipped).
    pub complete: bool,

    /// Description of what was checked.
    pub description: String,

    /// Details about the check result.
    pub details: Option<String>,
}

impl CheckResult {
    /// Create a complete result.
    pub fn complete(description: impl Into<String>) -> Self {
        Self {
            complete: true,
            description: description.into(),
            details: None,
        }
    }

    /// Create an incomplete result.
    pub fn incomplete(description: impl Into<String>, details: impl Into<String>) -> Self {
        Self {
            complete: false,
            description: description.into(),
            details: Some(details.into()),
        }
    }

    /// Result for steps that run on every invocation.
    pub fn always_runs(description: impl Into<String>) -> Self {
        Self {
            complete: false,
            description: description.into(),
            details: None,
        }
    }
}

/// Complete when a regular file exists at `path`.
pub fn check_file_exists(label: &str, path: &Path) -> CheckResult {
    if path.is_file() {
        CheckResult::complete(format!("{}: {} already exists", label, path.display()))
    } else {
        CheckResult::incomplete(
            format!("{}: {} missing", label, path.display()),
            format!("Expected a file at {}", path.display()),
        )
    }
}

/// Complete when a directory exists at `path`.
pub fn check_dir_exists(label: &str, path: &Path) -> CheckResult {
    if path.is_dir() {
        CheckResult::complete(format!("{}: {} already exists", label, path.display()))
    } else {
        CheckResult::incomplete(
            format!("{}: {} missing", label, path.display()),
            format!("Expected a directory at {}", path.display()),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn file_check_complete_when_file_exists() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("a.zip");
        fs::write(&path, "zip").unwrap();

        let result = check_file_exists("Destination", &path);
        assert!(result.complete);
        assert!(result.description.contains("already exists"));
    }

    #[test]
    fn file_check_incomplete_for_directory() {
        let temp = TempDir::new().unwrap();
        let result = check_file_exists("Destination", temp.path());
        assert!(!result.complete);
        assert!(result.details.is_some());
    }

    #[test]
    fn dir_check_complete_when_dir_exists() {
        let temp = TempDir::new().unwrap();
        let result = check_dir_exists("Extracted archive", temp.path());
        assert!(result.complete);
        assert!(result.description.starts_with("Extracted archive: "));
    }

    #[test]
    fn dir_check_incomplete_for_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("file");
        fs::write(&path, "").unwrap();
        assert!(!check_dir_exists("Target", &path).complete);
    }

    #[test]
    fn always_runs_is_incomplete_without_details() {
        let result = CheckResult::always_runs("Rewritten on every run");
        assert!(!result.complete);
        assert!(result.details.is_none());
    }
}
