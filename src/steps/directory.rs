//! Directory creation.

use crate::error::{ProvisionError, Result};
use crate::steps::completed_check::check_dir_exists;
use crate::steps::{CheckResult, Step};
use std::fs;
use std::path::{Path, PathBuf};

/// Create `path` and any missing parents.
///
/// An existing directory is success and is left untouched. Anything else
/// already at `path`, or any creation error, is a
/// [`ProvisionError::DirectoryCreationFailed`].
pub fn ensure_dir(path: &Path) -> Result<()> {
    if path.is_dir() {
        return Ok(());
    }

    if path.exists() {
        return Err(ProvisionError::DirectoryCreationFailed {
            path: path.to_path_buf(),
            message: "path exists and is not a directory".to_string(),
        });
    }

    fs::create_dir_all(path).map_err(|e| ProvisionError::DirectoryCreationFailed {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Step wrapper around [`ensure_dir`].
pub struct EnsureDirStep {
    name: String,
    path: PathBuf,
}

impl EnsureDirStep {
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }
}

impl Step for EnsureDirStep {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> String {
        format!("Creating directory {}", self.path.display())
    }

    fn probe(&self) -> CheckResult {
        check_dir_exists("Directory", &self.path)
    }

    fn apply(&self) -> Result<()> {
        ensure_dir(&self.path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn creates_missing_parents() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("a/b/c");

        ensure_dir(&path).unwrap();
        assert!(path.is_dir());
    }

    #[test]
    fn existing_directory_is_untouched() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("build");
        fs::create_dir(&path).unwrap();
        fs::write(path.join("keep.zip"), "zip").unwrap();

        ensure_dir(&path).unwrap();

        assert_eq!(fs::read_to_string(path.join("keep.zip")).unwrap(), "zip");
    }

    #[test]
    fn file_in_the_way_fails() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("build");
        fs::write(&path, "not a dir").unwrap();

        let err = ensure_dir(&path).unwrap_err();
        assert!(matches!(err, ProvisionError::DirectoryCreationFailed { .. }));
        assert!(path.is_file());
    }

    #[test]
    fn file_as_parent_fails() {
        let temp = TempDir::new().unwrap();
        let parent = temp.path().join("blocker");
        fs::write(&parent, "").unwrap();

        let err = ensure_dir(&parent.join("child")).unwrap_err();
        assert!(matches!(err, ProvisionError::DirectoryCreationFailed { .. }));
    }

    #[test]
    fn step_skips_existing_directory() {
        let temp = TempDir::new().unwrap();
        let step = EnsureDirStep::new("create-build-dir", temp.path());
        assert!(step.probe().complete);
    }
}
