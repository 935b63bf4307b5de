//! Generated and patched text files.
//!
//! These steps run on every invocation; nothing gates them.

use crate::error::{ProvisionError, Result};
use crate::render::{is_patched, patch_launcher};
use crate::steps::{CheckResult, Step};
use std::fs;
use std::path::PathBuf;
use tracing::warn;

/// Overwrites a file with fixed contents.
///
/// Used for the MCR response file and the `mcr.ini` pointer file.
pub struct WriteFileStep {
    name: String,
    path: PathBuf,
    contents: String,
}

impl WriteFileStep {
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>, contents: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            contents: contents.into(),
        }
    }
}

impl Step for WriteFileStep {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> String {
        format!("Writing {}", self.path.display())
    }

    fn probe(&self) -> CheckResult {
        CheckResult::always_runs(format!("{} is rewritten on every run", self.path.display()))
    }

    fn apply(&self) -> Result<()> {
        fs::write(&self.path, &self.contents).map_err(|source| ProvisionError::FileIo {
            action: "write",
            path: self.path.clone(),
            source,
        })
    }
}

/// Replaces the last line of the launcher script with an invocation block.
pub struct PatchLauncherStep {
    path: PathBuf,
    block: String,
}

impl PatchLauncherStep {
    pub fn new(path: impl Into<PathBuf>, block: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            block: block.into(),
        }
    }
}

impl Step for PatchLauncherStep {
    fn name(&self) -> &str {
        "patch-launcher"
    }

    fn description(&self) -> String {
        format!("Configuring license server in {}", self.path.display())
    }

    fn probe(&self) -> CheckResult {
        CheckResult::always_runs(format!("{} is patched on every run", self.path.display()))
    }

    fn apply(&self) -> Result<()> {
        let script = fs::read(&self.path).map_err(|source| ProvisionError::FileIo {
            action: "read",
            path: self.path.clone(),
            source,
        })?;

        if is_patched(&script) {
            warn!(
                "{} already contains a license server invocation; another one will be appended",
                self.path.display()
            );
        }

        let patched = patch_launcher(&script, &self.block);
        fs::write(&self.path, patched).map_err(|source| ProvisionError::FileIo {
            action: "write",
            path: self.path.clone(),
            source,
        })
    }
}
