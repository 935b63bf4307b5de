//! Provisioning steps.
//!
//! Every action of a run is a [`Step`]: a cheap [`probe`](Step::probe)
//! that decides from the filesystem whether the effect is already present,
//! and an [`apply`](Step::apply) that performs it.
//!
//! - [`PackageInstallStep`] - `yum install` a system package
//! - [`EnsureDirStep`] / [`ensure_dir`] - create a directory tree
//! - [`FetchStep`] - download an archive unless it exists
//! - [`ExtractStep`] - unzip an archive unless the target exists
//! - [`RuntimeInstallStep`] - run the MCR installer unless installed
//! - [`WriteFileStep`] / [`PatchLauncherStep`] - unconditional file writes
//!
//! # Example
//!
//! ```
//! use cossan_setup::steps::{execute_step, EnsureDirStep, StepStatus};
//! use tempfile::TempDir;
//!
//! let temp = TempDir::new().unwrap();
//! let step = EnsureDirStep::new("create-build-dir", temp.path().join("build"));
//!
//! assert_eq!(execute_step(&step).unwrap().status, StepStatus::Completed);
//! assert_eq!(execute_step(&step).unwrap().status, StepStatus::Skipped);
//! ```

pub mod archive;
pub mod completed_check;
pub mod directory;
pub mod executor;
pub mod files;
pub mod package;
pub mod runtime;

pub use archive::{ExtractStep, FetchStep};
pub use completed_check::{check_dir_exists, check_file_exists, CheckResult};
pub use directory::{ensure_dir, EnsureDirStep};
pub use executor::{execute_step, StepResult, StepStatus};
pub use files::{PatchLauncherStep, WriteFileStep};
pub use package::PackageInstallStep;
pub use runtime::RuntimeInstallStep;

use crate::error::Result;

/// An idempotent provisioning action.
pub trait Step {
    /// Stable identifier, e.g. `fetch-mcr`.
    fn name(&self) -> &str;

    /// Human-readable description of the effect.
    fn description(&self) -> String;

    /// Check whether the effect is already present.
    ///
    /// Must not change anything.
    fn probe(&self) -> CheckResult;

    /// Perform the effect.
    fn apply(&self) -> Result<()>;
}
