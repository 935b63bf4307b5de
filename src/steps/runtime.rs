//! MCR runtime installation.

use crate::error::{ProvisionError, Result};
use crate::shell::{CommandSpec, ProcessRunner};
use crate::steps::completed_check::check_dir_exists;
use crate::steps::{CheckResult, Step};
use std::path::PathBuf;

/// Runs the silent MCR installer unless its install directory exists.
///
/// The installer reads its settings from the response file written by
/// [`WriteFileStep`](super::files::WriteFileStep) earlier in the run.
pub struct RuntimeInstallStep<'a> {
    installer: PathBuf,
    response_file: PathBuf,
    install_dir: PathBuf,
    runner: &'a dyn ProcessRunner,
}

impl<'a> RuntimeInstallStep<'a> {
    pub fn new(
        installer: impl Into<PathBuf>,
        response_file: impl Into<PathBuf>,
        install_dir: impl Into<PathBuf>,
        runner: &'a dyn ProcessRunner,
    ) -> Self {
        Self {
            installer: installer.into(),
            response_file: response_file.into(),
            install_dir: install_dir.into(),
            runner,
        }
    }

    /// The installer invocation.
    pub fn command(&self) -> CommandSpec {
        CommandSpec::new(self.installer.to_string_lossy())
            .arg("-inputFile")
            .path_arg(&self.response_file)
    }
}

impl Step for RuntimeInstallStep<'_> {
    fn name(&self) -> &str {
        "install-mcr"
    }

    fn description(&self) -> String {
        format!("Installing MCR to {}", self.install_dir.display())
    }

    fn probe(&self) -> CheckResult {
        check_dir_exists("MCR install directory", &self.install_dir)
    }

    fn apply(&self) -> Result<()> {
        let result = self.runner.run(&self.command())?;
        if result.success {
            Ok(())
        } else {
            Err(ProvisionError::InstallerFailed {
                installer: self.installer.clone(),
                code: result.exit_code,
                stderr: result.stderr,
            })
        }
    }
}
