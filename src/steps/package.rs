//! System package installation.

use crate::error::{ProvisionError, Result};
use crate::shell::{CommandSpec, ProcessRunner};
use crate::steps::{CheckResult, Step};

/// Installs a package with `sudo yum install <package> --assumeyes`.
///
/// Not existence-gated: yum itself is a no-op for installed packages.
pub struct PackageInstallStep<'a> {
    name: String,
    package: String,
    runner: &'a dyn ProcessRunner,
}

impl<'a> PackageInstallStep<'a> {
    pub fn new(package: impl Into<String>, runner: &'a dyn ProcessRunner) -> Self {
        let package = package.into();
        Self {
            name: format!("install-{}", package),
            package,
            runner,
        }
    }

    /// The package manager invocation.
    pub fn command(&self) -> CommandSpec {
        CommandSpec::new("sudo")
            .arg("yum")
            .arg("install")
            .arg(&self.package)
            .arg("--assumeyes")
    }
}

impl Step for PackageInstallStep<'_> {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> String {
        format!("Installing {} using yum...", self.package)
    }

    fn probe(&self) -> CheckResult {
        CheckResult::always_runs(format!("Package {} checked by yum", self.package))
    }

    fn apply(&self) -> Result<()> {
        let result = self.runner.run(&self.command())?;
        if result.success {
            Ok(())
        } else {
            Err(ProvisionError::PackageManagerFailed {
                package: self.package.clone(),
                code: result.exit_code,
                stderr: result.stderr,
            })
        }
    }
}
