//! Archive download and extraction steps.

use crate::error::{ProvisionError, Result};
use crate::fetch::Downloader;
use crate::shell::{CommandSpec, ProcessRunner};
use crate::steps::completed_check::{check_dir_exists, check_file_exists};
use crate::steps::{CheckResult, Step};
use std::path::PathBuf;

/// Downloads a URL unless the destination file already exists.
pub struct FetchStep<'a> {
    name: String,
    url: String,
    destination: PathBuf,
    downloader: &'a dyn Downloader,
}

impl<'a> FetchStep<'a> {
    pub fn new(
        name: impl Into<String>,
        url: impl Into<String>,
        destination: impl Into<PathBuf>,
        downloader: &'a dyn Downloader,
    ) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            destination: destination.into(),
            downloader,
        }
    }
}

impl Step for FetchStep<'_> {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> String {
        format!(
            "Downloading: {} to: {} ...",
            self.url,
            self.destination.display()
        )
    }

    fn probe(&self) -> CheckResult {
        check_file_exists("Destination", &self.destination)
    }

    fn apply(&self) -> Result<()> {
        self.downloader.download(&self.url, &self.destination)?;
        Ok(())
    }
}

/// Extracts a zip archive with `unzip` unless the target directory exists.
pub struct ExtractStep<'a> {
    name: String,
    archive: PathBuf,
    destination: PathBuf,
    runner: &'a dyn ProcessRunner,
}

impl<'a> ExtractStep<'a> {
    pub fn new(
        name: impl Into<String>,
        archive: impl Into<PathBuf>,
        destination: impl Into<PathBuf>,
        runner: &'a dyn ProcessRunner,
    ) -> Self {
        Self {
            name: name.into(),
            archive: archive.into(),
            destination: destination.into(),
            runner,
        }
    }

    /// The extractor invocation.
    pub fn command(&self) -> CommandSpec {
        CommandSpec::new("unzip")
            .path_arg(&self.archive)
            .arg("-d")
            .path_arg(&self.destination)
    }
}

impl Step for ExtractStep<'_> {
    fn name(&self) -> &str {
        &self.name
    }

    fn description(&self) -> String {
        format!(
            "Extracting: {} to: {} ...",
            self.archive.display(),
            self.destination.display()
        )
    }

    fn probe(&self) -> CheckResult {
        check_dir_exists("Extracted archive", &self.destination)
    }

    fn apply(&self) -> Result<()> {
        let result = self.runner.run(&self.command())?;
        if result.success {
            Ok(())
        } else {
            Err(ProvisionError::ExtractionFailed {
                archive: self.archive.clone(),
                code: result.exit_code,
                stderr: result.stderr,
            })
        }
    }
}
