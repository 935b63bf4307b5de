//! Run orchestration.
//!
//! Builds the fixed plan of steps from an [`InstallConfig`] and executes
//! it strictly in order, stopping at the first failure.

use std::time::{Duration, Instant};

use tracing::warn;

use crate::config::{InstallConfig, Layout, COSSANX_URL, MCR_URL, WEBKIT_PACKAGE};
use crate::error::ProvisionError;
use crate::fetch::Downloader;
use crate::render::{render_launch_block, render_pointer_file, render_response_file};
use crate::shell::ProcessRunner;
use crate::steps::{
    execute_step, CheckResult, EnsureDirStep, ExtractStep, FetchStep, PackageInstallStep,
    PatchLauncherStep, RuntimeInstallStep, Step, StepResult, WriteFileStep,
};

/// External collaborators the steps call into.
#[derive(Clone, Copy)]
pub struct Collaborators<'a> {
    /// Runs yum, `unzip` and the MCR installer.
    pub runner: &'a dyn ProcessRunner,
    /// Downloads the archives.
    pub downloader: &'a dyn Downloader,
}

/// Progress events emitted during a run.
#[derive(Debug)]
pub enum RunProgress<'a> {
    /// A step is about to be probed.
    StepStarting {
        name: &'a str,
        description: &'a str,
        index: usize,
        total: usize,
    },
    /// A step finished (completed, skipped or failed).
    StepFinished { result: &'a StepResult },
}

/// A step and its probe result, as shown by `--dry-run`.
#[derive(Debug, Clone)]
pub struct PlannedStep {
    pub name: String,
    pub description: String,
    pub check: CheckResult,
}

/// Outcome of a run.
#[derive(Debug)]
pub struct RunSummary {
    /// Results of the steps that ran, in order. A failed step is last.
    pub results: Vec<StepResult>,
    /// Number of steps in the plan.
    pub total_steps: usize,
    /// Wall-clock duration of the run.
    pub duration: Duration,
    /// The error that stopped the run.
    pub failure: Option<ProvisionError>,
}

impl RunSummary {
    pub fn success(&self) -> bool {
        self.failure.is_none()
    }

    /// Exit code for the process: 0, or the failure's code.
    pub fn exit_code(&self) -> u8 {
        self.failure.as_ref().map_or(0, ProvisionError::exit_code)
    }

    /// Steps in the plan that never ran because an earlier one failed.
    pub fn not_run(&self) -> usize {
        self.total_steps - self.results.len()
    }
}

/// Build the ordered plan for a configuration.
pub fn build_plan<'a>(
    config: &InstallConfig,
    collaborators: Collaborators<'a>,
) -> Vec<Box<dyn Step + 'a>> {
    let layout = Layout::new(config);
    let Collaborators { runner, downloader } = collaborators;

    vec![
        Box::new(PackageInstallStep::new(WEBKIT_PACKAGE, runner)),
        Box::new(EnsureDirStep::new("create-build-dir", layout.build_dir())),
        Box::new(FetchStep::new(
            "fetch-mcr",
            MCR_URL,
            layout.mcr_archive(),
            downloader,
        )),
        Box::new(ExtractStep::new(
            "extract-mcr",
            layout.mcr_archive(),
            layout.mcr_extract_dir(),
            runner,
        )),
        Box::new(WriteFileStep::new(
            "write-mcr-response",
            layout.mcr_response_file(),
            render_response_file(&layout),
        )),
        Box::new(RuntimeInstallStep::new(
            layout.mcr_installer(),
            layout.mcr_response_file(),
            layout.mcr_install_dir(),
            runner,
        )),
        Box::new(FetchStep::new(
            "fetch-cossanx",
            COSSANX_URL,
            layout.cossanx_archive(),
            downloader,
        )),
        Box::new(ExtractStep::new(
            "extract-cossanx",
            layout.cossanx_archive(),
            layout.cossanx_install_dir(),
            runner,
        )),
        Box::new(PatchLauncherStep::new(
            layout.launcher_script(),
            render_launch_block(config),
        )),
        Box::new(WriteFileStep::new(
            "write-mcr-pointer",
            layout.pointer_file(),
            render_pointer_file(&layout),
        )),
    ]
}

/// Runs the provisioning plan.
pub struct Provisioner<'a> {
    steps: Vec<Box<dyn Step + 'a>>,
}

impl<'a> Provisioner<'a> {
    /// Create a provisioner with the standard plan for `config`.
    pub fn new(config: &InstallConfig, collaborators: Collaborators<'a>) -> Self {
        Self::with_steps(build_plan(config, collaborators))
    }

    /// Create a provisioner for an arbitrary list of steps.
    pub fn with_steps(steps: Vec<Box<dyn Step + 'a>>) -> Self {
        Self { steps }
    }

    /// Step names in execution order.
    pub fn step_names(&self) -> Vec<&str> {
        self.steps.iter().map(|s| s.name()).collect()
    }

    /// Probe every step without applying anything.
    ///
    /// Later steps are probed against the current disk state, so a step
    /// whose input a previous step would create still shows as pending.
    pub fn plan(&self) -> Vec<PlannedStep> {
        self.steps
            .iter()
            .map(|step| PlannedStep {
                name: step.name().to_string(),
                description: step.description(),
                check: step.probe(),
            })
            .collect()
    }

    /// Run every step in order.
    pub fn run(&self) -> RunSummary {
        self.run_with_progress(&mut |_| {})
    }

    /// Run every step in order, reporting progress.
    ///
    /// Stops at the first failing step; no later step is probed or applied.
    pub fn run_with_progress(&self, on_progress: &mut dyn FnMut(RunProgress<'_>)) -> RunSummary {
        let start = Instant::now();
        let total = self.steps.len();
        let mut results = Vec::with_capacity(total);
        let mut failure = None;

        for (index, step) in self.steps.iter().enumerate() {
            let description = step.description();
            on_progress(RunProgress::StepStarting {
                name: step.name(),
                description: &description,
                index: index + 1,
                total,
            });

            let step_start = Instant::now();
            let result = match execute_step(step.as_ref()) {
                Ok(result) => result,
                Err(e) => {
                    warn!("Step '{}' failed: {}", step.name(), e);
                    let result = StepResult::failed(step.name(), step_start.elapsed(), e.to_string());
                    failure = Some(e);
                    result
                }
            };

            on_progress(RunProgress::StepFinished { result: &result });
            results.push(result);

            if failure.is_some() {
                break;
            }
        }

        RunSummary {
            results,
            total_steps: total,
            duration: start.elapsed(),
            failure,
        }
    }
}
