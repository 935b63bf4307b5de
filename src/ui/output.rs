//! Output mode and run reporting.

use crate::runner::{PlannedStep, RunProgress, RunSummary};
use crate::steps::StepStatus;

use super::theme::Theme;

/// Output verbosity mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Show step progress and the summary.
    #[default]
    Normal,
    /// Show only failures and the final status line.
    Quiet,
}

impl OutputMode {
    /// Check if this mode shows per-step progress.
    pub fn shows_progress(&self) -> bool {
        matches!(self, Self::Normal)
    }
}

/// Formats run events for the terminal.
///
/// Methods return the lines to print rather than printing, so the binary
/// decides where they go and tests can inspect them.
#[derive(Debug, Clone)]
pub struct Reporter {
    mode: OutputMode,
    theme: Theme,
}

impl Reporter {
    pub fn new(mode: OutputMode, theme: Theme) -> Self {
        Self { mode, theme }
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    /// Line for a progress event, if the mode shows it.
    pub fn progress_line(&self, event: &RunProgress<'_>) -> Option<String> {
        match event {
            RunProgress::StepStarting {
                description,
                index,
                total,
                ..
            } if self.mode.shows_progress() => Some(format!(
                "{} {}",
                self.theme.format_counter(*index, *total),
                description
            )),
            RunProgress::StepFinished { result } => match result.status {
                StepStatus::Failed => Some(self.theme.format_error(&format!(
                    "{}: {}",
                    result.name,
                    result.error.as_deref().unwrap_or("failed")
                ))),
                StepStatus::Skipped if self.mode.shows_progress() => {
                    let reason = result
                        .check_result
                        .as_ref()
                        .map(|c| c.description.as_str())
                        .unwrap_or("already done");
                    Some(self.theme.format_skipped(reason))
                }
                _ => None,
            },
            _ => None,
        }
    }

    /// Lines describing a dry run.
    pub fn plan_lines(&self, plan: &[PlannedStep]) -> Vec<String> {
        let mut lines = vec![self
            .theme
            .format_header("Dry run: nothing will be changed")];

        for (i, step) in plan.iter().enumerate() {
            let state = if step.check.complete {
                self.theme.format_skipped(&step.check.description)
            } else {
                step.description.clone()
            };
            lines.push(format!(
                "{} {:<20} {}",
                self.theme.format_counter(i + 1, plan.len()),
                step.name,
                state
            ));
        }

        lines
    }

    /// Lines summarising a finished run.
    pub fn summary_lines(&self, summary: &RunSummary) -> Vec<String> {
        let mut lines = Vec::new();

        if self.mode.shows_progress() {
            lines.push(String::new());
            lines.push(self.theme.format_header("Summary"));
            for result in &summary.results {
                let status = format!("{:<9}", result.status.to_string());
                lines.push(format!(
                    "  {:<20} {} {}",
                    result.name,
                    status,
                    self.theme
                        .dim
                        .apply_to(format_duration(result.duration))
                ));
            }
            if summary.not_run() > 0 {
                lines.push(self.theme.format_warning(&format!(
                    "{} step(s) not run",
                    summary.not_run()
                )));
            }
        }

        if summary.success() {
            lines.push(self.theme.format_success(&format!(
                "Installation complete ({})",
                format_duration(summary.duration)
            )));
        } else {
            lines.push(self.theme.format_error("Installation failed"));
        }

        lines
    }
}

/// Format a duration for human display.
pub fn format_duration(duration: std::time::Duration) -> String {
    let secs = duration.as_secs();
    if secs >= 60 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else if secs > 0 {
        format!("{}.{}s", secs, duration.subsec_millis() / 100)
    } else {
        format!("{}ms", duration.as_millis())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProvisionError;
    use crate::steps::{CheckResult, StepResult};
    use std::time::Duration;

    fn reporter(mode: OutputMode) -> Reporter {
        Reporter::new(mode, Theme::plain())
    }

    #[test]
    fn starting_line_has_counter_and_description() {
        let line = reporter(OutputMode::Normal).progress_line(&RunProgress::StepStarting {
            name: "fetch-mcr",
            description: "Downloading: x to: y ...",
            index: 3,
            total: 10,
        });
        assert_eq!(line.as_deref(), Some("[3/10] Downloading: x to: y ..."));
    }

    #[test]
    fn quiet_mode_hides_progress_but_not_failures() {
        let reporter = reporter(OutputMode::Quiet);
        let starting = RunProgress::StepStarting {
            name: "a",
            description: "A",
            index: 1,
            total: 1,
        };
        assert!(reporter.progress_line(&starting).is_none());

        let skipped = StepResult::skipped("a", CheckResult::complete("a already exists"));
        assert!(reporter
            .progress_line(&RunProgress::StepFinished { result: &skipped })
            .is_none());

        let failed = StepResult::failed("a", Duration::ZERO, "boom".into());
        assert_eq!(
            reporter
                .progress_line(&RunProgress::StepFinished { result: &failed })
                .as_deref(),
            Some("✗ a: boom")
        );
    }

    #[test]
    fn skipped_line_shows_check_description() {
        let skipped = StepResult::skipped(
            "fetch-mcr",
            CheckResult::complete("Destination: /b/a.zip already exists"),
        );
        let line = reporter(OutputMode::Normal)
            .progress_line(&RunProgress::StepFinished { result: &skipped });
        assert_eq!(
            line.as_deref(),
            Some("○ Destination: /b/a.zip already exists")
        );
    }

    #[test]
    fn summary_reports_failure_and_unrun_steps() {
        let summary = RunSummary {
            results: vec![StepResult::failed("install-webkitgtk", Duration::ZERO, "x".into())],
            total_steps: 10,
            duration: Duration::ZERO,
            failure: Some(ProvisionError::PackageManagerFailed {
                package: "webkitgtk".into(),
                code: Some(1),
                stderr: String::new(),
            }),
        };

        let lines = reporter(OutputMode::Normal).summary_lines(&summary);
        assert!(lines.iter().any(|l| l == "⚠ 9 step(s) not run"));
        assert_eq!(lines.last().map(String::as_str), Some("✗ Installation failed"));
    }

    #[test]
    fn plan_lines_mark_skippable_steps() {
        let plan = vec![
            PlannedStep {
                name: "fetch-mcr".into(),
                description: "Downloading".into(),
                check: CheckResult::complete("Destination: a already exists"),
            },
            PlannedStep {
                name: "extract-mcr".into(),
                description: "Extracting".into(),
                check: CheckResult::incomplete("missing", "x"),
            },
        ];

        let lines = reporter(OutputMode::Normal).plan_lines(&plan);
        assert_eq!(lines.len(), 3);
        assert!(lines[1].contains("○ Destination: a already exists"));
        assert!(lines[2].ends_with("Extracting"));
    }

    #[test]
    fn format_duration_scales() {
        assert_eq!(format_duration(Duration::from_millis(250)), "250ms");
        assert_eq!(format_duration(Duration::from_millis(2500)), "2.5s");
        assert_eq!(format_duration(Duration::from_secs(125)), "2m 5s");
    }
}
