//! Step execution.
//!
//! Probes a step, skips it when its effect is already present, and applies
//! it otherwise.

use crate::error::Result;
use crate::steps::completed_check::CheckResult;
use crate::steps::Step;
use std::time::{Duration, Instant};
use tracing::info;

/// Status of a step in the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepStatus {
    /// Step completed successfully.
    Completed,

    /// Step failed.
    Failed,

    /// Step was skipped (effect already present).
    Skipped,
}

impl std::fmt::Display for StepStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            StepStatus::Completed => "completed",
            StepStatus::Failed => "failed",
            StepStatus::Skipped => "skipped",
        };
        write!(f, "{}", s)
    }
}

/// Result of executing a step.
#[derive(Debug, Clone)]
pub struct StepResult {
    /// Step name.
    pub name: String,

    /// Final status.
    pub status: StepStatus,

    /// Execution duration.
    pub duration: Duration,

    /// Probe result.
    pub check_result: Option<CheckResult>,

    /// Error message (if failed).
    pub error: Option<String>,
}

impl StepResult {
    /// Create a skipped result.
    pub fn skipped(name: &str, check_result: CheckResult) -> Self {
        Self {
            name: name.to_string(),
            status: StepStatus::Skipped,
            duration: Duration::ZERO,
            check_result: Some(check_result),
            error: None,
        }
    }

    /// Create a success result.
    pub fn completed(name: &str, duration: Duration, check_result: CheckResult) -> Self {
        Self {
            name: name.to_string(),
            status: StepStatus::Completed,
            duration,
            check_result: Some(check_result),
            error: None,
        }
    }

    /// Create a failure result.
    pub fn failed(name: &str, duration: Duration, error: String) -> Self {
        Self {
            name: name.to_string(),
            status: StepStatus::Failed,
            duration,
            check_result: None,
            error: Some(error),
        }
    }
}

/// Probe a step and apply it unless its effect is already present.
///
/// Returns the skipped or completed result, or the step's error.
pub fn execute_step(step: &dyn Step) -> Result<StepResult> {
    let check = step.probe();

    if check.complete {
        info!("{}", check.description);
        return Ok(StepResult::skipped(step.name(), check));
    }

    info!("{}", step.description());
    let start = Instant::now();
    step.apply()?;

    Ok(StepResult::completed(step.name(), start.elapsed(), check))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProvisionError;
    use std::cell::Cell;
    use std::io;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct LogBuffer(Arc<Mutex<Vec<u8>>>);

    impl LogBuffer {
        fn contents(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().unwrap()).to_string()
        }
    }

    impl io::Write for LogBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    /// Run `f` with INFO logs written to a buffer, returning what was logged.
    fn capture_logs(f: impl FnOnce()) -> String {
        let buffer = LogBuffer::default();
        let writer = buffer.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .without_time()
            .finish();

        tracing::subscriber::with_default(subscriber, f);
        buffer.contents()
    }

    struct FakeStep {
        done: bool,
        fail: bool,
        applied: Cell<usize>,
    }

    impl FakeStep {
        fn new(done: bool, fail: bool) -> Self {
            Self {
                done,
                fail,
                applied: Cell::new(0),
            }
        }
    }

    impl Step for FakeStep {
        fn name(&self) -> &str {
            "fake"
        }

        fn description(&self) -> String {
            "Doing fake work".to_string()
        }

        fn probe(&self) -> CheckResult {
            if self.done {
                CheckResult::complete("fake: already exists")
            } else {
                CheckResult::incomplete("fake: missing", "not there")
            }
        }

        fn apply(&self) -> Result<()> {
            self.applied.set(self.applied.get() + 1);
            if self.fail {
                Err(ProvisionError::ConfigValidationError {
                    message: "boom".into(),
                })
            } else {
                Ok(())
            }
        }
    }

    #[test]
    fn complete_probe_skips_apply() {
        let step = FakeStep::new(true, false);
        let result = execute_step(&step).unwrap();

        assert_eq!(result.status, StepStatus::Skipped);
        assert_eq!(step.applied.get(), 0);
        assert!(result
            .check_result
            .unwrap()
            .description
            .contains("already exists"));
    }

    #[test]
    fn skipped_step_logs_that_target_exists() {
        let step = FakeStep::new(true, false);

        let logs = capture_logs(|| {
            execute_step(&step).unwrap();
        });

        assert!(logs.contains("INFO"), "{}", logs);
        assert!(logs.contains("fake: already exists"), "{}", logs);
        assert!(!logs.contains("Doing fake work"), "{}", logs);
    }

    #[test]
    fn applied_step_logs_its_description() {
        let step = FakeStep::new(false, false);

        let logs = capture_logs(|| {
            execute_step(&step).unwrap();
        });

        assert!(logs.contains("Doing fake work"), "{}", logs);
    }

    #[test]
    fn incomplete_probe_applies() {
        let step = FakeStep::new(false, false);
        let result = execute_step(&step).unwrap();

        assert_eq!(result.status, StepStatus::Completed);
        assert_eq!(step.applied.get(), 1);
    }

    #[test]
    fn apply_error_propagates() {
        let step = FakeStep::new(false, true);
        assert!(execute_step(&step).is_err());
        assert_eq!(step.applied.get(), 1);
    }

    #[test]
    fn status_display() {
        assert_eq!(StepStatus::Skipped.to_string(), "skipped");
        assert_eq!(StepStatus::Failed.to_string(), "failed");
    }

    #[test]
    fn failed_result_keeps_error() {
        let result = StepResult::failed("x", Duration::ZERO, "bad".into());
        assert_eq!(result.status, StepStatus::Failed);
        assert_eq!(result.error.as_deref(), Some("bad"));
    }
}
