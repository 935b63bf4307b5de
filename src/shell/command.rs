//! External process execution.
//!
//! Steps never spawn processes directly; they go through a
//! [`ProcessRunner`] so tests can substitute stubs for the package
//! manager, `unzip` and the runtime installer.

use crate::error::{ProvisionError, Result};
use std::fmt;
use std::path::Path;
use std::process::{Command, Stdio};

/// A program and its arguments, run without a shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    /// Program name (looked up on PATH) or path.
    pub program: String,

    /// Arguments, passed verbatim.
    pub args: Vec<String>,
}

impl CommandSpec {
    /// Create a command with no arguments.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Append one argument.
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Append a path argument.
    pub fn path_arg(self, path: &Path) -> Self {
        self.arg(path.to_string_lossy())
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            if arg.is_empty() || arg.contains(char::is_whitespace) {
                write!(f, " \"{}\"", arg)?;
            } else {
                write!(f, " {}", arg)?;
            }
        }
        Ok(())
    }
}

/// Result of executing a command.
#[derive(Debug, Clone)]
pub struct CommandResult {
    /// Exit code (None if killed by signal).
    pub exit_code: Option<i32>,

    /// Captured standard error.
    pub stderr: String,

    /// Whether command succeeded (exit code 0).
    pub success: bool,
}

impl CommandResult {
    /// Create a success result.
    pub fn success(stderr: String) -> Self {
        Self {
            exit_code: Some(0),
            stderr,
            success: true,
        }
    }

    /// Create a failure result.
    pub fn failure(exit_code: Option<i32>, stderr: String) -> Self {
        Self {
            exit_code,
            stderr,
            success: false,
        }
    }
}

/// Runs external programs to completion.
pub trait ProcessRunner {
    /// Run a command and wait for it to exit.
    ///
    /// A non-zero exit is reported through [`CommandResult::success`], not
    /// as an `Err`. `Err` means the program could not be started.
    fn run(&self, command: &CommandSpec) -> Result<CommandResult>;
}

/// Runs commands on the host with [`std::process::Command`].
///
/// Stdout goes straight to the terminal so yum and the installer can show
/// their progress. Stderr is captured for the failure report.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl SystemRunner {
    pub fn new() -> Self {
        Self
    }
}

impl ProcessRunner for SystemRunner {
    fn run(&self, command: &CommandSpec) -> Result<CommandResult> {
        tracing::debug!("Running: {}", command);

        let output = Command::new(&command.program)
            .args(&command.args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::piped())
            .output()
            .map_err(|e| ProvisionError::CommandSpawnFailed {
                command: command.to_string(),
                message: e.to_string(),
            })?;

        let stderr = String::from_utf8_lossy(&output.stderr).to_string();

        if output.status.success() {
            if !stderr.trim().is_empty() {
                tracing::debug!("{} wrote to stderr: {}", command.program, stderr.trim_end());
            }
            Ok(CommandResult::success(stderr))
        } else {
            Ok(CommandResult::failure(output.status.code(), stderr))
        }
    }
}
