//! Error types for provisioning runs.
//!
//! This module defines [`ProvisionError`], the error type used throughout
//! the crate, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Every variant is fatal: the provisioner stops at the first error
//! - Failures of external processes keep the child's exit code so the
//!   binary can propagate it
//! - Use `anyhow::Error` (via `ProvisionError::Other`) for unexpected errors

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for provisioning operations.
#[derive(Debug, Error)]
pub enum ProvisionError {
    /// The system package manager exited non-zero.
    #[error("Package manager failed to install '{package}' (exit code {code:?}){}", stderr_suffix(.stderr))]
    PackageManagerFailed {
        package: String,
        code: Option<i32>,
        stderr: String,
    },

    /// Network or transport error while downloading an archive.
    #[error("Failed to download {url}: {message}")]
    DownloadFailed { url: String, message: String },

    /// The archive tool exited non-zero.
    #[error("Failed to extract {archive} (exit code {code:?}){}", stderr_suffix(.stderr))]
    ExtractionFailed {
        archive: PathBuf,
        code: Option<i32>,
        stderr: String,
    },

    /// A directory could not be created.
    #[error("Failed to create directory {path}: {message}")]
    DirectoryCreationFailed { path: PathBuf, message: String },

    /// The runtime installer exited non-zero.
    #[error("Runtime installer {installer} failed (exit code {code:?}){}", stderr_suffix(.stderr))]
    InstallerFailed {
        installer: PathBuf,
        code: Option<i32>,
        stderr: String,
    },

    /// Reading or writing a generated/patched file failed.
    #[error("Failed to {action} {path}: {source}")]
    FileIo {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An external program could not be started at all.
    #[error("Failed to start '{command}': {message}")]
    CommandSpawnFailed { command: String, message: String },

    /// Configuration file not found at the requested location.
    #[error("Configuration not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Failed to parse configuration file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// Invalid configuration values.
    #[error("Invalid configuration: {message}")]
    ConfigValidationError { message: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ProvisionError {
    /// Exit code of the external process behind this error, if any.
    pub fn process_exit_code(&self) -> Option<i32> {
        match self {
            ProvisionError::PackageManagerFailed { code, .. }
            | ProvisionError::ExtractionFailed { code, .. }
            | ProvisionError::InstallerFailed { code, .. } => *code,
            _ => None,
        }
    }

    /// Exit code the program should terminate with for this error.
    ///
    /// Propagates the child's code when it fits in `1..=255`, otherwise 1.
    pub fn exit_code(&self) -> u8 {
        match self.process_exit_code() {
            Some(code) if (1..=255).contains(&code) => code as u8,
            _ => 1,
        }
    }
}

/// Render captured stderr as a `: <text>` tail, or nothing when empty.
fn stderr_suffix(stderr: &str) -> String {
    let trimmed = stderr.trim();
    if trimmed.is_empty() {
        String::new()
    } else {
        format!(": {}", trimmed)
    }
}

/// Result type alias for provisioning operations.
pub type Result<T> = std::result::Result<T, ProvisionError>;
