//! cossan-setup - unattended installer for COSSAN-X and the MATLAB Compiler
//! Runtime on yum-based Linux hosts.
//!
//! A run is a fixed sequence of idempotent steps: install `webkitgtk`,
//! download and unzip the MCR installer, install the MCR, download and
//! unzip COSSAN-X, point its launcher at the license server and write
//! `mcr.ini`. Re-running skips every step whose output already exists.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Configuration loading and the derived filesystem layout
//! - [`error`] - Error types and result aliases
//! - [`fetch`] - Archive downloads
//! - [`mock`] - Recording stand-ins for processes and downloads
//! - [`render`] - Response file, launcher block and pointer file text
//! - [`runner`] - Plan construction and sequential execution
//! - [`shell`] - External process execution
//! - [`steps`] - The step abstraction and its implementations
//! - [`ui`] - Terminal reporting
//!
//! # Example
//!
//! ```
//! use cossan_setup::config::{InstallConfig, Layout};
//! use cossan_setup::render::render_response_file;
//!
//! let config = InstallConfig::new("/opt/app");
//! let response = render_response_file(&Layout::new(&config));
//! assert!(response.contains("destinationFolder=/opt/app/mcr\n"));
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod fetch;
pub mod mock;
pub mod render;
pub mod runner;
pub mod shell;
pub mod steps;
pub mod ui;

pub use error::{ProvisionError, Result};
