//! CLI argument definitions.

use clap::Parser;
use std::path::PathBuf;

use crate::config::ConfigOverrides;

/// cossan-setup - unattended COSSAN-X and MCR installer.
#[derive(Debug, Parser)]
#[command(name = "cossan-setup")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to a YAML config file (default: ~/.cossan-setup.yml if present)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Directory to install into (default: your home directory)
    #[arg(long, env = "COSSAN_INSTALL_ROOT")]
    pub install_root: Option<PathBuf>,

    /// License server host name or IP
    #[arg(long, env = "COSSAN_LICENSE_HOST")]
    pub license_host: Option<String>,

    /// License server port
    #[arg(long, env = "COSSAN_LICENSE_PORT")]
    pub license_port: Option<u16>,

    /// Show what would be done without changing anything
    #[arg(long)]
    pub dry_run: bool,

    /// Minimal output
    #[arg(short, long)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,
}

impl Cli {
    /// Config values given on the command line or in the environment.
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            install_root: self.install_root.clone(),
            license_server_host: self.license_host.clone(),
            license_server_port: self.license_port,
        }
    }
}
