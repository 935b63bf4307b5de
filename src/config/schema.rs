//! Configuration schema.
//!
//! [`InstallConfig`] is the resolved, immutable configuration of a run.
//! [`ConfigFile`] mirrors the optional YAML file, where every key may be
//! omitted.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Placeholder license server host used when none is configured.
pub const DEFAULT_LICENSE_HOST: &str = "hostname.or.ip.to.smarx.server";

/// Default SmartX license server port.
pub const DEFAULT_LICENSE_PORT: u16 = 8765;

/// Resolved configuration for a provisioning run.
///
/// Built once at start-up and passed by reference into every step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InstallConfig {
    /// Absolute directory everything is installed under.
    pub install_root: PathBuf,

    /// Host name or IP of the license server.
    pub license_server_host: String,

    /// TCP port of the license server.
    pub license_server_port: u16,
}

impl InstallConfig {
    /// Create a config with the given root and the default license server.
    pub fn new(install_root: impl Into<PathBuf>) -> Self {
        Self {
            install_root: install_root.into(),
            license_server_host: DEFAULT_LICENSE_HOST.to_string(),
            license_server_port: DEFAULT_LICENSE_PORT,
        }
    }

    /// Set the license server host and port.
    pub fn with_license_server(mut self, host: impl Into<String>, port: u16) -> Self {
        self.license_server_host = host.into();
        self.license_server_port = port;
        self
    }
}

/// Contents of a YAML configuration file.
///
/// ```yaml
/// install_root: /opt/cossan
/// license_server_host: lic.example.com
/// license_server_port: 8765
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigFile {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub install_root: Option<PathBuf>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub license_server_host: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub license_server_port: Option<u16>,
}
