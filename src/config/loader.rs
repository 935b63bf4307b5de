//! Configuration file loading and resolution.
//!
//! Values are layered, later layers winning:
//! 1. Built-in defaults
//! 2. YAML file (`--config`, or `~/.cossan-setup.yml` when present)
//! 3. Command-line / environment overrides

use crate::config::schema::{ConfigFile, InstallConfig, DEFAULT_LICENSE_HOST, DEFAULT_LICENSE_PORT};
use crate::error::{ProvisionError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// File name of the per-user config in the home directory.
pub const USER_CONFIG_FILE: &str = ".cossan-setup.yml";

/// Values supplied on the command line (or their environment variables).
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub install_root: Option<PathBuf>,
    pub license_server_host: Option<String>,
    pub license_server_port: Option<u16>,
}

/// Find the user config at `~/.cossan-setup.yml`.
pub fn find_user_config() -> Option<PathBuf> {
    let path = dirs::home_dir()?.join(USER_CONFIG_FILE);
    if path.is_file() {
        Some(path)
    } else {
        None
    }
}

/// Load a single config file.
///
/// # Errors
///
/// Returns `ConfigNotFound` if the file doesn't exist.
/// Returns `ConfigParseError` if the YAML is invalid.
pub fn load_config_file(path: &Path) -> Result<ConfigFile> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            ProvisionError::ConfigNotFound {
                path: path.to_path_buf(),
            }
        } else {
            ProvisionError::Io(e)
        }
    })?;

    parse_config(&content, path)
}

/// Parse YAML content into a [`ConfigFile`].
///
/// An empty document is treated as a file with no keys set.
pub fn parse_config(content: &str, source_path: &Path) -> Result<ConfigFile> {
    if content.trim().is_empty() {
        return Ok(ConfigFile::default());
    }

    serde_yaml::from_str(content).map_err(|e| ProvisionError::ConfigParseError {
        path: source_path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Merge defaults, an optional file and overrides into an [`InstallConfig`].
///
/// `home` is the fallback install root when neither layer sets one.
pub fn resolve_config(
    file: Option<ConfigFile>,
    overrides: &ConfigOverrides,
    home: Option<&Path>,
) -> Result<InstallConfig> {
    let file = file.unwrap_or_default();

    let install_root = overrides
        .install_root
        .clone()
        .or(file.install_root)
        .or_else(|| home.map(Path::to_path_buf))
        .ok_or_else(|| ProvisionError::ConfigValidationError {
            message: "could not determine the home directory; pass --install-root".to_string(),
        })?;

    let config = InstallConfig {
        install_root,
        license_server_host: overrides
            .license_server_host
            .clone()
            .or(file.license_server_host)
            .unwrap_or_else(|| DEFAULT_LICENSE_HOST.to_string()),
        license_server_port: overrides
            .license_server_port
            .or(file.license_server_port)
            .unwrap_or(DEFAULT_LICENSE_PORT),
    };

    validate(&config)?;
    Ok(config)
}

/// Load the config file (explicit path or user default) and resolve it.
pub fn load_install_config(
    explicit: Option<&Path>,
    overrides: &ConfigOverrides,
) -> Result<InstallConfig> {
    let file = match explicit {
        Some(path) => Some(load_config_file(path)?),
        None => match find_user_config() {
            Some(path) => {
                tracing::debug!("Loading user config from {}", path.display());
                Some(load_config_file(&path)?)
            }
            None => None,
        },
    };

    let home = dirs::home_dir();
    resolve_config(file, overrides, home.as_deref())
}

/// Check a resolved config for values the run cannot work with.
pub fn validate(config: &InstallConfig) -> Result<()> {
    if !config.install_root.is_absolute() {
        return Err(ProvisionError::ConfigValidationError {
            message: format!(
                "install root must be an absolute path, got '{}'",
                config.install_root.display()
            ),
        });
    }

    if config.license_server_host.trim().is_empty() {
        return Err(ProvisionError::ConfigValidationError {
            message: "license server host must not be empty".to_string(),
        });
    }

    if config.license_server_port == 0 {
        return Err(ProvisionError::ConfigValidationError {
            message: "license server port must be between 1 and 65535".to_string(),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn defaults_use_home_directory() {
        let config =
            resolve_config(None, &ConfigOverrides::default(), Some(Path::new("/home/ada"))).unwrap();
        assert_eq!(config.install_root, PathBuf::from("/home/ada"));
        assert_eq!(config.license_server_host, DEFAULT_LICENSE_HOST);
        assert_eq!(config.license_server_port, DEFAULT_LICENSE_PORT);
    }

    #[test]
    fn file_values_override_defaults() {
        let file = ConfigFile {
            install_root: Some(PathBuf::from("/opt/cossan")),
            license_server_host: Some("lic.example.com".to_string()),
            license_server_port: None,
        };
        let config =
            resolve_config(Some(file), &ConfigOverrides::default(), Some(Path::new("/home/ada")))
                .unwrap();
        assert_eq!(config.install_root, PathBuf::from("/opt/cossan"));
        assert_eq!(config.license_server_host, "lic.example.com");
        assert_eq!(config.license_server_port, DEFAULT_LICENSE_PORT);
    }

    #[test]
    fn overrides_win_over_file() {
        let file = ConfigFile {
            install_root: Some(PathBuf::from("/opt/cossan")),
            license_server_host: Some("lic.example.com".to_string()),
            license_server_port: Some(9000),
        };
        let overrides = ConfigOverrides {
            install_root: Some(PathBuf::from("/srv/cossan")),
            license_server_host: None,
            license_server_port: Some(9100),
        };
        let config = resolve_config(Some(file), &overrides, None).unwrap();
        assert_eq!(config.install_root, PathBuf::from("/srv/cossan"));
        assert_eq!(config.license_server_host, "lic.example.com");
        assert_eq!(config.license_server_port, 9100);
    }

    #[test]
    fn missing_home_without_root_is_an_error() {
        let result = resolve_config(None, &ConfigOverrides::default(), None);
        assert!(matches!(
            result,
            Err(ProvisionError::ConfigValidationError { .. })
        ));
    }

    #[test]
    fn relative_install_root_is_rejected() {
        let overrides = ConfigOverrides {
            install_root: Some(PathBuf::from("relative/dir")),
            ..Default::default()
        };
        let err = resolve_config(None, &overrides, None).unwrap_err();
        assert!(err.to_string().contains("absolute"));
    }

    #[test]
    fn zero_port_is_rejected() {
        let overrides = ConfigOverrides {
            install_root: Some(PathBuf::from("/opt/app")),
            license_server_port: Some(0),
            ..Default::default()
        };
        assert!(resolve_config(None, &overrides, None).is_err());
    }

    #[test]
    fn blank_host_is_rejected() {
        let overrides = ConfigOverrides {
            install_root: Some(PathBuf::from("/opt/app")),
            license_server_host: Some("  ".to_string()),
            ..Default::default()
        };
        assert!(resolve_config(None, &overrides, None).is_err());
    }

    #[test]
    fn load_config_file_reports_missing_file() {
        let temp = TempDir::new().unwrap();
        let result = load_config_file(&temp.path().join("nope.yml"));
        assert!(matches!(result, Err(ProvisionError::ConfigNotFound { .. })));
    }

    #[test]
    fn load_config_file_reports_parse_errors() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("bad.yml");
        fs::write(&path, "license_server_port: not-a-number").unwrap();
        let result = load_config_file(&path);
        assert!(matches!(result, Err(ProvisionError::ConfigParseError { .. })));
    }

    #[test]
    fn empty_file_is_accepted() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("empty.yml");
        fs::write(&path, "\n").unwrap();
        assert_eq!(load_config_file(&path).unwrap(), ConfigFile::default());
    }

    #[test]
    fn explicit_file_is_loaded() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("setup.yml");
        fs::write(
            &path,
            "install_root: /opt/cossan\nlicense_server_host: lic.example.com\n",
        )
        .unwrap();

        let config = load_install_config(Some(&path), &ConfigOverrides::default()).unwrap();
        assert_eq!(config.install_root, PathBuf::from("/opt/cossan"));
        assert_eq!(config.license_server_host, "lic.example.com");
    }
}
