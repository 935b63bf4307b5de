//! Configuration loading and the derived filesystem layout.
//!
//! - Schema definitions in [`schema`]
//! - File loading, layering and validation in [`loader`]
//! - Path derivation in [`layout`]
//!
//! # Example
//!
//! ```
//! use cossan_setup::config::{resolve_config, ConfigOverrides, Layout};
//! use std::path::Path;
//!
//! let overrides = ConfigOverrides {
//!     license_server_host: Some("lic.example.com".to_string()),
//!     ..Default::default()
//! };
//! let config = resolve_config(None, &overrides, Some(Path::new("/opt/app"))).unwrap();
//! assert_eq!(config.license_server_port, 8765);
//!
//! let layout = Layout::new(&config);
//! assert_eq!(layout.build_dir(), Path::new("/opt/app/build"));
//! ```

pub mod layout;
pub mod loader;
pub mod schema;

pub use layout::{Layout, COSSANX_URL, MCR_URL, WEBKIT_PACKAGE};
pub use loader::{
    find_user_config, load_config_file, load_install_config, parse_config, resolve_config,
    validate, ConfigOverrides, USER_CONFIG_FILE,
};
pub use schema::{ConfigFile, InstallConfig, DEFAULT_LICENSE_HOST, DEFAULT_LICENSE_PORT};
