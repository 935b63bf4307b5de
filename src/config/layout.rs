//! Filesystem layout of an installation.
//!
//! Every path the run reads or writes is derived from the install root,
//! so the whole layout is a pure function of [`InstallConfig`].

use crate::config::schema::InstallConfig;
use std::path::{Path, PathBuf};

/// System package the COSSAN-X UI needs at runtime.
pub const WEBKIT_PACKAGE: &str = "webkitgtk";

/// Download location of the MCR R2014a installer.
pub const MCR_URL: &str = "http://uk.mathworks.com/supportfiles/downloads/R2014a/deployment_files/R2014a/installers/glnxa64/MCR_R2014a_glnxa64_installer.zip";

/// Download location of the COSSAN-X bundle.
pub const COSSANX_URL: &str =
    "https://www.dropbox.com/s/o5x6rv7ycxdhfd1/COSSANX_Linux_R2014a.zip?dl=1&pv=1";

const BUILD_DIR: &str = "build";
const MCR_ARCHIVE: &str = "MCR_R2014a_glnxa64_installer.zip";
const MCR_EXTRACT_DIR: &str = "mcr_extracted_archive";
const MCR_RESPONSE_FILE: &str = "mcr_config";
const MCR_INSTALLER: &str = "install";
const MCR_INSTALL_DIR: &str = "mcr";
const MCR_INSTALL_LOG: &str = "mcr_install_log";
const COSSANX_ARCHIVE: &str = "COSSANX_Linux_R2014a.zip";
const COSSANX_INSTALL_DIR: &str = "cossanx";
const COSSANX_BUNDLE_DIR: &str = "COSSANX_Linux_R2014a";
const LAUNCHER_SCRIPT: &str = "start_cossan.sh";
const POINTER_FILE: &str = "mcr.ini";

/// All paths used by a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    root: PathBuf,
}

impl Layout {
    /// Derive the layout for a config.
    pub fn new(config: &InstallConfig) -> Self {
        Self::from_root(&config.install_root)
    }

    /// Derive the layout for an install root.
    pub fn from_root(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Scratch directory for downloads and extraction staging.
    pub fn build_dir(&self) -> PathBuf {
        self.root.join(BUILD_DIR)
    }

    pub fn mcr_archive(&self) -> PathBuf {
        self.build_dir().join(MCR_ARCHIVE)
    }

    pub fn mcr_extract_dir(&self) -> PathBuf {
        self.build_dir().join(MCR_EXTRACT_DIR)
    }

    /// Response file consumed by the MCR installer.
    pub fn mcr_response_file(&self) -> PathBuf {
        self.mcr_extract_dir().join(MCR_RESPONSE_FILE)
    }

    pub fn mcr_installer(&self) -> PathBuf {
        self.mcr_extract_dir().join(MCR_INSTALLER)
    }

    pub fn mcr_install_dir(&self) -> PathBuf {
        self.root.join(MCR_INSTALL_DIR)
    }

    pub fn mcr_install_log(&self) -> PathBuf {
        self.mcr_install_dir().join(MCR_INSTALL_LOG)
    }

    pub fn cossanx_archive(&self) -> PathBuf {
        self.build_dir().join(COSSANX_ARCHIVE)
    }

    /// Extraction target of the COSSAN-X archive.
    pub fn cossanx_install_dir(&self) -> PathBuf {
        self.root.join(COSSANX_INSTALL_DIR)
    }

    /// Directory inside the archive holding the launcher and `mcr.ini`.
    pub fn cossanx_bundle_dir(&self) -> PathBuf {
        self.cossanx_install_dir().join(COSSANX_BUNDLE_DIR)
    }

    pub fn launcher_script(&self) -> PathBuf {
        self.cossanx_bundle_dir().join(LAUNCHER_SCRIPT)
    }

    /// Pointer file telling COSSAN-X where the MCR lives.
    pub fn pointer_file(&self) -> PathBuf {
        self.cossanx_bundle_dir().join(POINTER_FILE)
    }
}
