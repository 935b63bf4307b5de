//! HTTP archive downloads.
//!
//! Bodies are streamed to `<destination>.part` and renamed into place only
//! once fully written, so an interrupted transfer never leaves a file at
//! the destination path.

use super::Downloader;
use crate::error::{ProvisionError, Result};
use indicatif::{ProgressBar, ProgressStyle};
use reqwest::blocking::Client;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Downloads archives over HTTP/HTTPS.
pub struct HttpDownloader {
    client: Client,
    connect_timeout: Duration,
    show_progress: bool,
}

impl HttpDownloader {
    /// Create a downloader with a 30-second connect timeout.
    pub fn new() -> Result<Self> {
        Self::with_connect_timeout(Duration::from_secs(30))
    }

    /// Create a downloader with a custom connect timeout.
    ///
    /// There is no overall timeout: the archives are several hundred
    /// megabytes.
    pub fn with_connect_timeout(connect_timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("cossan-setup/", env!("CARGO_PKG_VERSION")))
            .connect_timeout(connect_timeout)
            .timeout(None::<Duration>)
            .build()
            .map_err(|e| ProvisionError::Other(anyhow::anyhow!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            connect_timeout,
            show_progress: true,
        })
    }

    /// Enable or disable the progress bar.
    pub fn with_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    /// Get the configured connect timeout.
    pub fn connect_timeout(&self) -> Duration {
        self.connect_timeout
    }

    fn progress_bar(&self, len: Option<u64>, destination: &Path) -> ProgressBar {
        if !self.show_progress {
            return ProgressBar::hidden();
        }

        let name = destination
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();

        let bar = match len {
            Some(len) => {
                let bar = ProgressBar::new(len);
                bar.set_style(
                    ProgressStyle::with_template(
                        "{msg} [{bar:30.magenta}] {bytes}/{total_bytes} ({bytes_per_sec}, {eta})",
                    )
                    .unwrap_or_else(|_| ProgressStyle::default_bar())
                    .progress_chars("=> "),
                );
                bar
            }
            None => {
                let bar = ProgressBar::new_spinner();
                bar.set_style(
                    ProgressStyle::with_template("{spinner:.magenta} {msg} {bytes}")
                        .unwrap_or_else(|_| ProgressStyle::default_spinner()),
                );
                bar
            }
        };
        bar.set_message(name);
        bar
    }
}

impl Downloader for HttpDownloader {
    fn download(&self, url: &str, destination: &Path) -> Result<u64> {
        let failed = |message: String| ProvisionError::DownloadFailed {
            url: url.to_string(),
            message,
        };

        let mut response = self
            .client
            .get(url)
            .send()
            .map_err(|e| failed(e.to_string()))?;

        if !response.status().is_success() {
            return Err(failed(format!("HTTP {}", response.status())));
        }

        let partial = partial_path(destination);
        let file = File::create(&partial).map_err(|source| ProvisionError::FileIo {
            action: "create",
            path: partial.clone(),
            source,
        })?;

        let bar = self.progress_bar(response.content_length(), destination);
        let mut writer = bar.wrap_write(BufWriter::new(file));

        let copied = response
            .copy_to(&mut writer)
            .map_err(|e| failed(e.to_string()))
            .and_then(|bytes| {
                writer.flush().map_err(|e| failed(e.to_string()))?;
                Ok(bytes)
            });
        drop(writer);
        bar.finish_and_clear();

        let bytes = match copied {
            Ok(bytes) => bytes,
            Err(e) => {
                let _ = fs::remove_file(&partial);
                return Err(e);
            }
        };

        fs::rename(&partial, destination).map_err(|source| ProvisionError::FileIo {
            action: "rename",
            path: partial,
            source,
        })?;

        tracing::debug!("Downloaded {} bytes to {}", bytes, destination.display());
        Ok(bytes)
    }
}

/// Staging path a download is written to before it is complete.
pub fn partial_path(destination: &Path) -> PathBuf {
    let mut name = destination
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".part");
    destination.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use tempfile::TempDir;

    fn downloader() -> HttpDownloader {
        HttpDownloader::with_connect_timeout(Duration::from_secs(5))
            .unwrap()
            .with_progress(false)
    }

    #[test]
    fn default_connect_timeout_is_30_seconds() {
        let downloader = HttpDownloader::new().unwrap();
        assert_eq!(downloader.connect_timeout(), Duration::from_secs(30));
    }

    #[test]
    fn partial_path_appends_suffix() {
        assert_eq!(
            partial_path(Path::new("/b/MCR.zip")),
            PathBuf::from("/b/MCR.zip.part")
        );
    }

    #[test]
    fn download_writes_body_to_destination() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET).path("/archive.zip");
            then.status(200).body("PK\x03\x04payload");
        });

        let temp = TempDir::new().unwrap();
        let dest = temp.path().join("archive.zip");
        let bytes = downloader()
            .download(&server.url("/archive.zip"), &dest)
            .unwrap();

        mock.assert_calls(1);
        assert_eq!(bytes, 11);
        assert_eq!(fs::read(&dest).unwrap(), b"PK\x03\x04payload");
        assert!(!partial_path(&dest).exists());
    }

    #[test]
    fn download_follows_query_strings() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/s/bundle.zip")
                .query_param("dl", "1");
            then.status(200).body("zip");
        });

        let temp = TempDir::new().unwrap();
        let dest = temp.path().join("bundle.zip");
        downloader()
            .download(&server.url("/s/bundle.zip?dl=1&pv=1"), &dest)
            .unwrap();

        mock.assert();
        assert_eq!(fs::read_to_string(&dest).unwrap(), "zip");
    }

    #[test]
    fn http_error_status_is_download_failure() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/missing.zip");
            then.status(404).body("Not Found");
        });

        let temp = TempDir::new().unwrap();
        let dest = temp.path().join("missing.zip");
        let err = downloader()
            .download(&server.url("/missing.zip"), &dest)
            .unwrap_err();

        assert!(matches!(err, ProvisionError::DownloadFailed { .. }));
        assert!(err.to_string().contains("404"), "{}", err);
        assert!(!dest.exists());
        assert!(!partial_path(&dest).exists());
    }

    #[test]
    fn connection_error_is_download_failure() {
        let temp = TempDir::new().unwrap();
        let dest = temp.path().join("a.zip");
        let err = downloader()
            .download("http://127.0.0.1:1/a.zip", &dest)
            .unwrap_err();

        assert!(matches!(err, ProvisionError::DownloadFailed { .. }));
        assert!(!dest.exists());
    }

    #[test]
    fn stale_partial_file_is_replaced() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/a.zip");
            then.status(200).body("complete");
        });

        let temp = TempDir::new().unwrap();
        let dest = temp.path().join("a.zip");
        fs::write(partial_path(&dest), "trunc").unwrap();

        downloader().download(&server.url("/a.zip"), &dest).unwrap();

        assert_eq!(fs::read_to_string(&dest).unwrap(), "complete");
        assert!(!partial_path(&dest).exists());
    }
}
