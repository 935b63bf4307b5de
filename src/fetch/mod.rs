//! Archive downloading.

pub mod http;

pub use http::{partial_path, HttpDownloader};

use crate::error::Result;
use std::path::Path;

/// Fetches a URL's content into a local file.
pub trait Downloader {
    /// Download `url` to `destination`, returning the number of bytes written.
    ///
    /// Implementations overwrite whatever is at `destination`; skipping
    /// already-downloaded files is the caller's job.
    fn download(&self, url: &str, destination: &Path) -> Result<u64>;
}
