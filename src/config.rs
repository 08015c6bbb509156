//! Runtime settings for an episode download run.

use std::path::PathBuf;
use std::time::Duration;

use crate::download::constants::{
    CONNECT_TIMEOUT_SECS, DEFAULT_DOWNLOAD_DIR, DEFAULT_PROGRESS_CAPACITY,
};

/// Settings shared by the HTTP client, the downloader and the pipeline.
///
/// The defaults reproduce the tool's fixed behavior: files land in
/// `Downloads/` under the working directory and the progress channel holds a
/// single in-flight sample.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadConfig {
    /// Directory the episodes are saved into.
    pub download_dir: PathBuf,
    /// TCP connect timeout for index and episode requests.
    pub connect_timeout: Duration,
    /// Capacity of the per-download progress channel (at least 1).
    pub progress_capacity: usize,
}

impl Default for DownloadConfig {
    fn default() -> Self {
        Self {
            download_dir: PathBuf::from(DEFAULT_DOWNLOAD_DIR),
            connect_timeout: Duration::from_secs(CONNECT_TIMEOUT_SECS),
            progress_capacity: DEFAULT_PROGRESS_CAPACITY,
        }
    }
}

impl DownloadConfig {
    /// Returns a config that saves into `download_dir`, other values default.
    #[must_use]
    pub fn with_download_dir(download_dir: impl Into<PathBuf>) -> Self {
        Self {
            download_dir: download_dir.into(),
            ..Self::default()
        }
    }

    /// Progress channel capacity clamped to the minimum tokio accepts.
    #[must_use]
    pub fn progress_capacity(&self) -> usize {
        self.progress_capacity.max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_uses_downloads_dir() {
        let config = DownloadConfig::default();
        assert_eq!(config.download_dir, PathBuf::from("Downloads"));
        assert_eq!(config.connect_timeout, Duration::from_secs(30));
        assert_eq!(config.progress_capacity(), 1);
    }

    #[test]
    fn test_zero_progress_capacity_is_clamped() {
        let config = DownloadConfig {
            progress_capacity: 0,
            ..DownloadConfig::default()
        };
        assert_eq!(config.progress_capacity(), 1);
    }

    #[test]
    fn test_with_download_dir_keeps_other_defaults() {
        let config = DownloadConfig::with_download_dir("/tmp/episodes");
        assert_eq!(config.download_dir, PathBuf::from("/tmp/episodes"));
        assert_eq!(config.progress_capacity, DEFAULT_PROGRESS_CAPACITY);
    }
}
