//! Error types for the download module.
//!
//! Every variant is local to one episode: the pipeline logs it and moves on
//! to the next link.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while downloading a single episode.
#[derive(Debug, Error)]
pub enum DownloadError {
    /// Network-level error (DNS resolution, connection refused, broken body stream).
    #[error("network error downloading {url}: {source}")]
    EpisodeFetch {
        /// The URL that failed to download.
        url: String,
        /// The underlying network error.
        #[source]
        source: reqwest::Error,
    },

    /// The episode server answered with something other than 200.
    #[error("HTTP {status} downloading {url}")]
    HttpStatus {
        /// The URL that returned an error status.
        url: String,
        /// The HTTP status code.
        status: u16,
    },

    /// File system error (create directory, create `.part` file, write).
    #[error("IO error writing to {path}: {source}")]
    Io {
        /// The file path where the error occurred.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// Renaming the finished `.part` file to its final name failed.
    #[error("failed to rename {from} to {to}: {source}")]
    Rename {
        /// Temporary path holding the complete body.
        from: PathBuf,
        /// Intended final path.
        to: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },
}

impl DownloadError {
    /// Creates a network error from a reqwest error.
    pub fn episode_fetch(url: impl Into<String>, source: reqwest::Error) -> Self {
        Self::EpisodeFetch {
            url: url.into(),
            source,
        }
    }

    /// Creates an HTTP status error.
    pub fn http_status(url: impl Into<String>, status: u16) -> Self {
        Self::HttpStatus {
            url: url.into(),
            status,
        }
    }

    /// Creates an IO error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Creates a rename error.
    pub fn rename(from: impl Into<PathBuf>, to: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Rename {
            from: from.into(),
            to: to.into(),
            source,
        }
    }
}

// No `From<reqwest::Error>` / `From<std::io::Error>`: every variant needs the
// url or path, which the source errors don't carry.

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_download_error_http_status_display() {
        let error = DownloadError::http_status("https://cdn.example/ep.mp3", 404);
        let msg = error.to_string();
        assert!(msg.contains("404"), "Expected '404' in: {msg}");
        assert!(
            msg.contains("https://cdn.example/ep.mp3"),
            "Expected URL in: {msg}"
        );
    }

    #[test]
    fn test_download_error_io_display() {
        let io_error = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let error = DownloadError::io(PathBuf::from("/tmp/ep.mp3.part"), io_error);
        let msg = error.to_string();
        assert!(msg.contains("/tmp/ep.mp3.part"), "Expected path in: {msg}");
    }

    #[test]
    fn test_download_error_rename_display_names_both_paths() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let error = DownloadError::rename("Downloads/a.mp3.part", "Downloads/a.mp3", io_error);
        let msg = error.to_string();
        assert!(msg.contains("Downloads/a.mp3.part"), "Expected source in: {msg}");
        assert!(msg.contains("to Downloads/a.mp3"), "Expected target in: {msg}");
    }
}
