//! Streaming episode downloader.
//!
//! One call downloads one episode: it announces the expected size on the
//! shared `size` channel, skips the transfer when an identical-size file is
//! already present, otherwise streams the body into `<name>.part` while
//! publishing the running byte count, and finally renames the `.part` file
//! into place.
//!
//! The `progress` sender is moved into the call and dropped when it returns,
//! so the channel is closed exactly once on every exit path.

use std::path::{Path, PathBuf};

use futures_util::{Stream, StreamExt};
use reqwest::header::CONTENT_LENGTH;
use tokio::fs::File;
use tokio::io::{AsyncWriteExt, BufWriter};
use tokio::sync::mpsc;
use tracing::{debug, info, instrument, warn};

use super::client::{HttpClient, RequestFailure};
use super::error::DownloadError;
use super::filename::part_path;
use super::resume::is_complete;
use crate::config::DownloadConfig;
use crate::progress::SizeSignal;

/// Result of a finished episode download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadOutcome {
    /// The body was streamed and renamed to its final path.
    Downloaded {
        /// Final output path.
        path: PathBuf,
        /// Bytes written to disk.
        bytes: u64,
    },
    /// A file of the expected size already existed; nothing was transferred.
    AlreadyComplete {
        /// Existing output path.
        path: PathBuf,
        /// Size of the existing file.
        bytes: u64,
    },
}

impl DownloadOutcome {
    /// Final path of the episode on disk.
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::Downloaded { path, .. } | Self::AlreadyComplete { path, .. } => path,
        }
    }
}

/// Downloads episodes into a fixed directory.
///
/// Cheap to clone, so each spawned download task can own its copy.
#[derive(Debug, Clone)]
pub struct EpisodeDownloader {
    client: HttpClient,
    download_dir: PathBuf,
}

impl EpisodeDownloader {
    /// Creates a downloader that saves into `download_dir`.
    #[must_use]
    pub fn new(client: HttpClient, download_dir: impl Into<PathBuf>) -> Self {
        Self {
            client,
            download_dir: download_dir.into(),
        }
    }

    /// Creates a downloader from a [`DownloadConfig`].
    #[must_use]
    pub fn from_config(client: HttpClient, config: &DownloadConfig) -> Self {
        Self::new(client, config.download_dir.clone())
    }

    /// Downloads `url` into `<download_dir>/<file_name>`.
    ///
    /// Sends exactly one [`SizeSignal`] on `size`: [`SizeSignal::Unavailable`]
    /// when the request fails, otherwise the parsed `Content-Length` (0 when
    /// absent or unparsable). Each progress sample is strictly greater than
    /// the previous one.
    ///
    /// # Errors
    ///
    /// - [`DownloadError::EpisodeFetch`] / [`DownloadError::HttpStatus`] when
    ///   the request fails or the body stream breaks
    /// - [`DownloadError::Io`] when the directory or `.part` file cannot be
    ///   created or written
    /// - [`DownloadError::Rename`] when the finished file cannot be moved into
    ///   place
    #[instrument(skip(self, size, progress), fields(url = %url))]
    pub async fn download(
        &self,
        url: &str,
        file_name: &str,
        size: mpsc::Sender<SizeSignal>,
        progress: mpsc::Sender<u64>,
    ) -> Result<DownloadOutcome, DownloadError> {
        let response = match self.client.get_ok(url).await {
            Ok(response) => response,
            Err(failure) => {
                announce(&size, SizeSignal::Unavailable).await;
                return Err(match failure {
                    RequestFailure::Network(source) => DownloadError::episode_fetch(url, source),
                    RequestFailure::Status(status) => {
                        DownloadError::http_status(url, status.as_u16())
                    }
                });
            }
        };

        let expected_size = parse_content_length(&response);
        announce(&size, SizeSignal::Total(expected_size)).await;

        tokio::fs::create_dir_all(&self.download_dir)
            .await
            .map_err(|e| DownloadError::io(self.download_dir.clone(), e))?;

        let final_path = self.download_dir.join(file_name);
        if is_complete(&final_path, expected_size).await {
            info!(path = %final_path.display(), bytes = expected_size, "episode already complete, skipping");
            let _ = progress.send(expected_size).await;
            return Ok(DownloadOutcome::AlreadyComplete {
                path: final_path,
                bytes: expected_size,
            });
        }

        let temp_path = part_path(&final_path);
        let mut file = File::create(&temp_path)
            .await
            .map_err(|e| DownloadError::io(temp_path.clone(), e))?;

        let streamed =
            stream_to_file(&mut file, response.bytes_stream(), url, &temp_path, &progress).await;
        drop(file);
        let bytes = match streamed {
            Ok(bytes) => bytes,
            Err(error) => {
                debug!(path = %temp_path.display(), "cleaning up partial file after error");
                let _ = tokio::fs::remove_file(&temp_path).await;
                return Err(error);
            }
        };

        if expected_size > 0 && bytes != expected_size {
            warn!(
                expected = expected_size,
                actual = bytes,
                "body length differs from Content-Length"
            );
        }

        tokio::fs::rename(&temp_path, &final_path)
            .await
            .map_err(|e| DownloadError::rename(temp_path.clone(), final_path.clone(), e))?;

        info!(path = %final_path.display(), bytes, "download complete");
        Ok(DownloadOutcome::Downloaded {
            path: final_path,
            bytes,
        })
    }
}

/// Sends the size signal; a missing renderer only means nobody is watching.
async fn announce(size: &mpsc::Sender<SizeSignal>, signal: SizeSignal) {
    if size.send(signal).await.is_err() {
        debug!(?signal, "size receiver dropped");
    }
}

fn parse_content_length(response: &reqwest::Response) -> u64 {
    response
        .headers()
        .get(CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<u64>().ok())
        .unwrap_or(0)
}

/// Streams body chunks to file, publishing the running byte count before
/// each chunk is written. Returns bytes written.
async fn stream_to_file<S, B>(
    file: &mut File,
    body: S,
    url: &str,
    file_path: &Path,
    progress: &mpsc::Sender<u64>,
) -> Result<u64, DownloadError>
where
    S: Stream<Item = Result<B, reqwest::Error>>,
    B: AsRef<[u8]>,
{
    let mut writer = BufWriter::new(file);
    let mut stream = std::pin::pin!(body);
    let mut bytes_written: u64 = 0;

    while let Some(chunk_result) = stream.next().await {
        let chunk = chunk_result.map_err(|e| DownloadError::episode_fetch(url, e))?;
        let chunk = chunk.as_ref();
        if chunk.is_empty() {
            continue;
        }

        bytes_written += chunk.len() as u64;
        // Bounded channel: a slow renderer slows the transfer down.
        let _ = progress.send(bytes_written).await;

        writer
            .write_all(chunk)
            .await
            .map_err(|e| DownloadError::io(file_path.to_path_buf(), e))?;
    }

    writer
        .flush()
        .await
        .map_err(|e| DownloadError::io(file_path.to_path_buf(), e))?;

    Ok(bytes_written)
}
