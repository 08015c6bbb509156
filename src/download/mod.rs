//! Streaming episode downloads.
//!
//! This module turns one episode URL into one file on disk while reporting
//! byte-level progress over channels.
//!
//! # Features
//!
//! - Streaming downloads (memory-efficient for large audio files)
//! - Stable file names derived from the URL ([`derive_file_name`])
//! - In-flight bytes kept under a `.part` name, renamed on success
//! - Skips episodes already on disk at the advertised size ([`is_complete`])
//!
//! # Example
//!
//! ```no_run
//! use podgrab_core::{EpisodeDownloader, HttpClient, SizeSignal, derive_file_name};
//! use tokio::sync::mpsc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let url = "https://cdn.example/audio/episode-42.mp3?dest-abc";
//! let downloader = EpisodeDownloader::new(HttpClient::new(), "Downloads");
//! let (size_tx, mut size_rx) = mpsc::channel::<SizeSignal>(1);
//! let (progress_tx, mut progress_rx) = mpsc::channel::<u64>(1);
//!
//! let task = tokio::spawn(async move {
//!     downloader.download(url, derive_file_name(url), size_tx, progress_tx).await
//! });
//! println!("size: {:?}", size_rx.recv().await);
//! while let Some(written) = progress_rx.recv().await {
//!     println!("{written} bytes");
//! }
//! let outcome = task.await??;
//! println!("saved to {}", outcome.path().display());
//! # Ok(())
//! # }
//! ```

mod client;
pub mod constants;
mod episode;
mod error;
mod filename;
mod resume;

pub use client::{HttpClient, RequestFailure};
pub use episode::{DownloadOutcome, EpisodeDownloader};
pub use error::DownloadError;
pub use filename::{derive_file_name, part_path};
pub use resume::is_complete;
