//! Podgrab Core Library
//!
//! This library provides the episode download pipeline behind the `podgrab`
//! tool: it discovers the playable audio links on a player.fm podcast page
//! and streams each episode to disk while a renderer draws live progress.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//! - [`index`] - Index page fetch and playable link extraction
//! - [`download`] - Streaming episode downloader, file naming and resume checks
//! - [`progress`] - Size/progress channel protocol and the terminal renderer
//! - [`pipeline`] - Sequential driver tying downloader and renderer together
//! - [`config`] - Runtime settings shared by the pipeline

// Clippy lints - strict for library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod download;
pub mod index;
pub mod pipeline;
pub mod progress;

// Re-export commonly used types
pub use config::DownloadConfig;
pub use download::{
    DownloadError, DownloadOutcome, EpisodeDownloader, HttpClient, derive_file_name, is_complete,
};
pub use index::{IndexError, discover_episode_links, extract_episode_links};
pub use pipeline::{RunSummary, run_episodes};
pub use progress::{ProgressRenderer, SizeSignal};
