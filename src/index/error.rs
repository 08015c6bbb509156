//! Error types for episode index discovery.

use thiserror::Error;

/// Errors raised while loading or parsing the episode index page.
///
/// All of them are fatal to a run: without the link list there is nothing
/// to download.
#[derive(Debug, Error)]
pub enum IndexError {
    /// Transport error on the index request.
    #[error("can't download the HTML from {url}: {source}")]
    Fetch {
        /// Index URL that was requested.
        url: String,
        /// The underlying network error.
        #[source]
        source: reqwest::Error,
    },

    /// The index endpoint answered with a status other than 200.
    #[error("can't download the HTML from {url}: HTTP {status}")]
    HttpStatus {
        /// Index URL that was requested.
        url: String,
        /// The HTTP status code.
        status: u16,
    },

    /// The response body could not be read completely.
    #[error("invalid response body from {url}: {source}")]
    Read {
        /// Index URL that was requested.
        url: String,
        /// The underlying network error.
        #[source]
        source: reqwest::Error,
    },

    /// The page parsed but contained no playable episode links.
    #[error("no mp3 link found")]
    NoLinksFound,
}

impl IndexError {
    /// Creates a transport error.
    pub fn fetch(url: impl Into<String>, source: reqwest::Error) -> Self {
        Self::Fetch {
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

    /// Creates a body read error.
    pub fn read(url: impl Into<String>, source: reqwest::Error) -> Self {
        Self::Read {
            url: url.into(),
            source,
        }
    }

    /// True when the page loaded but yielded nothing, false for load failures.
    #[must_use]
    pub fn is_parse_failure(&self) -> bool {
        matches!(self, Self::NoLinksFound)
    }
}
