//! Episode index discovery.
//!
//! Loads the podcast's episode listing in a single request and collects the
//! `href` of every anchor marked as playable, in document order.
//!
//! # Example
//!
//! ```no_run
//! use podgrab_core::{HttpClient, discover_episode_links};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = HttpClient::new();
//! let links = discover_episode_links(&client, "https://player.fm/series/example").await?;
//! for link in &links {
//!     println!("{link}");
//! }
//! # Ok(())
//! # }
//! ```

mod error;
pub mod html;

use tracing::{debug, info, instrument};

use crate::download::{HttpClient, RequestFailure};

pub use error::IndexError;

/// Query appended to the base URL to list every episode on one page.
pub const INDEX_QUERY: &str = "/episodes?active=true&limit=10000&order=newest&offset=1";

/// Class substring that marks an anchor as a playable audio link.
pub const PLAYABLE_CLASS: &str = "action normal playable";

/// Builds the index page URL for a podcast base URL.
#[must_use]
pub fn index_url(base_url: &str) -> String {
    format!("{}{INDEX_QUERY}", base_url.trim_end_matches('/'))
}

/// Fetches the index page body.
///
/// # Errors
///
/// Returns [`IndexError::Fetch`] or [`IndexError::HttpStatus`] when the page
/// cannot be loaded, and [`IndexError::Read`] when the body cannot be read.
#[instrument(skip(client))]
pub async fn fetch_index(client: &HttpClient, base_url: &str) -> Result<String, IndexError> {
    let url = index_url(base_url);
    let response = client.get_ok(&url).await.map_err(|failure| match failure {
        RequestFailure::Network(source) => IndexError::fetch(&url, source),
        RequestFailure::Status(status) => IndexError::http_status(&url, status.as_u16()),
    })?;
    let body = response
        .bytes()
        .await
        .map_err(|e| IndexError::read(&url, e))?;
    debug!(bytes = body.len(), "index page loaded");
    Ok(String::from_utf8_lossy(&body).into_owned())
}

/// Collects the playable episode links of an index page.
///
/// An anchor qualifies when it has both a `class` containing
/// [`PLAYABLE_CLASS`] and an `href`. Order and duplicates are preserved.
///
/// # Errors
///
/// Returns [`IndexError::NoLinksFound`] when no anchor qualifies.
pub fn extract_episode_links(body: &str) -> Result<Vec<String>, IndexError> {
    let links: Vec<String> = html::start_tags(body)
        .filter(|tag| tag.name() == "a")
        .filter_map(|tag| {
            let mut class = None;
            let mut href = None;
            for (key, value) in tag.attributes() {
                match key.as_str() {
                    "class" => class = Some(value),
                    "href" => href = Some(value),
                    _ => {}
                }
            }
            class
                .filter(|class| class.contains(PLAYABLE_CLASS))
                .and(href)
        })
        .collect();

    if links.is_empty() {
        return Err(IndexError::NoLinksFound);
    }
    Ok(links)
}

/// Fetches the index page and extracts its episode links.
///
/// # Errors
///
/// Returns any error of [`fetch_index`] or [`extract_episode_links`].
pub async fn discover_episode_links(
    client: &HttpClient,
    base_url: &str,
) -> Result<Vec<String>, IndexError> {
    let body = fetch_index(client, base_url).await?;
    let links = extract_episode_links(&body)?;
    info!(episodes = links.len(), "episode links discovered");
    Ok(links)
}
