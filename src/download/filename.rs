//! File name derivation and temporary path handling for episode downloads.
//!
//! The derived name decides resume detection, so it must be stable: the same
//! episode URL always maps to the same file name, with no sanitization.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use super::constants::{DEST_MARKER, PART_SUFFIX};

/// Derives the on-disk file name for an episode URL.
///
/// Everything from the first `?dest-` marker on is dropped, then the last
/// non-empty `/`-separated segment is returned. Returns an empty string when
/// the URL has no such segment.
///
/// # Example
///
/// ```
/// use podgrab_core::derive_file_name;
///
/// assert_eq!(
///     derive_file_name("https://cdn.example/audio/episode-42.mp3?dest-abc"),
///     "episode-42.mp3"
/// );
/// ```
#[must_use]
pub fn derive_file_name(url: &str) -> &str {
    let base = url.split(DEST_MARKER).next().unwrap_or(url);
    base.rsplit('/')
        .find(|segment| !segment.is_empty())
        .unwrap_or("")
}

/// Returns the `.part` sibling used while an episode is in flight.
#[must_use]
pub fn part_path(final_path: &Path) -> PathBuf {
    let mut name = OsString::from(final_path.as_os_str());
    name.push(PART_SUFFIX);
    PathBuf::from(name)
}
