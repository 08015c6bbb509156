//! Constants for the download module (paths, timeouts, channel sizing).

/// Default download directory, relative to the working directory.
pub const DEFAULT_DOWNLOAD_DIR: &str = "Downloads";

/// Suffix appended to the final file name while bytes are in flight.
pub const PART_SUFFIX: &str = ".part";

/// Marker separating the file path from player.fm tracking parameters.
pub const DEST_MARKER: &str = "?dest-";

/// Default HTTP connect timeout (30 seconds).
pub const CONNECT_TIMEOUT_SECS: u64 = 30;

/// Progress channel capacity; small so a stalled renderer backpressures the transfer.
pub const DEFAULT_PROGRESS_CAPACITY: usize = 1;
