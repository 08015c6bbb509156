//! Completed-file detection used to skip episodes already on disk.

use std::path::Path;

use tracing::trace;

/// Returns true iff a file exists at `path` and is exactly `expected_size` bytes.
///
/// Missing files, stat failures and size mismatches all count as incomplete.
/// Size equality is the only criterion; contents are not hashed.
pub async fn is_complete(path: &Path, expected_size: u64) -> bool {
    match tokio::fs::metadata(path).await {
        Ok(meta) if meta.is_file() => {
            trace!(path = %path.display(), len = meta.len(), expected_size, "checked existing file");
            meta.len() == expected_size
        }
        Ok(_) => false,
        Err(error) => {
            trace!(path = %path.display(), error = %error, "no existing file");
            false
        }
    }
}
