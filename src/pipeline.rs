//! Sequential episode pipeline.
//!
//! For every link a downloader task is spawned and the renderer runs on the
//! calling task until that download closes its progress channel. The task is
//! awaited before the next link starts, so at most one download is ever in
//! flight.

use std::io::{self, Write};

use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::download::{DownloadOutcome, EpisodeDownloader, derive_file_name};
use crate::progress::{ProgressRenderer, SizeSignal};

/// Counts of what happened to each episode in a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Episodes transferred and renamed into place.
    pub downloaded: usize,
    /// Episodes already present at the advertised size.
    pub skipped: usize,
    /// Episodes abandoned because of a fetch, filesystem or rename error.
    pub failed: usize,
}

impl RunSummary {
    /// Total number of episodes processed.
    #[must_use]
    pub fn total(&self) -> usize {
        self.downloaded + self.skipped + self.failed
    }
}

/// Downloads every link in order, rendering progress for each.
///
/// Writes a `[i/N] <name> (<url>)` header before each episode. Per-episode
/// failures are logged and counted; they never stop the run. A link without
/// a file name is counted as failed and never requested.
///
/// # Errors
///
/// Returns an error only when writing to the renderer's output fails.
pub async fn run_episodes<W: Write>(
    links: &[String],
    downloader: &EpisodeDownloader,
    progress_capacity: usize,
    renderer: &mut ProgressRenderer<W>,
) -> io::Result<RunSummary> {
    let total = links.len();
    let mut summary = RunSummary::default();
    let (size_tx, mut size_rx) = mpsc::channel::<SizeSignal>(1);

    for (index, link) in links.iter().enumerate() {
        let file_name = derive_file_name(link).to_string();
        if file_name.is_empty() {
            warn!(url = %link, "no file name in episode link, skipping");
            summary.failed += 1;
            continue;
        }
        let (progress_tx, progress_rx) = mpsc::channel::<u64>(progress_capacity.max(1));

        let task = {
            let downloader = downloader.clone();
            let url = link.clone();
            let file_name = file_name.clone();
            let size_tx = size_tx.clone();
            tokio::spawn(async move {
                downloader
                    .download(&url, &file_name, size_tx, progress_tx)
                    .await
            })
        };

        writeln!(
            renderer.writer_mut(),
            "[{}/{}] {} ({})",
            index + 1,
            total,
            file_name,
            link
        )?;
        let observed = renderer.observe(&mut size_rx, progress_rx).await?;
        debug!(?observed, "progress stream closed");

        match task.await {
            Ok(Ok(DownloadOutcome::Downloaded { .. })) => summary.downloaded += 1,
            Ok(Ok(DownloadOutcome::AlreadyComplete { .. })) => summary.skipped += 1,
            Ok(Err(error)) => {
                warn!(url = %link, error = %error, "episode download failed");
                summary.failed += 1;
            }
            Err(join_error) => {
                warn!(url = %link, error = %join_error, "episode download task aborted");
                summary.failed += 1;
            }
        }
    }

    info!(
        downloaded = summary.downloaded,
        skipped = summary.skipped,
        failed = summary.failed,
        total = summary.total(),
        "all episodes processed"
    );
    Ok(summary)
}
