//! Progress protocol between the downloader task and the terminal renderer.
//!
//! A download publishes exactly one [`SizeSignal`] on the shared `size`
//! channel, then a stream of byte counts on its own `progress` channel. The
//! renderer owns a single terminal line and redraws it in place with a
//! carriage return for every sample.

use std::io::{self, IsTerminal, Write};

use tokio::sync::mpsc;
use tracing::trace;

/// Number of cells in the progress bar; each filled cell is 5%.
pub const BAR_CELLS: usize = 20;

/// Width used when neither the terminal nor `COLUMNS` reports one.
const DEFAULT_TERMINAL_WIDTH: usize = 80;

/// Narrowest width accepted from `COLUMNS`.
const MIN_TERMINAL_WIDTH: usize = 20;

/// The single size message a download sends before any progress sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeSignal {
    /// Expected body length; 0 when `Content-Length` was missing or unparsable.
    Total(u64),
    /// The episode request failed; no progress samples will follow.
    Unavailable,
}

/// What the renderer saw for one download.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObservedTransfer {
    /// Size signal received for the download.
    pub size: SizeSignal,
    /// Last progress sample, if any arrived.
    pub last_written: Option<u64>,
    /// Number of progress samples received.
    pub samples: usize,
}

/// Returns the width of the terminal stdout is attached to, falling back to
/// COLUMNS, then 80.
#[must_use]
pub fn terminal_width() -> usize {
    let tty_columns = if io::stdout().is_terminal() {
        crossterm::terminal::size().ok().map(|(columns, _)| columns)
    } else {
        None
    };
    resolve_terminal_width(tty_columns, std::env::var("COLUMNS").ok().as_deref())
}

fn resolve_terminal_width(tty_columns: Option<u16>, columns_env: Option<&str>) -> usize {
    if let Some(columns) = tty_columns.filter(|columns| *columns > 0) {
        return usize::from(columns);
    }
    columns_env
        .and_then(|value| value.trim().parse::<usize>().ok())
        .filter(|width| *width >= MIN_TERMINAL_WIDTH)
        .unwrap_or(DEFAULT_TERMINAL_WIDTH)
}

/// Formats one progress line without the carriage return or padding.
///
/// With a known total: `[=====               ] 25% 1/4 KB`. With a total of
/// 0 the bar is indeterminate and only the written kilobytes are shown.
#[must_use]
pub fn format_progress_line(total: u64, written: u64) -> String {
    if total == 0 {
        return format!("[{}] {} KB", "?".repeat(BAR_CELLS), written / 1024);
    }
    let percent = u128::from(written) * 100 / u128::from(total);
    let filled = usize::try_from(percent / 5).unwrap_or(BAR_CELLS).min(BAR_CELLS);
    format!(
        "[{}{}] {percent}% {}/{} KB",
        "=".repeat(filled),
        " ".repeat(BAR_CELLS - filled),
        written / 1024,
        total / 1024
    )
}

/// Terminal renderer for one active download at a time.
#[derive(Debug)]
pub struct ProgressRenderer<W> {
    out: W,
    width: usize,
    drawn: bool,
}

impl ProgressRenderer<io::Stdout> {
    /// Renderer drawing on stdout, sized to the current terminal.
    #[must_use]
    pub fn stdout() -> Self {
        Self::new(io::stdout(), terminal_width())
    }
}

impl<W: Write> ProgressRenderer<W> {
    /// Creates a renderer writing to `out` for a terminal `width` columns wide.
    pub fn new(out: W, width: usize) -> Self {
        Self {
            out,
            width,
            drawn: false,
        }
    }

    /// Receives one size signal, then renders every progress sample until the
    /// downloader closes the progress channel.
    ///
    /// If the downloader goes away without sending a size (it panicked), the
    /// closed progress channel ends the wait instead of blocking forever.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to the output fails.
    pub async fn observe(
        &mut self,
        size_rx: &mut mpsc::Receiver<SizeSignal>,
        mut progress_rx: mpsc::Receiver<u64>,
    ) -> io::Result<ObservedTransfer> {
        // `biased` keeps size first: it is buffered before any sample is sent.
        let size = tokio::select! {
            biased;
            size = size_rx.recv() => size.unwrap_or(SizeSignal::Unavailable),
            None = progress_rx.recv() => SizeSignal::Unavailable,
        };
        trace!(?size, "size received");

        let mut observed = ObservedTransfer {
            size,
            last_written: None,
            samples: 0,
        };
        while let Some(written) = progress_rx.recv().await {
            observed.samples += 1;
            observed.last_written = Some(written);
            if let SizeSignal::Total(total) = size {
                self.draw(total, written)?;
            }
        }
        self.finish()?;
        Ok(observed)
    }

    /// Redraws the progress line in place.
    ///
    /// The frame is kept one column short of the width: a frame that reaches
    /// the last column wraps, and the next `\r` would only rewind the new row.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to the output fails.
    pub fn draw(&mut self, total: u64, written: u64) -> io::Result<()> {
        let columns = self.width.saturating_sub(1).max(1);
        let mut line = format_progress_line(total, written);
        // ASCII only, so any byte index is a char boundary.
        line.truncate(columns);
        write!(self.out, "\r{line:<columns$}")?;
        self.out.flush()?;
        self.drawn = true;
        Ok(())
    }

    /// Ends the current line so it stays in scrollback.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to the output fails.
    pub fn finish(&mut self) -> io::Result<()> {
        if self.drawn {
            writeln!(self.out)?;
            self.out.flush()?;
            self.drawn = false;
        }
        Ok(())
    }

    /// Writer the progress line is drawn on, for the caller's own lines.
    pub fn writer_mut(&mut self) -> &mut W {
        &mut self.out
    }

    /// Returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.out
    }
}
