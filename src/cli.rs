//! CLI argument definitions using clap derive macros.

use std::path::PathBuf;

use clap::Parser;

use podgrab_core::DownloadConfig;
use podgrab_core::download::constants::DEFAULT_DOWNLOAD_DIR;

/// Download every episode of a player.fm podcast.
///
/// Lists the podcast's episodes from its player.fm page and saves each audio
/// file into the download directory, skipping files that are already complete.
#[derive(Parser, Debug)]
#[command(name = "podgrab")]
#[command(author, version, about)]
pub struct Args {
    /// Base player.fm URL of the podcast (prompted for when omitted)
    pub base_url: Option<String>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-error log output and the loading spinner
    #[arg(short, long)]
    pub quiet: bool,

    /// Disable colored log output
    #[arg(long)]
    pub no_color: bool,

    /// Directory episodes are saved into
    #[arg(short = 'd', long, default_value = DEFAULT_DOWNLOAD_DIR)]
    pub download_dir: PathBuf,
}

impl Args {
    /// Library settings for this invocation.
    pub fn download_config(&self) -> DownloadConfig {
        DownloadConfig::with_download_dir(self.download_dir.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_default_args_parses_successfully() {
        let args = Args::try_parse_from(["podgrab"]).unwrap();
        assert_eq!(args.base_url, None);
        assert_eq!(args.verbose, 0);
        assert!(!args.quiet);
        assert_eq!(args.download_dir, PathBuf::from("Downloads"));
        assert_eq!(args.download_config(), DownloadConfig::default());
    }

    #[test]
    fn test_cli_positional_base_url() {
        let args = Args::try_parse_from(["podgrab", "https://player.fm/series/show"]).unwrap();
        assert_eq!(args.base_url.as_deref(), Some("https://player.fm/series/show"));
    }

    #[test]
    fn test_cli_verbose_flag_increments_count() {
        let args = Args::try_parse_from(["podgrab", "-vv"]).unwrap();
        assert_eq!(args.verbose, 2);
    }

    #[test]
    fn test_cli_download_dir_override() {
        let args = Args::try_parse_from(["podgrab", "-d", "/tmp/pods"]).unwrap();
        assert_eq!(
            args.download_config().download_dir,
            PathBuf::from("/tmp/pods")
        );
    }

    #[test]
    fn test_cli_invalid_flag_returns_error() {
        let result = Args::try_parse_from(["podgrab", "--invalid-flag"]);
        let err = result.unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::UnknownArgument);
    }
}
