use std::io::{self, IsTerminal};

use anyhow::Result;
use clap::Parser;
use podgrab_core::{
    EpisodeDownloader, HttpClient, IndexError, ProgressRenderer, discover_episode_links,
    run_episodes,
};
use tracing::{debug, info};

use crate::ProcessExit;
use crate::app::{prompt, terminal};
use crate::cli::Args;

pub(crate) async fn run_podgrab() -> Result<ProcessExit> {
    let args = Args::parse();

    let no_color = args.no_color || terminal::no_color_env_requested();
    terminal::init_tracing(
        terminal::resolve_default_log_level(args.verbose, args.quiet),
        no_color,
    );
    debug!(?args, "CLI arguments parsed");

    let config = args.download_config();

    let base_url = match args.base_url.clone() {
        Some(url) => Some(url),
        None => prompt::read_base_url(&mut io::stdin().lock(), &mut io::stdout())?,
    };
    let Some(base_url) = base_url else {
        eprintln!("Error while reading the base URL: no URL entered");
        return Ok(ProcessExit::Failure);
    };
    info!(base_url = %base_url, "podgrab starting");

    let client = HttpClient::with_connect_timeout(config.connect_timeout);

    let spinner = terminal::start_spinner(
        terminal::should_use_spinner(
            io::stderr().is_terminal(),
            args.quiet,
            terminal::is_dumb_terminal(),
        ),
        "Loading episode list...",
    );
    let discovered = discover_episode_links(&client, &base_url).await;
    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }

    let links = match discovered {
        Ok(links) => links,
        Err(error) => {
            eprintln!("{}", index_failure_message(&error));
            return Ok(ProcessExit::Failure);
        }
    };

    let downloader = EpisodeDownloader::from_config(client, &config);
    let mut renderer = ProgressRenderer::stdout();
    let summary = run_episodes(&links, &downloader, config.progress_capacity(), &mut renderer).await?;
    debug!(?summary, "run finished");

    println!("DONE");
    Ok(ProcessExit::Success)
}

/// User-facing message for a fatal index failure.
fn index_failure_message(error: &IndexError) -> String {
    if error.is_parse_failure() {
        format!("Error while parsing the HTML: {error}")
    } else {
        format!("Error while loading the page: {error}")
    }
}
