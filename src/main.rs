//! Kumo-Harvest main entry point
//!
//! Command-line interface for the crawl-session artifact archiver.

use anyhow::Context;
use clap::Parser;
use kumo_harvest::artifacts::FileErrorLog;
use kumo_harvest::config::{load_settings, validate_target, CrawlTarget};
use kumo_harvest::engine::HttpEngine;
use kumo_harvest::session::{print_summary, SessionRunner};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Kumo-Harvest: crawl a site and archive its pages as local artifacts
///
/// Runs one crawl session against a seed URL and persists Markdown,
/// cleaned HTML, optional renders, and a bounded set of referenced images
/// under a per-site results directory. Individual page or image failures
/// are appended to the error log; only a malformed seed URL aborts.
#[derive(Parser, Debug)]
#[command(name = "kumo-harvest")]
#[command(version)]
#[command(about = "Crawl a site and archive its pages as local artifacts", long_about = None)]
struct Cli {
    /// The URL to start crawling from
    #[arg(value_name = "URL")]
    url: String,

    /// Follow discovered links up to --depth, scoped to the seed domain
    #[arg(long)]
    deepcrawl: bool,

    /// Maximum crawl depth (only meaningful with --deepcrawl)
    #[arg(long, default_value_t = 3)]
    depth: u32,

    /// Accept and store file downloads offered during the crawl
    #[arg(long)]
    accept_downloads: bool,

    /// Save a PDF render of each page
    #[arg(long)]
    save_pdf: bool,

    /// Save a screenshot of each page
    #[arg(long)]
    save_screenshot: bool,

    /// Path to an optional TOML settings file
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let settings = load_settings(cli.config.as_deref()).context("failed to load settings")?;

    let target = CrawlTarget {
        seed_url: cli.url,
        depth: cli.depth,
        deep: cli.deepcrawl,
        accept_downloads: cli.accept_downloads,
        save_pdf: cli.save_pdf,
        save_screenshot: cli.save_screenshot,
    };
    validate_target(&target).context("invalid crawl arguments")?;

    let engine = HttpEngine::new(&settings.user_agent).context("failed to build HTTP engine")?;
    let mut error_log = FileErrorLog::new(settings.results_root.join("error.txt"));

    let runner = SessionRunner::new(engine, settings, target);
    let summary = runner.run(&mut error_log).await?;

    print_summary(&summary);
    Ok(())
}

/// Sets up the tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("kumo_harvest=info,warn"),
            1 => EnvFilter::new("kumo_harvest=debug,info"),
            2 => EnvFilter::new("kumo_harvest=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}
