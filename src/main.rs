//! radcase main entry point
//!
//! This is the command-line interface for the playlist scraper and viewer.

use clap::Parser;
use radcase::config::{load_config_or_default, validate, Config};
use radcase::crawler::Crawler;
use radcase::output::{print_statistics, CrawlStatistics, JsonSink, OutputSink};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// radcase: a polite case library scraper
///
/// Scrapes a playlist of imaging cases, optionally follows every case page,
/// and writes the results as JSON for the bundled viewer.
#[derive(Parser, Debug)]
#[command(name = "radcase")]
#[command(version = "1.0.0")]
#[command(about = "Scrape a case playlist into JSON", long_about = None)]
struct Cli {
    /// Playlist URL or numeric playlist id
    #[arg(value_name = "PLAYLIST", default_value = "85715")]
    playlist: String,

    /// Also scrape every case detail page
    #[arg(long)]
    full: bool,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Seconds to wait between requests to the site
    #[arg(long, value_name = "SECONDS")]
    delay: Option<f64>,

    /// Directory for playlist_data.json and cases.json
    #[arg(short, long, value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Show the resolved settings without fetching anything
    #[arg(long, conflicts_with_all = ["serve", "full"])]
    dry_run: bool,

    /// Serve the scraped cases instead of scraping
    #[arg(long, conflicts_with_all = ["dry_run", "full"])]
    serve: bool,

    /// Port for --serve
    #[arg(long, requires = "serve")]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let config = match build_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            return Err(e);
        }
    };

    if cli.dry_run {
        handle_dry_run(&config, &cli)
    } else if cli.serve {
        handle_serve(&config).await
    } else {
        handle_scrape(&config, &cli).await
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("radcase=info,warn"),
            1 => EnvFilter::new("radcase=debug,info"),
            2 => EnvFilter::new("radcase=trace,debug"),
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

/// Loads the config file (or defaults) and applies command-line overrides
fn build_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = load_config_or_default(cli.config.as_deref())?;

    if let Some(path) = &cli.config {
        tracing::info!("Configuration loaded from {}", path.display());
    }

    if let Some(delay) = cli.delay {
        if !delay.is_finite() || delay < 0.0 {
            anyhow::bail!("--delay must be a non-negative number of seconds, got {}", delay);
        }
        config.scraper.delay_ms = (delay * 1000.0).round() as u64;
    }

    if let Some(dir) = &cli.output_dir {
        config.output.playlist_path = path_in(dir, &config.output.playlist_path);
        config.output.cases_path = path_in(dir, &config.output.cases_path);
    }

    if let Some(port) = cli.port {
        config.viewer.port = port;
    }

    validate(&config)?;
    Ok(config)
}

/// Moves the file name of `current` into `dir`
fn path_in(dir: &Path, current: &str) -> String {
    let file_name = Path::new(current)
        .file_name()
        .map(|name| name.to_os_string())
        .unwrap_or_else(|| current.into());
    dir.join(file_name).display().to_string()
}

/// Handles the --dry-run mode: shows what would be scraped
fn handle_dry_run(config: &Config, cli: &Cli) -> anyhow::Result<()> {
    let crawler = Crawler::new(config)?;
    let playlist_url = crawler.playlist_url(&cli.playlist)?;

    println!("=== radcase Dry Run ===\n");

    println!("Playlist: {}", playlist_url);
    println!("Full scrape: {}", if cli.full { "yes" } else { "no" });

    println!("\nScraper:");
    println!("  Origin: {}", config.scraper.origin);
    println!("  Delay between requests: {}ms", config.scraper.delay_ms);
    println!("  Request timeout: {}s", config.scraper.timeout_secs);
    println!("  Connect timeout: {}s", config.scraper.connect_timeout_secs);
    println!("  User agent: {}", config.user_agent.value);

    println!("\nOutput:");
    println!("  Playlist: {}", config.output.playlist_path);
    println!("  Cases: {}", config.output.cases_path);

    println!("\n✓ Configuration is valid");

    Ok(())
}

/// Handles the --serve mode: runs the viewer over the cases file
async fn handle_serve(config: &Config) -> anyhow::Result<()> {
    radcase::viewer::serve(&config.viewer, Path::new(&config.output.cases_path)).await?;
    Ok(())
}

/// Handles the main scrape operation
async fn handle_scrape(config: &Config, cli: &Cli) -> anyhow::Result<()> {
    let mut crawler = Crawler::new(config)?;
    let playlist_url = crawler.playlist_url(&cli.playlist)?;
    let sink = JsonSink::new(&config.output.playlist_path, &config.output.cases_path);

    let playlist = match crawler.scrape_playlist(&playlist_url).await {
        Ok(playlist) => playlist,
        Err(e) => {
            tracing::error!("Failed to scrape playlist: {}", e);
            return Err(e.into());
        }
    };

    sink.save_playlist(&playlist)?;

    if !cli.full {
        tracing::info!("Scraping completed successfully");
        return Ok(());
    }

    if playlist.cases.is_empty() {
        tracing::warn!("No cases found in playlist {}", playlist_url);
    }

    tracing::info!("Scraping individual cases...");
    let report = crawler.crawl_cases(&playlist).await;

    if let Err(e) = sink.save_cases(&report.records) {
        tracing::error!("Failed to save cases: {}", e);
        return Err(e.into());
    }

    if !cli.quiet {
        print_statistics(&CrawlStatistics::from_report(&report), &report);
    }

    tracing::info!("Scraping completed successfully");
    Ok(())
}
