//! Crawler module for playlist and case scraping
//!
//! This module contains the core scraping logic, including:
//! - HTTP fetching with a fixed browser user agent
//! - Field extraction through ordered strategy lists
//! - Request pacing per origin
//! - Overall crawl coordination

mod coordinator;
mod extract;
mod fetcher;
mod scheduler;

pub use coordinator::{CaseFailure, CrawlReport, Crawler};
pub use extract::{
    extract_case_links, extract_images, extract_or_default, first_match, parse_case,
    parse_playlist, FieldValue, Strategy,
};
pub use fetcher::{build_http_client, fetch_document, ClientConfig, FetchError};
pub use scheduler::{MinIntervalPolicy, OriginState, RatePolicy, Scheduler};

use crate::config::Config;
use crate::record::CaseRecord;
use crate::ScrapeError;

/// Runs a complete crawl of one playlist
///
/// This is the main entry point for a crawl. It will:
/// 1. Build the HTTP client and scheduler from the configuration
/// 2. Resolve the playlist URL or id
/// 3. Fetch the playlist and discover case links
/// 4. Fetch and extract each case, skipping failures
///
/// # Arguments
///
/// * `config` - The scraper configuration
/// * `playlist` - Playlist URL or bare playlist id
///
/// # Returns
///
/// * `Ok(Vec<CaseRecord>)` - Records of every case that could be scraped;
///   empty when the playlist could not be fetched or lists no cases
/// * `Err(ScrapeError)` - The crawler could not be set up
pub async fn crawl(config: &Config, playlist: &str) -> Result<Vec<CaseRecord>, ScrapeError> {
    let mut crawler = Crawler::new(config)?;
    let playlist_url = crawler.playlist_url(playlist)?;
    Ok(crawler.crawl(&playlist_url).await)
}
