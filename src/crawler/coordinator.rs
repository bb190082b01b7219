//! Crawler coordinator - main crawl orchestration logic
//!
//! The crawl is a single linear pass:
//! 1. Fetch the playlist page and discover its case links
//! 2. Fetch and extract each case in playlist order, paced by the scheduler
//! 3. Hand the accumulated records back to the caller for persistence
//!
//! A failed playlist fetch ends the run with no records. A failed case fetch
//! only skips that case.

use crate::config::Config;
use crate::crawler::extract::{parse_case, parse_playlist};
use crate::crawler::scheduler::Scheduler;
use crate::crawler::{build_http_client, fetch_document, ClientConfig, FetchError};
use crate::record::{CaseRecord, PlaylistResult};
use crate::url::resolve_playlist_url;
use crate::ScrapeError;
use reqwest::Client;
use std::time::{Duration, Instant};
use url::Url;

/// A case that could not be scraped
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaseFailure {
    /// The case URL
    pub url: String,

    /// Human-readable reason
    pub reason: String,
}

/// Outcome of crawling the cases of one playlist
#[derive(Debug, Clone, Default)]
pub struct CrawlReport {
    /// Number of case links discovered on the playlist
    pub discovered: usize,

    /// Successfully extracted records, in playlist order
    pub records: Vec<CaseRecord>,

    /// Cases that were skipped
    pub failures: Vec<CaseFailure>,

    /// Wall time of the crawl
    pub elapsed: Duration,
}

/// Main crawler structure
pub struct Crawler {
    client: Client,
    origin: Url,
    scheduler: Scheduler,
}

impl Crawler {
    /// Creates a crawler from the configuration
    ///
    /// # Returns
    ///
    /// * `Ok(Crawler)` - Client built and origin parsed
    /// * `Err(ScrapeError)` - The HTTP client could not be built or the origin is invalid
    pub fn new(config: &Config) -> Result<Self, ScrapeError> {
        let client = build_http_client(&ClientConfig::from_config(config))?;
        let origin = Url::parse(&config.scraper.origin)?;
        let scheduler = Scheduler::with_interval(Duration::from_millis(config.scraper.delay_ms));

        Ok(Self::with_parts(client, origin, scheduler))
    }

    /// Creates a crawler from an existing client, origin and scheduler
    pub fn with_parts(client: Client, origin: Url, scheduler: Scheduler) -> Self {
        Self {
            client,
            origin,
            scheduler,
        }
    }

    /// The origin relative links are resolved against
    pub fn origin(&self) -> &Url {
        &self.origin
    }

    /// Resolves a playlist URL or bare id against this crawler's origin
    pub fn playlist_url(&self, input: &str) -> Result<Url, ScrapeError> {
        Ok(resolve_playlist_url(input, &self.origin)?)
    }

    /// Fetches one page once the scheduler allows it
    ///
    /// The pause before the next request counts from when this one finished.
    async fn fetch(&mut self, url: &Url) -> Result<String, FetchError> {
        self.scheduler.wait_turn(url).await;
        let result = fetch_document(&self.client, url.as_str()).await;
        self.scheduler.finish(url);
        result
    }

    /// Fetches the playlist page and extracts its metadata and case list
    pub async fn scrape_playlist(&mut self, playlist_url: &Url) -> Result<PlaylistResult, ScrapeError> {
        tracing::info!("Scraping playlist: {}", playlist_url);

        let html = self.fetch(playlist_url).await?;
        let playlist = parse_playlist(&html, playlist_url, &self.origin);

        tracing::info!(
            "Found {} cases in playlist '{}'",
            playlist.cases.len(),
            playlist.title
        );

        Ok(playlist)
    }

    /// Fetches one case page and extracts its record
    pub async fn scrape_case(&mut self, case_url: &str) -> Result<CaseRecord, ScrapeError> {
        let url = Url::parse(case_url)?;
        let html = self.fetch(&url).await?;
        let record = parse_case(&html, case_url, &self.origin);

        if record.is_blank() {
            tracing::warn!("No case fields found on {}", case_url);
        }

        Ok(record)
    }

    /// Scrapes every case of an already fetched playlist
    ///
    /// Cases are fetched one at a time in playlist order. A case that fails
    /// is logged, recorded in the report, and skipped.
    pub async fn crawl_cases(&mut self, playlist: &PlaylistResult) -> CrawlReport {
        let start_time = Instant::now();
        let total = playlist.cases.len();
        let mut report = CrawlReport {
            discovered: total,
            ..Default::default()
        };

        for (index, case_url) in playlist.case_urls().enumerate() {
            tracing::info!("[{}/{}] Scraping case: {}", index + 1, total, case_url);

            match self.scrape_case(case_url).await {
                Ok(record) => report.records.push(record),
                Err(e) => {
                    tracing::warn!("Skipping case {}: {}", case_url, e);
                    report.failures.push(CaseFailure {
                        url: case_url.to_string(),
                        reason: e.to_string(),
                    });
                }
            }
        }

        report.elapsed = start_time.elapsed();
        report
    }

    /// Fetches the playlist and scrapes all of its cases
    ///
    /// # Returns
    ///
    /// * `Ok(CrawlReport)` - The crawl ran; it may contain fewer records than
    ///   discovered cases, or none when the playlist lists no cases
    /// * `Err(ScrapeError)` - The playlist itself could not be fetched
    pub async fn crawl_with_report(&mut self, playlist_url: &Url) -> Result<CrawlReport, ScrapeError> {
        let playlist = self.scrape_playlist(playlist_url).await?;

        if playlist.cases.is_empty() {
            tracing::warn!("No cases found in playlist {}", playlist_url);
            return Ok(CrawlReport::default());
        }

        Ok(self.crawl_cases(&playlist).await)
    }

    /// Fetches the playlist and returns the records of all cases that could be scraped
    ///
    /// A playlist fetch failure is logged and yields an empty result.
    pub async fn crawl(&mut self, playlist_url: &Url) -> Vec<CaseRecord> {
        match self.crawl_with_report(playlist_url).await {
            Ok(report) => report.records,
            Err(e) => {
                tracing::error!("Error fetching playlist {}: {}", playlist_url, e);
                Vec::new()
            }
        }
    }
}
