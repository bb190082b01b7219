//! Run statistics
//!
//! This module summarizes a crawl report for the end-of-run console output.

use crate::crawler::CrawlReport;
use std::time::Duration;

/// Crawl statistics summary
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CrawlStatistics {
    /// Number of case links discovered on the playlist
    pub discovered: usize,

    /// Number of cases scraped successfully
    pub scraped: usize,

    /// Number of cases skipped after a failure
    pub failed: usize,

    /// Scraped cases with no images
    pub without_images: usize,

    /// Scraped cases with no diagnosis
    pub without_diagnosis: usize,

    /// Wall time of the crawl
    pub elapsed: Duration,
}

impl CrawlStatistics {
    /// Collects statistics from a crawl report
    pub fn from_report(report: &CrawlReport) -> Self {
        Self {
            discovered: report.discovered,
            scraped: report.records.len(),
            failed: report.failures.len(),
            without_images: report
                .records
                .iter()
                .filter(|record| record.images.is_empty())
                .count(),
            without_diagnosis: report
                .records
                .iter()
                .filter(|record| record.diagnosis.is_empty())
                .count(),
            elapsed: report.elapsed,
        }
    }

    /// Returns the success rate as a percentage of discovered cases
    pub fn success_rate(&self) -> f64 {
        if self.discovered == 0 {
            return 0.0;
        }
        (self.scraped as f64 / self.discovered as f64) * 100.0
    }
}

/// Prints statistics and failures to stdout in a formatted manner
pub fn print_statistics(stats: &CrawlStatistics, report: &CrawlReport) {
    println!("=== Crawl Statistics ===\n");

    println!("Overview:");
    println!("  Cases discovered: {}", stats.discovered);
    println!("  Cases scraped: {}", stats.scraped);
    println!("  Cases skipped: {}", stats.failed);
    println!("  Without images: {}", stats.without_images);
    println!("  Without diagnosis: {}", stats.without_diagnosis);
    println!("  Elapsed: {:.1}s", stats.elapsed.as_secs_f64());
    println!();

    if !report.failures.is_empty() {
        println!("Skipped Cases ({}):", report.failures.len());
        for failure in &report.failures {
            println!("  - {}: {}", failure.url, failure.reason);
        }
        println!();
    }

    println!(
        "Success Rate: {:.1}% ({} / {} cases scraped)",
        stats.success_rate(),
        stats.scraped,
        stats.discovered
    );
}
