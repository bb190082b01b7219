//! Output module for persisting scrape results
//!
//! This module handles:
//! - Writing playlist and case records as JSON
//! - Reading them back for the viewer
//! - Summarizing a crawl for the console

mod json;
pub mod stats;
mod traits;

pub use json::{load_json, save_json, JsonSink};
pub use stats::{print_statistics, CrawlStatistics};
pub use traits::{OutputError, OutputResult, OutputSink};

use crate::record::CaseRecord;
use std::path::Path;

/// Loads case records for serving
///
/// A missing or unreadable file yields an empty list; the error is logged.
pub fn load_cases(path: &Path) -> Vec<CaseRecord> {
    if !path.exists() {
        tracing::debug!("No case file at {}", path.display());
        return Vec::new();
    }

    match load_json(path) {
        Ok(records) => records,
        Err(e) => {
            tracing::error!("Error loading cases: {}", e);
            Vec::new()
        }
    }
}
