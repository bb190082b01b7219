//! Output sink traits and errors

use crate::record::{CaseRecord, PlaylistResult};
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("IO error on {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("JSON error on {path}: {source}")]
    Json {
        path: String,
        source: serde_json::Error,
    },
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Trait for persistence sinks
///
/// A sink receives the complete result of a run and writes it out in one go;
/// there is no incremental or partial persistence.
pub trait OutputSink {
    /// Persists the playlist metadata and case list
    fn save_playlist(&self, playlist: &PlaylistResult) -> OutputResult<()>;

    /// Persists the extracted case records
    fn save_cases(&self, records: &[CaseRecord]) -> OutputResult<()>;
}
