use serde::{Deserialize, Serialize};

/// A case reference found on a playlist page
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CaseSummary {
    /// Case identifier (the path segment after `/cases/`)
    pub id: String,

    /// Absolute case URL
    pub url: String,

    /// Link text, or `Case <id>` when the link had none
    pub title: String,
}

/// Playlist metadata and its ordered, deduplicated case list
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaylistResult {
    /// Playlist identifier
    pub id: String,

    /// Playlist URL
    pub url: String,

    /// Playlist title
    pub title: String,

    /// Playlist description
    pub description: String,

    /// Cases in playlist order
    pub cases: Vec<CaseSummary>,
}

impl PlaylistResult {
    /// Returns the case URLs in playlist order
    pub fn case_urls(&self) -> impl Iterator<Item = &str> {
        self.cases.iter().map(|case| case.url.as_str())
    }
}
