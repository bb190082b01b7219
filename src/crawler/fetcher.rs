//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the scraper, including:
//! - Building the HTTP client from an immutable client configuration
//! - GET requests for playlist and case pages
//! - Error classification (timeout, network, non-2xx status)
//!
//! There is no retry logic: a failed fetch is reported to the caller, which
//! decides whether to skip the page or abort.

use crate::config::Config;
use reqwest::Client;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur while fetching a document
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Request timeout for {url}")]
    Timeout { url: String },

    #[error("Network error for {url}: {source}")]
    Network { url: String, source: reqwest::Error },

    #[error("HTTP {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("Failed to read response body from {url}: {source}")]
    Body { url: String, source: reqwest::Error },
}

impl FetchError {
    /// Returns the URL the failed request was sent to
    pub fn url(&self) -> &str {
        match self {
            Self::Timeout { url }
            | Self::Network { url, .. }
            | Self::Status { url, .. }
            | Self::Body { url, .. } => url,
        }
    }
}

/// Immutable settings the HTTP client is built from
///
/// Built once per run and handed to `build_http_client`; nothing mutates
/// headers or timeouts after that.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// User-Agent header sent with every request
    pub user_agent: String,

    /// Total time allowed for one request
    pub timeout: Duration,

    /// Time allowed to establish a connection
    pub connect_timeout: Duration,
}

impl ClientConfig {
    /// Derives the client settings from the loaded configuration
    pub fn from_config(config: &Config) -> Self {
        Self {
            user_agent: config.user_agent.value.clone(),
            timeout: Duration::from_secs(config.scraper.timeout_secs),
            connect_timeout: Duration::from_secs(config.scraper.connect_timeout_secs),
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `config` - The client configuration
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
///
/// # Example
///
/// ```no_run
/// use radcase::crawler::{build_http_client, ClientConfig};
///
/// let client = build_http_client(&ClientConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &ClientConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.as_str())
        .timeout(config.timeout)
        .connect_timeout(config.connect_timeout)
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a URL and returns the response body as text
///
/// # Error Classification
///
/// | Condition | Error |
/// |-----------|-------|
/// | Request or connect timeout | `FetchError::Timeout` |
/// | Connection refused, DNS, TLS | `FetchError::Network` |
/// | Non-2xx status | `FetchError::Status` |
/// | Body could not be read | `FetchError::Body` |
///
/// # Arguments
///
/// * `client` - The HTTP client to use
/// * `url` - The URL to fetch
pub async fn fetch_document(client: &Client, url: &str) -> Result<String, FetchError> {
    let response = client.get(url).send().await.map_err(|e| {
        if e.is_timeout() {
            FetchError::Timeout {
                url: url.to_string(),
            }
        } else {
            FetchError::Network {
                url: url.to_string(),
                source: e,
            }
        }
    })?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    response.text().await.map_err(|e| {
        if e.is_timeout() {
            FetchError::Timeout {
                url: url.to_string(),
            }
        } else {
            FetchError::Body {
                url: url.to_string(),
                source: e,
            }
        }
    })
}
