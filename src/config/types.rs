use serde::Deserialize;

/// Origin of the case library that playlists and cases are scraped from
pub const DEFAULT_ORIGIN: &str = "https://radiopaedia.org";

/// Browser user agent sent with every request
///
/// The source site rejects requests carrying default HTTP client identifiers.
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

/// Main configuration structure
///
/// Every section is optional in the TOML file; missing sections and keys
/// take their defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub scraper: ScraperConfig,
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    pub output: OutputConfig,
    pub viewer: ViewerConfig,
}

/// Scraper behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ScraperConfig {
    /// Site origin used for bare playlist ids and relative links
    pub origin: String,

    /// Minimum time between requests to the same origin (milliseconds)
    #[serde(rename = "delay-ms")]
    pub delay_ms: u64,

    /// Total request timeout (seconds)
    #[serde(rename = "timeout-secs")]
    pub timeout_secs: u64,

    /// Connection timeout (seconds)
    #[serde(rename = "connect-timeout-secs")]
    pub connect_timeout_secs: u64,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            origin: DEFAULT_ORIGIN.to_string(),
            delay_ms: 1000,
            timeout_secs: 30,
            connect_timeout_secs: 10,
        }
    }
}

/// User agent configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UserAgentConfig {
    /// Full User-Agent header value
    pub value: String,
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            value: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Path to the playlist JSON file
    #[serde(rename = "playlist-path")]
    pub playlist_path: String,

    /// Path to the case records JSON file
    #[serde(rename = "cases-path")]
    pub cases_path: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            playlist_path: "data/playlist_data.json".to_string(),
            cases_path: "data/cases.json".to_string(),
        }
    }
}

/// Viewer server configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// Address to bind
    pub bind: String,

    /// Port to listen on
    pub port: u16,

    /// Directory of static files served next to the API
    #[serde(rename = "static-dir")]
    pub static_dir: String,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1".to_string(),
            port: 8000,
            static_dir: "web".to_string(),
        }
    }
}
