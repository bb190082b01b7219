//! Configuration module
//!
//! This module handles loading, parsing, and validating the optional TOML
//! configuration file. Every section has defaults, so running without a file
//! scrapes radiopaedia.org with a one second delay between requests.
//!
//! # Example
//!
//! ```no_run
//! use radcase::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("radcase.toml")).unwrap();
//! println!("Cases will be written to: {}", config.output.cases_path);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    Config, OutputConfig, ScraperConfig, UserAgentConfig, ViewerConfig, DEFAULT_ORIGIN,
    DEFAULT_USER_AGENT,
};

// Re-export parser functions
pub use parser::{load_config, load_config_or_default, parse_config};
pub use validation::validate;
