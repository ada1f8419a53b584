//! MEP-Harvest: a bounded, rate-limited, retrying email harvester
//!
//! This crate collects the publicly listed contact emails of Members of the
//! European Parliament. A discovery step produces one target per member
//! profile; a batch fetcher visits each target under a concurrency cap, a
//! sliding-window rate limit, and a retry policy; successful extractions are
//! normalized and written one per line to a flat output file.

pub mod batch;
pub mod config;
pub mod fetch;
pub mod output;

use thiserror::Error;

/// Main error type for MEP-Harvest operations
#[derive(Debug, Error)]
pub enum HarvestError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Discovery failed for {url}: {message}")]
    Discovery { url: String, message: String },

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("Invalid CSS selector '{selector}': {message}")]
    Selector { selector: String, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),

    #[error("Invalid CSS selector in config: {0}")]
    InvalidSelector(String),
}

/// Result type alias for MEP-Harvest operations
pub type Result<T> = std::result::Result<T, HarvestError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use batch::{BatchFetcher, BatchReport, Outcome, RateLimiter, RetryPolicy, WorkerPool};
pub use config::Config;
pub use fetch::{FetchError, IdentityHint, PageFetcher, Target};
