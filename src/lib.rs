//! Crawl-Sieve: the decision core of a focused, polite web crawler
//!
//! Given a fetched page, this crate decides whether its text is substantive
//! enough to count toward crawl statistics, which outbound links should be
//! queued, and how long to wait before touching the same host again.

pub mod admission;
pub mod config;
pub mod crawler;
pub mod output;
pub mod state;
pub mod url;

use thiserror::Error;

/// Main error type for Crawl-Sieve operations
///
/// None of these are fatal to a crawl: the page processor reports them to an
/// [`crawler::ErrorObserver`] and carries on with an empty result.
#[derive(Debug, Error)]
pub enum CrawlError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Fetch failed for {url} (status {status}): {}", .reason.as_deref().unwrap_or("no content"))]
    Fetch {
        url: String,
        status: u16,
        reason: Option<String>,
    },

    #[error("Malformed URL {url}: {source}")]
    MalformedUrl { url: String, source: UrlError },

    #[error("Failed to parse page {url}: {source}")]
    Parse { url: String, source: ParseError },
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

    #[error("Invalid pattern: {0}")]
    InvalidPattern(String),
}

/// URL-specific errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Missing host in URL")]
    MissingHost,
}

/// Errors raised while deriving text and links from a fetched body
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("body looks like binary content")]
    Binary,

    #[error("body is empty")]
    Empty,
}

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use admission::{AdmissionFilter, AdmissionPolicy, Decision, Rejection};
pub use config::Config;
pub use crawler::{CrawlSession, FetchResponse, HtmlParser, PageParser, PageReport, PageStatus};
pub use output::StatsSnapshot;
pub use url::{extract_host, strip_fragment};
