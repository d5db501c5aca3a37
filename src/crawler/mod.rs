//! Crawler module for page processing
//!
//! This module contains the per-page crawling logic, including:
//! - Per-host rate limiting with interruptible waits
//! - Content significance classification
//! - HTTP fetching and HTML parsing
//! - The [`CrawlSession`] pipeline tying them to admission and statistics

mod classifier;
mod fetcher;
mod limiter;
mod observer;
mod parser;
mod session;
mod shutdown;

pub use classifier::{collapse_whitespace, Classification, ContentClassifier, MIN_CHARS, MIN_WORDS};
pub use fetcher::{build_http_client, fetch_page, FetchResponse};
pub use limiter::{RateLimiter, WaitOutcome, POLITE_INTERVAL};
pub use observer::{CollectingObserver, ErrorObserver, TracingObserver};
pub use parser::{HtmlParser, PageParser, ParsedPage};
pub use session::{CrawlSession, PageReport, PageStatus};
pub use shutdown::ShutdownSignal;
