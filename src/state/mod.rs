//! Crawl-wide mutable state
//!
//! Everything a crawl accumulates lives here, owned by a
//! [`CrawlSession`](crate::crawler::CrawlSession) for the length of one run.
//!
//! # Components
//!
//! - `SeenSet`: every URL the admission filter has evaluated
//! - `HostClock`: per-host politeness timestamps and request counts
//! - `CrawlStats`: longest page, word frequencies, and subdomain counts

mod crawl_stats;
mod host_clock;
mod seen;

// Re-export main types
pub use crawl_stats::{tokenize, CrawlStats, LongestPage};
pub use host_clock::HostClock;
pub use seen::SeenSet;
