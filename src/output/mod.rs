//! Output module for crawl summaries and reports
//!
//! This module handles:
//! - Freezing live crawl state into a [`StatsSnapshot`]
//! - The plain-text end-of-crawl report
//! - Markdown summaries written to disk

pub mod markdown;
pub mod report;
pub mod stats;

pub use markdown::{format_markdown_report, write_markdown_report};
pub use report::{format_report, print_report};
pub use stats::{is_stopword, StatsSnapshot, STOPWORDS};

use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;
