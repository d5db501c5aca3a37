//! Error observers
//!
//! Page processing never fails outright. Recoverable problems (a failed
//! fetch, an unparsable link, a binary body) are handed to an
//! [`ErrorObserver`] and processing continues with an empty result.

use crate::CrawlError;
use std::sync::{Mutex, PoisonError};

/// Receives every non-fatal error raised while processing pages
pub trait ErrorObserver: Send + Sync {
    fn observe(&self, error: &CrawlError);
}

/// Logs observed errors as warnings
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl ErrorObserver for TracingObserver {
    fn observe(&self, error: &CrawlError) {
        tracing::warn!("{}", error);
    }
}

/// Keeps the rendered message of every observed error
#[derive(Debug, Default)]
pub struct CollectingObserver {
    errors: Mutex<Vec<String>>,
}

impl CollectingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Messages observed so far, oldest first
    pub fn errors(&self) -> Vec<String> {
        self.errors
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn len(&self) -> usize {
        self.errors
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ErrorObserver for CollectingObserver {
    fn observe(&self, error: &CrawlError) {
        self.errors
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(error.to_string());
    }
}
