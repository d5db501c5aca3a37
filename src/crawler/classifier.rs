//! Content significance classification
//!
//! Thin or boilerplate pages (navigation shells, redirects, error pages)
//! should not skew crawl statistics. A page counts only when its visible
//! text is long in both characters and words.

use crate::config::ContentConfig;
use crate::state::CrawlStats;
use url::Url;

/// Default character threshold (exclusive)
pub const MIN_CHARS: usize = 2000;

/// Default word threshold (exclusive)
pub const MIN_WORDS: usize = 200;

/// Measurements taken from a page's text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub significant: bool,
    /// Characters in the whitespace-collapsed text
    pub chars: usize,
    /// Whitespace-separated tokens
    pub words: usize,
}

/// Decides whether page text is substantive
#[derive(Debug, Clone, Copy)]
pub struct ContentClassifier {
    min_chars: usize,
    min_words: usize,
}

impl Default for ContentClassifier {
    fn default() -> Self {
        Self::new(MIN_CHARS, MIN_WORDS)
    }
}

impl ContentClassifier {
    pub fn new(min_chars: usize, min_words: usize) -> Self {
        Self {
            min_chars,
            min_words,
        }
    }

    pub fn from_config(config: &ContentConfig) -> Self {
        Self::new(config.min_chars, config.min_words)
    }

    /// Measures `text` without side effects
    ///
    /// The text is expected to have script and style content removed
    /// already. Significant iff the collapsed length is strictly greater
    /// than the character threshold and the word count strictly greater
    /// than the word threshold.
    pub fn classify(&self, text: &str) -> Classification {
        let collapsed = collapse_whitespace(text);
        let chars = collapsed.chars().count();
        let words = collapsed.split_whitespace().count();

        Classification {
            significant: chars > self.min_chars && words > self.min_words,
            chars,
            words,
        }
    }

    /// Classifies the page and records it in `stats` if significant
    pub fn process(&self, stats: &CrawlStats, url: &Url, text: &str) -> Classification {
        let classification = self.classify(text);

        if classification.significant {
            stats.record(url, text);
        } else {
            tracing::debug!(
                "Thin page {} ({} chars, {} words)",
                url,
                classification.chars,
                classification.words
            );
        }

        classification
    }
}

/// Replaces every run of whitespace with a single space
///
/// Leading and trailing runs are collapsed too, not trimmed, so `"  a  "`
/// becomes `" a "`.
pub fn collapse_whitespace(text: &str) -> String {
    let mut collapsed = String::with_capacity(text.len());
    let mut in_space = false;

    for c in text.chars() {
        if c.is_whitespace() {
            if !in_space {
                collapsed.push(' ');
                in_space = true;
            }
        } else {
            collapsed.push(c);
            in_space = false;
        }
    }

    collapsed
}
