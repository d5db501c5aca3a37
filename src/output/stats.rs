//! End-of-crawl statistics snapshot
//!
//! This module freezes the live, concurrently updated crawl state into a
//! plain value that the report renderers can format.

use crate::state::{CrawlStats, LongestPage, SeenSet};
use std::collections::HashSet;
use std::sync::LazyLock;

/// English stopwords left out of the top-words ranking
pub const STOPWORDS: &[&str] = &[
    "a", "about", "above", "after", "again", "against", "all", "am", "an", "and",
    "any", "are", "aren't", "as", "at", "be", "because", "been", "before", "being",
    "below", "between", "both", "but", "by", "can't", "cannot", "could", "couldn't",
    "did", "didn't", "do", "does", "doesn't", "doing", "don't", "down", "during",
    "each", "few", "for", "from", "further", "had", "hadn't", "has", "hasn't", "have",
    "haven't", "having", "he", "he'd", "he'll", "he's", "her", "here", "here's",
    "hers", "herself", "him", "himself", "his", "how", "how's", "i", "i'd", "i'll",
    "i'm", "i've", "if", "in", "into", "is", "isn't", "it", "it's", "its", "itself",
    "let's", "me", "more", "most", "mustn't", "my", "myself", "no", "nor", "not",
    "of", "off", "on", "once", "only", "or", "other", "ought", "our", "ours",
    "ourselves", "out", "over", "own", "same", "shan't", "she", "she'd", "she'll",
    "she's", "should", "shouldn't", "so", "some", "such", "than", "that", "that's",
    "the", "their", "theirs", "them", "themselves", "then", "there", "there's",
    "these", "they", "they'd", "they'll", "they're", "they've", "this", "those",
    "through", "to", "too", "under", "until", "up", "very", "was", "wasn't", "we",
    "we'd", "we'll", "we're", "we've", "were", "weren't", "what", "what's", "when",
    "when's", "where", "where's", "which", "while", "who", "who's", "whom", "why",
    "why's", "with", "won't", "would", "wouldn't", "you", "you'd", "you'll", "you're",
    "you've", "your", "yours", "yourself", "yourselves",
];

static STOPWORD_SET: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| STOPWORDS.iter().copied().collect());

/// Returns true if `word` is excluded from the top-words ranking
pub fn is_stopword(word: &str) -> bool {
    STOPWORD_SET.contains(word)
}

/// Crawl statistics summary
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatsSnapshot {
    /// Distinct URLs evaluated, including the fetched pages themselves
    pub unique_pages: usize,

    /// Significant pages that fed the counters
    pub pages_recorded: u64,

    /// Page with the most tokens
    pub longest_page: Option<LongestPage>,

    /// Most frequent non-stopwords, highest count first
    pub top_words: Vec<(String, u64)>,

    /// Significant pages per host, sorted by host
    pub subdomains: Vec<(String, u64)>,
}

impl StatsSnapshot {
    /// Builds a snapshot from live crawl state
    ///
    /// # Arguments
    ///
    /// * `seen` - The crawl's seen set
    /// * `stats` - The crawl's statistics
    /// * `top_n` - How many words to keep in the ranking
    pub fn collect(seen: &SeenSet, stats: &CrawlStats, top_n: usize) -> Self {
        Self {
            unique_pages: seen.len(),
            pages_recorded: stats.pages_recorded(),
            longest_page: stats.longest_page(),
            top_words: top_words(stats.word_frequencies(), top_n),
            subdomains: stats.subdomain_counts(),
        }
    }
}

/// Ranks words by count, descending, breaking ties alphabetically
fn top_words(frequencies: Vec<(String, u64)>, top_n: usize) -> Vec<(String, u64)> {
    let mut ranked: Vec<(String, u64)> = frequencies
        .into_iter()
        .filter(|(word, _)| !is_stopword(word))
        .collect();

    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    ranked.truncate(top_n);
    ranked
}
