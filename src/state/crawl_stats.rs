use crate::url::extract_host;
use dashmap::DashMap;
use regex::Regex;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{LazyLock, Mutex, PoisonError};
use url::Url;

/// Runs of word characters; the tokenizer keeps those longer than one char.
static WORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\w+").expect("WORD regex"));

/// The longest significant page recorded so far
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LongestPage {
    pub url: String,
    pub word_count: usize,
}

/// Crawl-wide statistics fed by significant pages
///
/// Safe to share between worker threads. Word and subdomain counters live
/// in sharded maps so concurrent pages only contend on the same shard, and
/// every increment happens under that shard's lock, so none are lost.
#[derive(Debug, Default)]
pub struct CrawlStats {
    longest_page: Mutex<Option<LongestPage>>,
    word_frequency: DashMap<String, u64>,
    subdomain_counts: DashMap<String, u64>,
    pages_recorded: AtomicU64,
}

impl CrawlStats {
    /// Creates empty statistics
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a significant page
    ///
    /// Tokenizes `text`, adds every token to the word-frequency table,
    /// replaces the longest page only when this page has strictly more
    /// tokens (ties keep the page recorded first), and bumps the page's host
    /// in the subdomain table. Stopwords are kept; they are filtered when the
    /// report is built.
    ///
    /// Returns the page's token count.
    pub fn record(&self, url: &Url, text: &str) -> usize {
        let words = tokenize(text);
        let word_count = words.len();

        let mut local: HashMap<String, u64> = HashMap::new();
        for word in words {
            *local.entry(word).or_insert(0) += 1;
        }
        for (word, count) in local {
            *self.word_frequency.entry(word).or_insert(0) += count;
        }

        {
            let mut longest = self
                .longest_page
                .lock()
                .unwrap_or_else(PoisonError::into_inner);
            let current = longest.as_ref().map_or(0, |page| page.word_count);
            if word_count > current {
                *longest = Some(LongestPage {
                    url: url.to_string(),
                    word_count,
                });
            }
        }

        if let Some(host) = extract_host(url) {
            *self.subdomain_counts.entry(host).or_insert(0) += 1;
        }

        self.pages_recorded.fetch_add(1, Ordering::Relaxed);

        tracing::trace!("Recorded {} words from {}", word_count, url);
        word_count
    }

    /// The longest page recorded so far, if any
    pub fn longest_page(&self) -> Option<LongestPage> {
        self.longest_page
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// How many times `word` has been seen across significant pages
    pub fn word_count(&self, word: &str) -> u64 {
        self.word_frequency.get(word).map_or(0, |count| *count)
    }

    /// How many significant pages were recorded for `host`
    pub fn subdomain_count(&self, host: &str) -> u64 {
        self.subdomain_counts.get(host).map_or(0, |count| *count)
    }

    /// Number of significant pages recorded
    pub fn pages_recorded(&self) -> u64 {
        self.pages_recorded.load(Ordering::Relaxed)
    }

    /// Copies the full word-frequency table
    pub fn word_frequencies(&self) -> Vec<(String, u64)> {
        self.word_frequency
            .iter()
            .map(|entry| (entry.key().clone(), *entry.value()))
            .collect()
    }

    /// Copies the subdomain table, sorted by host name
    pub fn subdomain_counts(&self) -> Vec<(String, u64)> {
        let mut counts: Vec<(String, u64)> = self
            .subdomain_counts
            .iter()
            .map(|entry| (entry.key().clone(), *entry.value()))
            .collect();
        counts.sort_by(|a, b| a.0.cmp(&b.0));
        counts
    }
}

/// Splits text into lowercase word tokens, discarding single characters
///
/// # Examples
///
/// ```
/// use crawl_sieve::state::tokenize;
///
/// assert_eq!(tokenize("A Crawler's 2 NEW pages"), vec!["crawler", "new", "pages"]);
/// ```
pub fn tokenize(text: &str) -> Vec<String> {
    WORD.find_iter(text)
        .map(|m| m.as_str())
        .filter(|word| word.chars().count() > 1)
        .map(str::to_lowercase)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    #[test]
    fn test_tokenize() {
        assert_eq!(
            tokenize("Hello, World! a I x-ray 42 7"),
            vec!["hello", "world", "ray", "42"]
        );
        assert!(tokenize("  \n\t ").is_empty());
    }

    #[test]
    fn test_tokenize_unicode_words() {
        assert_eq!(tokenize("Café Über"), vec!["café", "über"]);
    }

    #[test]
    fn test_record_updates_tables() {
        let stats = CrawlStats::new();
        let page = url("http://www.ics.uci.edu/about");

        let count = stats.record(&page, "Research research TEACHING a");

        assert_eq!(count, 3);
        assert_eq!(stats.word_count("research"), 2);
        assert_eq!(stats.word_count("teaching"), 1);
        assert_eq!(stats.word_count("a"), 0);
        assert_eq!(stats.subdomain_count("www.ics.uci.edu"), 1);
        assert_eq!(stats.pages_recorded(), 1);
        assert_eq!(
            stats.longest_page(),
            Some(LongestPage {
                url: "http://www.ics.uci.edu/about".to_string(),
                word_count: 3,
            })
        );
    }

    #[test]
    fn test_stopwords_are_kept_at_record_time() {
        let stats = CrawlStats::new();
        stats.record(&url("http://cs.uci.edu/"), "the the the of");
        assert_eq!(stats.word_count("the"), 3);
        assert_eq!(stats.word_count("of"), 1);
    }

    #[test]
    fn test_longest_page_requires_strictly_more_words() {
        let stats = CrawlStats::new();
        let text = "word ".repeat(1000);

        stats.record(&url("http://www.ics.uci.edu/a"), &text);
        stats.record(&url("http://www.ics.uci.edu/b"), &text);

        let longest = stats.longest_page().unwrap();
        assert_eq!(longest.url, "http://www.ics.uci.edu/a");
        assert_eq!(longest.word_count, 1000);

        stats.record(&url("http://www.ics.uci.edu/c"), &"word ".repeat(1001));
        assert_eq!(stats.longest_page().unwrap().url, "http://www.ics.uci.edu/c");

        stats.record(&url("http://www.ics.uci.edu/d"), "short page");
        assert_eq!(stats.longest_page().unwrap().url, "http://www.ics.uci.edu/c");
    }

    #[test]
    fn test_empty_page_never_becomes_longest() {
        let stats = CrawlStats::new();
        stats.record(&url("http://www.ics.uci.edu/empty"), "");
        assert!(stats.longest_page().is_none());
        assert_eq!(stats.pages_recorded(), 1);
    }

    #[test]
    fn test_subdomain_counts_sorted() {
        let stats = CrawlStats::new();
        stats.record(&url("http://www.stat.uci.edu/"), "stats");
        stats.record(&url("http://vision.ics.uci.edu/"), "vision");
        stats.record(&url("http://vision.ics.uci.edu/people"), "people");

        assert_eq!(
            stats.subdomain_counts(),
            vec![
                ("vision.ics.uci.edu".to_string(), 2),
                ("www.stat.uci.edu".to_string(), 1),
            ]
        );
    }
}
