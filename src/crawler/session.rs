//! Per-crawl state and the page processing pipeline
//!
//! A [`CrawlSession`] owns everything that lives for exactly one crawl: the
//! seen set, the statistics, the per-host clocks and the shutdown signal.
//! It is `Send + Sync` and meant to be shared (by reference or `Arc`)
//! between however many workers the caller runs.

use crate::admission::{AdmissionFilter, AdmissionPolicy, Decision, Rejection};
use crate::config::Config;
use crate::crawler::classifier::{Classification, ContentClassifier};
use crate::crawler::fetcher::{fetch_page, FetchResponse};
use crate::crawler::limiter::{RateLimiter, WaitOutcome};
use crate::crawler::observer::{ErrorObserver, TracingObserver};
use crate::crawler::parser::PageParser;
use crate::crawler::shutdown::ShutdownSignal;
use crate::output::StatsSnapshot;
use crate::state::{CrawlStats, SeenSet};
use crate::url::{extract_host, resolve_link, strip_fragment};
use crate::{ConfigError, CrawlError, UrlError};
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

/// What happened to a page handed to [`CrawlSession::process_page`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageStatus {
    /// Parsed and its links evaluated
    Processed {
        /// Whether the page fed the statistics
        significant: bool,
    },
    /// Not a 200, or no body
    FetchFailed,
    /// The page's own URL cannot be parsed or has no host
    InvalidUrl,
    /// The body could not be turned into text
    ParseFailed,
    /// The crawl shut down during the polite wait
    Interrupted,
    /// The final URL was already processed; its links were still
    /// evaluated but the statistics were left alone
    Repeated,
}

/// Result of processing one fetched page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageReport {
    /// The page URL as fetched
    pub url: String,
    pub status: PageStatus,
    /// Admitted absolute URLs, in document order
    pub admitted: Vec<String>,
}

impl PageReport {
    fn empty(url: &str, status: PageStatus) -> Self {
        Self {
            url: url.to_string(),
            status,
            admitted: Vec::new(),
        }
    }
}

/// The decision core of one crawl
pub struct CrawlSession {
    filter: AdmissionFilter,
    classifier: ContentClassifier,
    limiter: RateLimiter,
    seen: SeenSet,
    /// Final URLs that have already gone through classification
    processed: SeenSet,
    stats: CrawlStats,
    shutdown: ShutdownSignal,
    observer: Arc<dyn ErrorObserver>,
}

impl CrawlSession {
    /// Builds a session from configuration, logging errors with `tracing`
    ///
    /// # Returns
    ///
    /// * `Ok(CrawlSession)` - Ready to process pages
    /// * `Err(ConfigError)` - A scope or trap pattern failed to compile
    pub fn new(config: &Config) -> Result<Self, ConfigError> {
        Self::with_observer(config, Arc::new(TracingObserver))
    }

    /// Builds a session that reports errors to `observer`
    pub fn with_observer(
        config: &Config,
        observer: Arc<dyn ErrorObserver>,
    ) -> Result<Self, ConfigError> {
        let policy = AdmissionPolicy::from_config(&config.admission)?;
        let shutdown = ShutdownSignal::new();
        let interval = Duration::from_millis(config.politeness.interval_ms);

        Ok(Self {
            filter: AdmissionFilter::new(policy),
            classifier: ContentClassifier::from_config(&config.content),
            limiter: RateLimiter::new(interval, shutdown.clone()),
            seen: SeenSet::new(),
            processed: SeenSet::new(),
            stats: CrawlStats::new(),
            shutdown,
            observer,
        })
    }

    pub fn seen(&self) -> &SeenSet {
        &self.seen
    }

    pub fn stats(&self) -> &CrawlStats {
        &self.stats
    }

    pub fn limiter(&self) -> &RateLimiter {
        &self.limiter
    }

    /// Evaluates a candidate URL against this crawl's seen set
    ///
    /// Malformed URLs are reported to the observer before being rejected.
    pub fn evaluate(&self, raw_url: &str) -> Decision {
        let decision = self.filter.evaluate(&self.seen, raw_url);

        match &decision {
            Decision::Admitted(_) => tracing::debug!("Admitted {}", raw_url),
            Decision::Rejected(Rejection::Malformed(err)) => {
                self.observer.observe(&CrawlError::MalformedUrl {
                    url: raw_url.to_string(),
                    source: err.clone(),
                });
            }
            Decision::Rejected(reason) => tracing::debug!("Rejected {}: {}", raw_url, reason),
        }

        decision
    }

    /// Returns true if `raw_url` may be queued
    pub fn admit(&self, raw_url: &str) -> bool {
        self.evaluate(raw_url).is_admitted()
    }

    /// Blocks until `host` may be contacted again
    pub fn polite_wait(&self, host: &str) -> WaitOutcome {
        self.limiter.polite_wait(host)
    }

    /// Classifies page text, recording it in the statistics if significant
    pub fn classify(&self, url: &Url, text: &str) -> Classification {
        self.classifier.process(&self.stats, url, text)
    }

    /// Stops the crawl: pending and future polite waits return immediately
    pub fn shutdown(&self) {
        tracing::info!("Shutdown requested");
        self.shutdown.trigger();
    }

    pub fn is_shutting_down(&self) -> bool {
        self.shutdown.is_triggered()
    }

    /// Fetches `url`, abandoning the request if the crawl shuts down first
    ///
    /// # Returns
    ///
    /// * `Some(FetchResponse)` - The fetch finished (successfully or not)
    /// * `None` - Shutdown was requested before or during the fetch
    pub async fn fetch(&self, client: &Client, url: &str) -> Option<FetchResponse> {
        tokio::select! {
            biased;
            _ = self.shutdown.triggered() => {
                tracing::debug!("Abandoned fetch of {} after shutdown", url);
                None
            }
            response = fetch_page(client, url) => Some(response),
        }
    }

    /// Summarizes the crawl so far
    pub fn snapshot(&self, top_n: usize) -> StatsSnapshot {
        StatsSnapshot::collect(&self.seen, &self.stats, top_n)
    }

    /// Admitted links of one fetched page
    ///
    /// Shorthand for [`process_page`](Self::process_page) when only the
    /// links matter.
    pub fn scrape(&self, response: &FetchResponse, parser: &dyn PageParser) -> Vec<String> {
        self.process_page(response, parser).admitted
    }

    /// Runs one fetched page through the pipeline
    ///
    /// # Pipeline
    ///
    /// 1. Anything but a 200 with a body is a fetch failure
    /// 2. Wait out the host's politeness interval
    /// 3. Mark the page's own URL as seen
    /// 4. Parse the body into text and links
    /// 5. Classify the text (significant pages feed the statistics), unless
    ///    this final URL was already processed through another request
    /// 6. Resolve every link against the page URL and run it through
    ///    admission
    ///
    /// Never fails: errors are reported to the observer and the page yields
    /// no links. Blocks during step 2, so async callers should run this on
    /// a blocking thread.
    pub fn process_page(&self, response: &FetchResponse, parser: &dyn PageParser) -> PageReport {
        let Some(body) = response.content() else {
            self.observer.observe(&CrawlError::Fetch {
                url: response.url.clone(),
                status: response.status,
                reason: response.error.clone(),
            });
            return PageReport::empty(&response.url, PageStatus::FetchFailed);
        };

        let (page_url, host) = match parse_page_url(&response.url) {
            Ok(parsed) => parsed,
            Err(source) => {
                self.observer.observe(&CrawlError::MalformedUrl {
                    url: response.url.clone(),
                    source,
                });
                return PageReport::empty(&response.url, PageStatus::InvalidUrl);
            }
        };

        if self.limiter.polite_wait(&host) == WaitOutcome::Interrupted {
            tracing::debug!("Skipping {} after shutdown", response.url);
            return PageReport::empty(&response.url, PageStatus::Interrupted);
        }

        let own_url = strip_fragment(page_url.as_str());
        self.seen.insert(own_url);

        let parsed = match parser.parse(body) {
            Ok(parsed) => parsed,
            Err(source) => {
                self.observer.observe(&CrawlError::Parse {
                    url: response.url.clone(),
                    source,
                });
                return PageReport::empty(&response.url, PageStatus::ParseFailed);
            }
        };

        let first_visit = self.processed.insert(own_url);
        let significant = if first_visit {
            self.classify(&page_url, &parsed.text).significant
        } else {
            tracing::debug!("{} already counted, only evaluating links", page_url);
            false
        };

        let admitted: Vec<String> = parsed
            .links
            .iter()
            .filter_map(|href| self.admit_link(&page_url, href))
            .collect();

        tracing::info!(
            "Processed {} ({} of {} links admitted{})",
            response.url,
            admitted.len(),
            parsed.links.len(),
            if significant { ", significant" } else { "" }
        );

        let status = if first_visit {
            PageStatus::Processed { significant }
        } else {
            PageStatus::Repeated
        };

        PageReport {
            url: response.url.clone(),
            status,
            admitted,
        }
    }

    /// Resolves an href against the page and admits it
    fn admit_link(&self, page_url: &Url, href: &str) -> Option<String> {
        match resolve_link(page_url, href) {
            Ok(absolute) => self
                .evaluate(absolute.as_str())
                .into_url()
                .map(String::from),
            Err(source) => {
                self.observer.observe(&CrawlError::MalformedUrl {
                    url: href.to_string(),
                    source,
                });
                None
            }
        }
    }
}

/// Parses a fetched page's URL and extracts the host to rate-limit on
fn parse_page_url(raw: &str) -> Result<(Url, String), UrlError> {
    let url = Url::parse(raw).map_err(|e| UrlError::Parse(e.to_string()))?;
    let host = extract_host(&url).ok_or(UrlError::MissingHost)?;
    Ok((url, host))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crawler::observer::CollectingObserver;
    use crate::crawler::parser::{HtmlParser, ParsedPage};
    use crate::ParseError;

    /// Parser returning canned output, regardless of the body
    struct FixedParser(Result<ParsedPage, ParseError>);

    impl PageParser for FixedParser {
        fn parse(&self, _body: &[u8]) -> Result<ParsedPage, ParseError> {
            self.0.clone()
        }
    }

    fn fast_config() -> Config {
        let mut config = Config::default();
        config.politeness.interval_ms = 10;
        config
    }

    fn session() -> (CrawlSession, Arc<CollectingObserver>) {
        let observer = Arc::new(CollectingObserver::new());
        let session = CrawlSession::with_observer(&fast_config(), observer.clone()).unwrap();
        (session, observer)
    }

    fn links(hrefs: &[&str]) -> FixedParser {
        FixedParser(Ok(ParsedPage {
            text: "short".to_string(),
            links: hrefs.iter().map(|href| href.to_string()).collect(),
        }))
    }

    #[test]
    fn test_session_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<CrawlSession>();
    }

    #[test]
    fn test_relative_links_resolved_against_page() {
        let (session, observer) = session();
        let response = FetchResponse::ok("http://www.ics.uci.edu/faculty/", "<p>x</p>");

        let admitted = session.scrape(&response, &links(&["area", "/about", "../grad/"]));

        assert_eq!(
            admitted,
            vec![
                "http://www.ics.uci.edu/faculty/area",
                "http://www.ics.uci.edu/about",
                "http://www.ics.uci.edu/grad/",
            ]
        );
        assert!(observer.is_empty());
    }

    #[test]
    fn test_page_marks_itself_seen() {
        let (session, _) = session();
        let response = FetchResponse::ok("http://www.cs.uci.edu/page1", "<p>x</p>");

        let admitted = session.scrape(&response, &links(&["page1#top", "page1"]));

        assert!(admitted.is_empty());
        assert!(session.seen().contains("http://www.cs.uci.edu/page1"));
    }

    #[test]
    fn test_same_final_url_counted_once() {
        let (session, _) = session();
        assert!(session.admit("http://www.ics.uci.edu/x"));
        assert!(session.admit("https://www.ics.uci.edu/x"));

        // Both requests redirect to the same page
        let article = FixedParser(Ok(ParsedPage {
            text: vec!["knowledge"; 250].join(" "),
            links: vec!["/y".to_string()],
        }));
        let response = FetchResponse::ok("https://www.ics.uci.edu/x", "<p>x</p>");

        let first = session.process_page(&response, &article);
        let second = session.process_page(&response, &links(&["/y", "/z"]));

        assert_eq!(first.status, PageStatus::Processed { significant: true });
        assert_eq!(first.admitted, vec!["https://www.ics.uci.edu/y"]);
        assert_eq!(second.status, PageStatus::Repeated);
        assert_eq!(second.admitted, vec!["https://www.ics.uci.edu/z"]);

        let stats = session.stats();
        assert_eq!(stats.pages_recorded(), 1);
        assert_eq!(stats.word_count("knowledge"), 250);
        assert_eq!(stats.subdomain_count("www.ics.uci.edu"), 1);
    }

    #[test]
    fn test_fetch_failure_yields_nothing() {
        let (session, observer) = session();
        let response = FetchResponse::failed("http://www.ics.uci.edu/gone", 404, None);

        let report = session.process_page(&response, &links(&["/a"]));

        assert_eq!(report.status, PageStatus::FetchFailed);
        assert!(report.admitted.is_empty());
        assert_eq!(observer.len(), 1);
        assert!(observer.errors()[0].contains("404"));
        assert_eq!(session.limiter().host_count(), 0);
    }

    #[test]
    fn test_empty_body_is_fetch_failure() {
        let (session, observer) = session();
        let response = FetchResponse::ok("http://www.ics.uci.edu/blank", Vec::<u8>::new());

        let report = session.process_page(&response, &HtmlParser);

        assert_eq!(report.status, PageStatus::FetchFailed);
        assert_eq!(observer.len(), 1);
    }

    #[test]
    fn test_parse_failure_yields_nothing() {
        let (session, observer) = session();
        let response = FetchResponse::ok("http://www.ics.uci.edu/image", vec![0u8, 1, 2, 3]);

        let report = session.process_page(&response, &HtmlParser);

        assert_eq!(report.status, PageStatus::ParseFailed);
        assert!(report.admitted.is_empty());
        assert_eq!(session.stats().pages_recorded(), 0);
        assert_eq!(observer.len(), 1);
        assert!(observer.errors()[0].contains("binary"));
    }

    #[test]
    fn test_page_url_without_host_is_invalid() {
        let (session, observer) = session();
        let response = FetchResponse::ok("file:///tmp/page.html", "<p>x</p>");

        let report = session.process_page(&response, &links(&["/a"]));

        assert_eq!(report.status, PageStatus::InvalidUrl);
        assert_eq!(observer.len(), 1);
    }

    #[test]
    fn test_malformed_link_is_observed() {
        let (session, observer) = session();

        assert!(!session.admit("not a url"));
        assert_eq!(observer.len(), 1);
        assert!(observer.errors()[0].contains("not a url"));

        // Ordinary rejections are not errors
        assert!(!session.admit("http://evil.com/x"));
        assert_eq!(observer.len(), 1);
    }

    #[test]
    fn test_shutdown_interrupts_page() {
        let (session, _) = session();
        session.shutdown();
        assert!(session.is_shutting_down());

        let response = FetchResponse::ok("http://www.ics.uci.edu/late", "<p>x</p>");
        let report = session.process_page(&response, &links(&["/a"]));

        assert_eq!(report.status, PageStatus::Interrupted);
        assert!(report.admitted.is_empty());
        assert!(!session.seen().contains("/a"));
    }

    #[test]
    fn test_snapshot_counts_seen_urls() {
        let (session, _) = session();
        session.admit("http://www.ics.uci.edu/a");
        session.admit("http://evil.com/b");

        let snapshot = session.snapshot(10);
        assert_eq!(snapshot.unique_pages, 2);
        assert_eq!(snapshot.pages_recorded, 0);
    }
}
