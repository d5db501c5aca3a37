use serde::Deserialize;

/// Main configuration structure for Crawl-Sieve
///
/// Every section is optional; missing sections fall back to the defaults of
/// the original departmental crawl (UCI ICS/CS/Informatics/Stat hosts).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub politeness: PolitenessConfig,
    #[serde(default)]
    pub content: ContentConfig,
    #[serde(default)]
    pub admission: AdmissionConfig,
    #[serde(default)]
    pub report: ReportConfig,
    #[serde(default, rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    #[serde(default)]
    pub crawl: CrawlConfig,
}

/// Per-host politeness configuration
#[derive(Debug, Clone, Deserialize)]
pub struct PolitenessConfig {
    /// Minimum time between two requests to the same host (milliseconds)
    #[serde(rename = "interval-ms", default = "default_interval_ms")]
    pub interval_ms: u64,
}

impl Default for PolitenessConfig {
    fn default() -> Self {
        Self {
            interval_ms: default_interval_ms(),
        }
    }
}

/// Thresholds a page must exceed to count as substantive content
#[derive(Debug, Clone, Deserialize)]
pub struct ContentConfig {
    /// Collapsed text must be strictly longer than this many characters
    #[serde(rename = "min-chars", default = "default_min_chars")]
    pub min_chars: usize,

    /// Text must contain strictly more than this many words
    #[serde(rename = "min-words", default = "default_min_words")]
    pub min_words: usize,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            min_chars: default_min_chars(),
            min_words: default_min_words(),
        }
    }
}

/// URL admission rules
#[derive(Debug, Clone, Deserialize)]
pub struct AdmissionConfig {
    /// Schemes a URL may use
    #[serde(rename = "allowed-schemes", default = "default_allowed_schemes")]
    pub allowed_schemes: Vec<String>,

    /// File extensions (without the dot) that are never queued
    #[serde(
        rename = "disallowed-extensions",
        default = "default_disallowed_extensions"
    )]
    pub disallowed_extensions: Vec<String>,

    /// Case-insensitive regexes marking crawler traps
    #[serde(default = "default_traps")]
    pub traps: Vec<String>,

    /// Allow-list of hosts and paths
    #[serde(default = "default_scope")]
    pub scope: Vec<ScopeEntry>,
}

impl Default for AdmissionConfig {
    fn default() -> Self {
        Self {
            allowed_schemes: default_allowed_schemes(),
            disallowed_extensions: default_disallowed_extensions(),
            traps: default_traps(),
            scope: default_scope(),
        }
    }
}

/// A single scope allow-list entry
///
/// Either a wildcard domain (e.g. `"*.ics.uci.edu"`) with an optional path
/// prefix, or a regex over `host[:port]/path?query` that is anchored at the
/// host.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum ScopeEntry {
    Domain {
        domain: String,
        #[serde(rename = "path-prefix", default)]
        path_prefix: Option<String>,
    },
    Pattern {
        pattern: String,
    },
}

impl ScopeEntry {
    /// Convenience constructor for a bare domain entry
    pub fn domain(domain: &str) -> Self {
        Self::Domain {
            domain: domain.to_string(),
            path_prefix: None,
        }
    }
}

/// End-of-crawl report configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ReportConfig {
    /// Number of most frequent words listed in the report
    #[serde(rename = "top-words", default = "default_top_words")]
    pub top_words: usize,

    /// Optional path of a markdown summary written at crawl end
    #[serde(rename = "summary-path", default)]
    pub summary_path: Option<String>,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            top_words: default_top_words(),
            summary_path: None,
        }
    }
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
pub struct UserAgentConfig {
    /// Name of the crawler
    #[serde(rename = "crawler-name")]
    pub crawler_name: String,

    /// Version of the crawler
    #[serde(rename = "crawler-version")]
    pub crawler_version: String,

    /// URL with information about the crawler
    #[serde(rename = "contact-url")]
    pub contact_url: String,

    /// Email address for crawler-related contact
    #[serde(rename = "contact-email")]
    pub contact_email: String,
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            crawler_name: "crawl-sieve".to_string(),
            crawler_version: env!("CARGO_PKG_VERSION").to_string(),
            contact_url: "https://example.org/crawl-sieve".to_string(),
            contact_email: "crawler@example.org".to_string(),
        }
    }
}

/// Seeds and budget for the bundled command-line crawl
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlConfig {
    /// URLs the command-line crawl starts from
    #[serde(default)]
    pub seeds: Vec<String>,

    /// Maximum number of pages fetched before the crawl stops
    #[serde(rename = "max-pages", default = "default_max_pages")]
    pub max_pages: usize,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            seeds: Vec::new(),
            max_pages: default_max_pages(),
        }
    }
}

fn default_interval_ms() -> u64 {
    1000
}

fn default_min_chars() -> usize {
    2000
}

fn default_min_words() -> usize {
    200
}

fn default_top_words() -> usize {
    50
}

fn default_max_pages() -> usize {
    100
}

fn default_allowed_schemes() -> Vec<String> {
    vec!["http".to_string(), "https".to_string()]
}

fn default_traps() -> Vec<String> {
    [r"calendar", r"event", r"week=\d+", r"month=\d+", r"year=\d+"]
        .iter()
        .map(|p| p.to_string())
        .collect()
}

fn default_scope() -> Vec<ScopeEntry> {
    vec![
        ScopeEntry::domain("*.ics.uci.edu"),
        ScopeEntry::domain("*.cs.uci.edu"),
        ScopeEntry::domain("*.informatics.uci.edu"),
        ScopeEntry::domain("*.stat.uci.edu"),
        ScopeEntry::Domain {
            domain: "today.uci.edu".to_string(),
            path_prefix: Some("/department/information_computer_sciences/".to_string()),
        },
    ]
}

fn default_disallowed_extensions() -> Vec<String> {
    [
        "css", "js", "bmp", "gif", "jpg", "jpeg", "ico", "png", "tif", "tiff", "mid", "mp2",
        "mp3", "mp4", "wav", "avi", "mov", "mpeg", "ram", "m4v", "mkv", "ogg", "ogv", "pdf", "ps",
        "eps", "tex", "ppt", "pptx", "doc", "docx", "xls", "xlsx", "names", "data", "dat", "exe",
        "bz2", "tar", "msi", "bin", "7z", "psd", "dmg", "iso", "epub", "dll", "cnf", "tgz", "sha1",
        "thmx", "mso", "arff", "rtf", "jar", "csv", "rm", "smil", "wmv", "swf", "wma", "zip",
        "rar", "gz",
    ]
    .iter()
    .map(|e| e.to_string())
    .collect()
}
