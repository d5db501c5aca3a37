use crate::config::{AdmissionConfig, ScopeEntry};
use crate::url::{extract_host, matches_path_prefix, matches_wildcard};
use crate::ConfigError;
use regex::{Regex, RegexBuilder};
use std::collections::HashSet;
use url::{Position, Url};

/// One entry of the scope allow-list
#[derive(Debug, Clone)]
pub enum ScopeRule {
    /// Wildcard host pattern (`"*.ics.uci.edu"` or `"today.uci.edu"`) and an
    /// optional path prefix. Ports are ignored.
    Domain {
        pattern: String,
        path_prefix: Option<String>,
    },

    /// Regex over `host[:port]` + path + query, compiled as `^(?:...)` so it
    /// can only match from the first character of the host.
    Pattern(Regex),
}

impl ScopeRule {
    /// Compiles a configured scope entry
    pub fn compile(entry: &ScopeEntry) -> Result<Self, ConfigError> {
        match entry {
            ScopeEntry::Domain {
                domain,
                path_prefix,
            } => Ok(Self::Domain {
                pattern: domain.to_lowercase(),
                path_prefix: path_prefix.clone(),
            }),
            ScopeEntry::Pattern { pattern } => Regex::new(&format!("^(?:{})", pattern))
                .map(Self::Pattern)
                .map_err(|e| ConfigError::InvalidPattern(format!("'{}': {}", pattern, e))),
        }
    }

    /// Returns true if the URL falls inside this rule
    pub fn matches(&self, url: &Url) -> bool {
        match self {
            Self::Domain {
                pattern,
                path_prefix,
            } => {
                let Some(host) = url.host_str() else {
                    return false;
                };
                matches_wildcard(pattern, &host.to_lowercase())
                    && matches_path_prefix(path_prefix.as_deref(), url.path())
            }
            Self::Pattern(regex) => {
                let Some(host) = extract_host(url) else {
                    return false;
                };
                let target = format!(
                    "{}{}",
                    host,
                    &url[Position::BeforePath..Position::AfterQuery]
                );
                regex.is_match(&target)
            }
        }
    }
}

/// A case-insensitive pattern marking URLs that expand without bound
#[derive(Debug, Clone)]
pub struct TrapRule(Regex);

impl TrapRule {
    /// Compiles a trap regex; matching ignores case
    pub fn compile(pattern: &str) -> Result<Self, ConfigError> {
        RegexBuilder::new(pattern)
            .case_insensitive(true)
            .build()
            .map(Self)
            .map_err(|e| ConfigError::InvalidPattern(format!("'{}': {}", pattern, e)))
    }

    /// Returns true if the pattern occurs anywhere in the URL
    pub fn matches(&self, url: &str) -> bool {
        self.0.is_match(url)
    }

    /// The source pattern
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// The immutable rule set the admission filter applies
///
/// Built once from configuration at crawl start. Each rule family can be
/// queried on its own, independent of the deduplication state.
#[derive(Debug, Clone)]
pub struct AdmissionPolicy {
    scope: Vec<ScopeRule>,
    traps: Vec<TrapRule>,
    disallowed_extensions: HashSet<String>,
    allowed_schemes: HashSet<String>,
}

impl AdmissionPolicy {
    /// Compiles the configured rules
    ///
    /// # Returns
    ///
    /// * `Ok(AdmissionPolicy)` - All patterns compiled
    /// * `Err(ConfigError::InvalidPattern)` - A trap or scope regex is invalid
    pub fn from_config(config: &AdmissionConfig) -> Result<Self, ConfigError> {
        let scope = config
            .scope
            .iter()
            .map(ScopeRule::compile)
            .collect::<Result<Vec<_>, _>>()?;

        let traps = config
            .traps
            .iter()
            .map(|pattern| TrapRule::compile(pattern))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            scope,
            traps,
            disallowed_extensions: config
                .disallowed_extensions
                .iter()
                .map(|ext| ext.to_lowercase())
                .collect(),
            allowed_schemes: config
                .allowed_schemes
                .iter()
                .map(|scheme| scheme.to_lowercase())
                .collect(),
        })
    }

    /// Returns the first trap rule matching the URL, if any
    pub fn matching_trap(&self, url: &str) -> Option<&TrapRule> {
        self.traps.iter().find(|trap| trap.matches(url))
    }

    /// Returns true if the URL matches any trap rule
    pub fn is_trap(&self, url: &str) -> bool {
        self.matching_trap(url).is_some()
    }

    /// Returns true if at least one scope rule accepts the URL
    pub fn in_scope(&self, url: &Url) -> bool {
        self.scope.iter().any(|rule| rule.matches(url))
    }

    /// Returns true if the scheme may be queued
    pub fn allows_scheme(&self, scheme: &str) -> bool {
        self.allowed_schemes.contains(scheme)
    }

    /// Returns the lowercase extension of the path if it is disallowed
    ///
    /// The extension is whatever follows the last `.` of the final path
    /// segment, so `/a/report.PDF` yields `"pdf"` while `/a.pdf/` and `/a`
    /// yield nothing.
    pub fn blocked_extension(&self, path: &str) -> Option<String> {
        let last_segment = path.rsplit('/').next()?;
        let (_, ext) = last_segment.rsplit_once('.')?;
        let ext = ext.to_lowercase();
        self.disallowed_extensions.contains(&ext).then_some(ext)
    }
}
