use crate::admission::policy::AdmissionPolicy;
use crate::state::SeenSet;
use crate::url::strip_fragment;
use crate::UrlError;
use std::fmt;
use url::Url;

/// Why a URL was not admitted
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    /// The URL had already been evaluated in this crawl
    Duplicate,
    /// The URL matches a crawler trap pattern
    Trap,
    /// No scope rule accepts the URL
    OutOfScope,
    /// The scheme is not allowed
    Scheme(String),
    /// The path ends in a disallowed extension
    Extension(String),
    /// The URL could not be parsed
    Malformed(UrlError),
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Duplicate => write!(f, "already seen"),
            Self::Trap => write!(f, "crawler trap"),
            Self::OutOfScope => write!(f, "out of scope"),
            Self::Scheme(scheme) => write!(f, "scheme '{}' not allowed", scheme),
            Self::Extension(ext) => write!(f, "extension '.{}' not allowed", ext),
            Self::Malformed(err) => write!(f, "malformed: {}", err),
        }
    }
}

/// Outcome of evaluating one candidate link
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// The URL may be queued; carries the parsed, fragment-free URL
    Admitted(Url),
    /// The URL must not be queued
    Rejected(Rejection),
}

impl Decision {
    /// Returns true if the URL was admitted
    pub fn is_admitted(&self) -> bool {
        matches!(self, Self::Admitted(_))
    }

    /// Returns the admitted URL, if any
    pub fn into_url(self) -> Option<Url> {
        match self {
            Self::Admitted(url) => Some(url),
            Self::Rejected(_) => None,
        }
    }

    /// Returns the rejection reason, if any
    pub fn rejection(&self) -> Option<&Rejection> {
        match self {
            Self::Admitted(_) => None,
            Self::Rejected(reason) => Some(reason),
        }
    }
}

/// Decides whether candidate links may ever enter the frontier
///
/// Every URL is evaluated at most once per crawl: the first evaluation
/// records it in the [`SeenSet`] whatever the outcome, and every later
/// evaluation of the same (fragment-stripped) URL is a [`Rejection::Duplicate`].
#[derive(Debug, Clone)]
pub struct AdmissionFilter {
    policy: AdmissionPolicy,
}

impl AdmissionFilter {
    /// Creates a filter applying `policy`
    pub fn new(policy: AdmissionPolicy) -> Self {
        Self { policy }
    }

    /// Evaluates a candidate URL
    ///
    /// Steps, stopping at the first rejection:
    /// 1. strip the fragment
    /// 2. reject if already seen, otherwise mark as seen
    /// 3. reject trap patterns
    /// 4. parse, then reject URLs outside every scope rule
    /// 5. reject disallowed schemes
    /// 6. reject disallowed path extensions
    ///
    /// Never panics: unparsable input becomes [`Rejection::Malformed`].
    pub fn evaluate(&self, seen: &SeenSet, raw_url: &str) -> Decision {
        let normalized = strip_fragment(raw_url);

        if !seen.insert(normalized) {
            return Decision::Rejected(Rejection::Duplicate);
        }

        if let Some(trap) = self.policy.matching_trap(normalized) {
            tracing::debug!("Trap pattern '{}' matched {}", trap.as_str(), normalized);
            return Decision::Rejected(Rejection::Trap);
        }

        let url = match Url::parse(normalized) {
            Ok(url) => url,
            Err(e) => {
                let err = UrlError::Parse(e.to_string());
                return Decision::Rejected(Rejection::Malformed(err));
            }
        };

        if !self.policy.in_scope(&url) {
            return Decision::Rejected(Rejection::OutOfScope);
        }

        if !self.policy.allows_scheme(url.scheme()) {
            return Decision::Rejected(Rejection::Scheme(url.scheme().to_string()));
        }

        if let Some(ext) = self.policy.blocked_extension(url.path()) {
            return Decision::Rejected(Rejection::Extension(ext));
        }

        Decision::Admitted(url)
    }

    /// Boolean form of [`evaluate`](Self::evaluate)
    pub fn admit(&self, seen: &SeenSet, raw_url: &str) -> bool {
        self.evaluate(seen, raw_url).is_admitted()
    }
}
