/// Checks if a host matches a wildcard domain pattern
///
/// Two pattern forms are supported:
/// 1. Exact: `"today.uci.edu"` matches only `"today.uci.edu"`
/// 2. Wildcard: `"*.ics.uci.edu"` matches the bare `"ics.uci.edu"` and any
///    subdomain such as `"www.ics.uci.edu"` or `"a.b.ics.uci.edu"`
///
/// Matching is label-aware: the candidate must equal the base or end with
/// `"." + base`, so `"evilics.uci.edu"` and `"ics.uci.edu.attacker.com"`
/// never match `"*.ics.uci.edu"`. Both sides are expected in lowercase.
///
/// # Examples
///
/// ```
/// use crawl_sieve::url::matches_wildcard;
///
/// assert!(matches_wildcard("*.ics.uci.edu", "ics.uci.edu"));
/// assert!(matches_wildcard("*.ics.uci.edu", "www.ics.uci.edu"));
/// assert!(!matches_wildcard("*.ics.uci.edu", "physics.uci.edu"));
/// assert!(!matches_wildcard("today.uci.edu", "www.today.uci.edu"));
/// ```
pub fn matches_wildcard(pattern: &str, candidate: &str) -> bool {
    match pattern.strip_prefix("*.") {
        Some(base) => {
            candidate == base
                || candidate
                    .strip_suffix(base)
                    .is_some_and(|rest| rest.ends_with('.'))
        }
        None => candidate == pattern,
    }
}

/// Checks if a URL path falls under an optional path prefix
///
/// `None` accepts every path. A prefix ending in `/` also accepts the
/// directory itself without the trailing slash, so
/// `"/department/ics/"` accepts `"/department/ics"`.
pub fn matches_path_prefix(prefix: Option<&str>, path: &str) -> bool {
    let Some(prefix) = prefix else {
        return true;
    };

    if path.starts_with(prefix) {
        return true;
    }

    prefix
        .strip_suffix('/')
        .is_some_and(|dir| !dir.is_empty() && path == dir)
}
