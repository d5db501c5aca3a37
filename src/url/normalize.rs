use crate::{UrlError, UrlResult};
use url::Url;

/// Removes the fragment (`#...`) suffix from a raw URL string
///
/// This is the only normalization applied before deduplication, so two
/// links differing only in their fragment are the same crawl target.
///
/// # Examples
///
/// ```
/// use crawl_sieve::url::strip_fragment;
///
/// assert_eq!(strip_fragment("http://cs.uci.edu/x#frag"), "http://cs.uci.edu/x");
/// assert_eq!(strip_fragment("http://cs.uci.edu/x"), "http://cs.uci.edu/x");
/// ```
pub fn strip_fragment(raw: &str) -> &str {
    match raw.split_once('#') {
        Some((before, _)) => before,
        None => raw,
    }
}

/// Resolves an href found on a page against that page's URL
///
/// Absolute hrefs are returned as parsed; relative hrefs are joined to
/// `base`. Surrounding whitespace, which is common in hand-written HTML, is
/// trimmed first.
///
/// # Returns
///
/// * `Ok(Url)` - The absolute URL
/// * `Err(UrlError)` - The href cannot be parsed even relative to `base`
pub fn resolve_link(base: &Url, href: &str) -> UrlResult<Url> {
    base.join(href.trim())
        .map_err(|e| UrlError::Parse(format!("{} ({})", e, href)))
}
