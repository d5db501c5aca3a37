use url::Url;

/// Extracts the host key of a URL: the lowercase host plus an explicit port
///
/// This is the network location used both as the rate-limiting key and as
/// the subdomain statistics key. Default ports are elided by the `url`
/// crate, so `http://a.edu:80/` and `http://a.edu/` share a key.
///
/// # Returns
///
/// * `Some(String)` - `host` or `host:port`
/// * `None` - If the URL has no host (e.g. `mailto:` or `data:` URLs)
///
/// # Examples
///
/// ```
/// use url::Url;
/// use crawl_sieve::url::extract_host;
///
/// let url = Url::parse("https://WWW.ICS.UCI.EDU/about").unwrap();
/// assert_eq!(extract_host(&url), Some("www.ics.uci.edu".to_string()));
///
/// let url = Url::parse("http://localhost:8080/").unwrap();
/// assert_eq!(extract_host(&url), Some("localhost:8080".to_string()));
/// ```
pub fn extract_host(url: &Url) -> Option<String> {
    let host = url.host_str()?.to_lowercase();
    match url.port() {
        Some(port) => Some(format!("{}:{}", host, port)),
        None => Some(host),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_subdomain() {
        let url = Url::parse("https://vision.ics.uci.edu/papers").unwrap();
        assert_eq!(extract_host(&url), Some("vision.ics.uci.edu".to_string()));
    }

    #[test]
    fn test_extract_keeps_explicit_port() {
        let url = Url::parse("http://www.stat.uci.edu:8443/").unwrap();
        assert_eq!(extract_host(&url), Some("www.stat.uci.edu:8443".to_string()));
    }

    #[test]
    fn test_extract_drops_default_port() {
        let url = Url::parse("http://www.stat.uci.edu:80/").unwrap();
        assert_eq!(extract_host(&url), Some("www.stat.uci.edu".to_string()));
    }

    #[test]
    fn test_extract_ignores_path_query_fragment() {
        let url = Url::parse("https://cs.uci.edu/a/b?x=1#top").unwrap();
        assert_eq!(extract_host(&url), Some("cs.uci.edu".to_string()));
    }

    #[test]
    fn test_no_host() {
        let url = Url::parse("mailto:someone@uci.edu").unwrap();
        assert_eq!(extract_host(&url), None);
    }
}
