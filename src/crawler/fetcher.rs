//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler:
//! - Building HTTP clients with proper user agent strings
//! - GET requests that always produce a [`FetchResponse`] descriptor
//!
//! There are no retries here: a failed fetch is reported once and the page
//! is dropped.

use crate::config::UserAgentConfig;
use reqwest::{redirect::Policy, Client, StatusCode};
use std::time::Duration;

/// Maximum redirect hops followed before giving up
const MAX_REDIRECTS: usize = 10;

/// Outcome of one fetch, successful or not
///
/// `status` is 0 when no HTTP response was received at all (connection
/// refused, timeout, DNS failure); `error` then describes what went wrong.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchResponse {
    /// Final URL after redirects (the requested URL if none were followed)
    pub url: String,

    /// HTTP status code, or 0 if the request never completed
    pub status: u16,

    /// Description of a transport or body error
    pub error: Option<String>,

    /// Raw body bytes; `None` means there was no content
    pub body: Option<Vec<u8>>,
}

impl FetchResponse {
    /// A 200 response carrying `body`
    pub fn ok(url: impl Into<String>, body: impl Into<Vec<u8>>) -> Self {
        Self {
            url: url.into(),
            status: StatusCode::OK.as_u16(),
            error: None,
            body: Some(body.into()),
        }
    }

    /// A response with no content
    pub fn failed(url: impl Into<String>, status: u16, error: Option<String>) -> Self {
        Self {
            url: url.into(),
            status,
            error,
            body: None,
        }
    }

    /// The body, if this response is usable for processing
    ///
    /// Only a 200 with a non-empty body qualifies.
    pub fn content(&self) -> Option<&[u8]> {
        if self.status != StatusCode::OK.as_u16() {
            return None;
        }
        self.body.as_deref().filter(|body| !body.is_empty())
    }
}

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `config` - The user agent configuration
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
pub fn build_http_client(config: &UserAgentConfig) -> Result<Client, reqwest::Error> {
    // Format: CrawlerName/Version (+ContactURL; ContactEmail)
    let user_agent = format!(
        "{}/{} (+{}; {})",
        config.crawler_name, config.crawler_version, config.contact_url, config.contact_email
    );

    Client::builder()
        .user_agent(user_agent)
        .timeout(Duration::from_secs(30))
        .connect_timeout(Duration::from_secs(10))
        .redirect(Policy::limited(MAX_REDIRECTS))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a URL and describes the result
///
/// Never fails: transport errors become a response with status 0, HTTP
/// errors keep their status and carry no body, and a body that cannot be
/// read is reported through `error`.
///
/// # Arguments
///
/// * `client` - The HTTP client to use
/// * `url` - The URL to fetch
pub async fn fetch_page(client: &Client, url: &str) -> FetchResponse {
    let response = match client.get(url).send().await {
        Ok(response) => response,
        Err(e) => {
            let reason = if e.is_timeout() {
                "Request timeout".to_string()
            } else if e.is_connect() {
                "Connection refused".to_string()
            } else {
                e.to_string()
            };
            return FetchResponse::failed(url, 0, Some(reason));
        }
    };

    let status = response.status();
    let final_url = response.url().to_string();

    if status != StatusCode::OK {
        let reason = status.canonical_reason().map(str::to_string);
        return FetchResponse::failed(final_url, status.as_u16(), reason);
    }

    match response.bytes().await {
        Ok(bytes) => FetchResponse::ok(final_url, bytes.to_vec()),
        Err(e) => FetchResponse::failed(final_url, status.as_u16(), Some(e.to_string())),
    }
}
