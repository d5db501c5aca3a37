//! HTML parser for extracting visible text and links
//!
//! This module turns a fetched body into the visible text, with `<script>`
//! and `<style>` content removed, and the raw link targets to hand to
//! admission.

use crate::ParseError;
use scraper::node::Node;
use scraper::{Html, Selector};

/// How much of the body is sniffed for NUL bytes
const BINARY_SNIFF_LEN: usize = 1024;

/// Link targets that never lead to a crawlable page
const SKIPPED_SCHEMES: [&str; 4] = ["javascript:", "mailto:", "tel:", "data:"];

/// Extracted information from an HTML page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedPage {
    /// Text content with script and style content removed
    pub text: String,

    /// Raw href targets in document order, absolute or relative
    pub links: Vec<String>,
}

/// Derives text and links from a response body
///
/// Implementations must be usable from several worker threads at once.
pub trait PageParser: Send + Sync {
    fn parse(&self, body: &[u8]) -> Result<ParsedPage, ParseError>;
}

/// `scraper`-based HTML parser
///
/// # Link Extraction Rules
///
/// **Include:**
/// - `<a href="...">` anywhere in the document
///
/// **Exclude:**
/// - `<a href="..." download>`
/// - `javascript:`, `mailto:`, `tel:` links
/// - Data URIs
/// - Empty and fragment-only hrefs
///
/// Bodies with a NUL byte near the start are refused as binary; anything
/// else is decoded as lossy UTF-8, since HTML parsing itself never fails.
#[derive(Debug, Default, Clone, Copy)]
pub struct HtmlParser;

impl PageParser for HtmlParser {
    fn parse(&self, body: &[u8]) -> Result<ParsedPage, ParseError> {
        if body.is_empty() {
            return Err(ParseError::Empty);
        }

        let sniff = &body[..body.len().min(BINARY_SNIFF_LEN)];
        if sniff.contains(&0) {
            return Err(ParseError::Binary);
        }

        let html = String::from_utf8_lossy(body);
        let document = Html::parse_document(&html);

        Ok(ParsedPage {
            text: extract_text(&document),
            links: extract_links(&document),
        })
    }
}

/// Joins every text node outside `<script>` and `<style>` with single spaces
///
/// Adjacent elements (`<p>a</p><a>b</a>`, list items) carry no whitespace
/// between them in the markup, so each chunk gets its own separator.
fn extract_text(document: &Html) -> String {
    let mut text = String::new();

    for node in document.tree.root().descendants() {
        let Node::Text(chunk) = node.value() else {
            continue;
        };

        let hidden = node.ancestors().any(|ancestor| {
            matches!(
                ancestor.value(),
                Node::Element(element) if matches!(element.name(), "script" | "style")
            )
        });

        if !hidden {
            if !text.is_empty() {
                text.push(' ');
            }
            text.push_str(chunk);
        }
    }

    text
}

/// Extracts every followable href in document order
fn extract_links(document: &Html) -> Vec<String> {
    let Ok(a_selector) = Selector::parse("a[href]") else {
        return Vec::new();
    };

    document
        .select(&a_selector)
        .filter(|element| element.value().attr("download").is_none())
        .filter_map(|element| element.value().attr("href"))
        .map(str::trim)
        .filter(|href| is_followable(href))
        .map(str::to_string)
        .collect()
}

/// Returns false for hrefs that can never name another page
fn is_followable(href: &str) -> bool {
    if href.is_empty() || href.starts_with('#') {
        return false;
    }

    let lowered = href.to_ascii_lowercase();
    !SKIPPED_SCHEMES
        .iter()
        .any(|scheme| lowered.starts_with(scheme))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::tokenize;

    fn parse(html: &str) -> ParsedPage {
        HtmlParser.parse(html.as_bytes()).unwrap()
    }

    #[test]
    fn test_text_skips_script_and_style() {
        let html = r#"
            <html>
            <head><style>body { color: red; }</style></head>
            <body>
                <p>Visible words</p>
                <script>var hidden = "secret";</script>
                <div><script><!-- nested --></script>more text</div>
            </body>
            </html>
        "#;
        let parsed = parse(html);

        assert!(parsed.text.contains("Visible words"));
        assert!(parsed.text.contains("more text"));
        assert!(!parsed.text.contains("secret"));
        assert!(!parsed.text.contains("color"));
    }

    #[test]
    fn test_adjacent_elements_stay_separate_words() {
        let parsed = parse(
            r#"<html><body><p>research</p><a href="/">Home</a><ul><li>alpha</li><li>beta</li></ul></body></html>"#,
        );

        assert_eq!(
            tokenize(&parsed.text),
            vec!["research", "home", "alpha", "beta"]
        );
        assert_eq!(parsed.text.split_whitespace().count(), 4);
    }

    #[test]
    fn test_links_are_raw_and_ordered() {
        let html = r#"
            <html>
            <body>
                <a href="page2">Link 1</a>
                <a href=" /page3 ">Link 2</a>
                <a href="https://other.com/page4">Link 3</a>
            </body>
            </html>
        "#;
        let parsed = parse(html);
        assert_eq!(
            parsed.links,
            vec!["page2", "/page3", "https://other.com/page4"]
        );
    }

    #[test]
    fn test_skip_special_schemes() {
        let html = r#"
            <html>
            <body>
                <a href="javascript:void(0)">JS</a>
                <a href="JavaScript:alert(1)">JS</a>
                <a href="mailto:test@example.com">Email</a>
                <a href="tel:+1234567890">Call</a>
                <a href="data:text/html,<h1>Test</h1>">Data</a>
                <a href="/valid">Valid</a>
            </body>
            </html>
        "#;
        let parsed = parse(html);
        assert_eq!(parsed.links, vec!["/valid"]);
    }

    #[test]
    fn test_skip_download_fragment_and_empty() {
        let html = r##"
            <html>
            <body>
                <a href="/file.pdf" download>Download</a>
                <a href="#section">Jump</a>
                <a href="   ">Blank</a>
                <a href="page1#section">Self</a>
            </body>
            </html>
        "##;
        let parsed = parse(html);
        assert_eq!(parsed.links, vec!["page1#section"]);
    }

    #[test]
    fn test_follow_nofollow_links() {
        let parsed = parse(r#"<html><body><a href="/page" rel="nofollow">Link</a></body></html>"#);
        assert_eq!(parsed.links, vec!["/page"]);
    }

    #[test]
    fn test_empty_body() {
        assert_eq!(HtmlParser.parse(b""), Err(ParseError::Empty));
    }

    #[test]
    fn test_binary_body() {
        let mut body = b"\x89PNG\r\n\x1a\n".to_vec();
        body.extend_from_slice(&[0, 0, 0, 13]);
        assert_eq!(HtmlParser.parse(&body), Err(ParseError::Binary));
    }

    #[test]
    fn test_invalid_utf8_is_decoded_lossily() {
        let body = b"<html><body><p>caf\xe9 menu</p></body></html>";
        let parsed = HtmlParser.parse(body).unwrap();
        assert!(parsed.text.contains("menu"));
    }
}
