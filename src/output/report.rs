//! Plain-text crawl report

use crate::output::stats::StatsSnapshot;
use std::fmt::Write;

/// Formats the end-of-crawl report
///
/// ```text
/// Number of unique pages: 3
/// Longest page: http://www.ics.uci.edu/a, 250
/// Top 2 Words (excluding stopwords):
/// crawler, 12
/// pages, 9
/// Subdomains found:
/// www.ics.uci.edu, 1
/// ```
pub fn format_report(snapshot: &StatsSnapshot) -> String {
    let mut out = String::new();

    // Writing to a String cannot fail
    let _ = writeln!(out, "Number of unique pages: {}", snapshot.unique_pages);

    match &snapshot.longest_page {
        Some(page) => {
            let _ = writeln!(out, "Longest page: {}, {}", page.url, page.word_count);
        }
        None => {
            let _ = writeln!(out, "Longest page: none");
        }
    }

    let _ = writeln!(
        out,
        "Top {} Words (excluding stopwords):",
        snapshot.top_words.len()
    );
    for (word, count) in &snapshot.top_words {
        let _ = writeln!(out, "{}, {}", word, count);
    }

    let _ = writeln!(out, "Subdomains found:");
    for (host, count) in &snapshot.subdomains {
        let _ = writeln!(out, "{}, {}", host, count);
    }

    out
}

/// Prints the report to stdout
pub fn print_report(snapshot: &StatsSnapshot) {
    print!("{}", format_report(snapshot));
}
