//! Markdown summary generation
//!
//! This module generates human-readable markdown summaries of crawl results:
//! page counts, the longest page, the word ranking and the subdomain table.

use crate::output::stats::StatsSnapshot;
use crate::output::OutputResult;
use chrono::{DateTime, Utc};
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Writes a markdown summary stamped with the current time
///
/// # Arguments
///
/// * `snapshot` - The crawl statistics
/// * `output_path` - Path where the markdown file should be written
///
/// # Returns
///
/// * `Ok(())` - Successfully wrote markdown summary
/// * `Err(OutputError)` - Failed to write summary
pub fn write_markdown_report(snapshot: &StatsSnapshot, output_path: &Path) -> OutputResult<()> {
    let markdown = format_markdown_report(snapshot, Utc::now());

    let mut file = File::create(output_path)?;
    file.write_all(markdown.as_bytes())?;

    tracing::info!("Wrote summary to {}", output_path.display());
    Ok(())
}

/// Formats crawl statistics as markdown
pub fn format_markdown_report(snapshot: &StatsSnapshot, generated_at: DateTime<Utc>) -> String {
    let mut md = String::new();

    // Title
    md.push_str("# Crawl-Sieve Crawl Summary\n\n");
    md.push_str(&format!(
        "Generated {}\n\n",
        generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));

    // Overall statistics
    md.push_str("## Overall Statistics\n\n");
    md.push_str(&format!("- **Unique Pages**: {}\n", snapshot.unique_pages));
    md.push_str(&format!(
        "- **Significant Pages**: {}\n",
        snapshot.pages_recorded
    ));
    match &snapshot.longest_page {
        Some(page) => md.push_str(&format!(
            "- **Longest Page**: <{}> ({} words)\n\n",
            page.url, page.word_count
        )),
        None => md.push_str("- **Longest Page**: none\n\n"),
    }

    // Word ranking
    if !snapshot.top_words.is_empty() {
        md.push_str(&format!(
            "## Top {} Words\n\n",
            snapshot.top_words.len()
        ));
        md.push_str("| Rank | Word | Count |\n");
        md.push_str("|------|------|-------|\n");
        for (rank, (word, count)) in snapshot.top_words.iter().enumerate() {
            md.push_str(&format!("| {} | {} | {} |\n", rank + 1, word, count));
        }
        md.push('\n');
    }

    // Subdomains
    if !snapshot.subdomains.is_empty() {
        md.push_str("## Subdomains\n\n");
        md.push_str("| Host | Pages |\n");
        md.push_str("|------|-------|\n");
        for (host, count) in &snapshot.subdomains {
            md.push_str(&format!("| {} | {} |\n", host, count));
        }
        md.push('\n');
    }

    md
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::LongestPage;
    use chrono::TimeZone;
    use tempfile::TempDir;

    fn create_test_snapshot() -> StatsSnapshot {
        StatsSnapshot {
            unique_pages: 42,
            pages_recorded: 7,
            longest_page: Some(LongestPage {
                url: "http://www.ics.uci.edu/long".to_string(),
                word_count: 900,
            }),
            top_words: vec![("research".to_string(), 30), ("students".to_string(), 21)],
            subdomains: vec![
                ("vision.ics.uci.edu".to_string(), 2),
                ("www.ics.uci.edu".to_string(), 5),
            ],
        }
    }

    #[test]
    fn test_format_markdown_report() {
        let at = Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 0).unwrap();
        let md = format_markdown_report(&create_test_snapshot(), at);

        assert!(md.starts_with("# Crawl-Sieve Crawl Summary"));
        assert!(md.contains("Generated 2024-03-01 12:30:00 UTC"));
        assert!(md.contains("- **Unique Pages**: 42"));
        assert!(md.contains("<http://www.ics.uci.edu/long> (900 words)"));
        assert!(md.contains("| 1 | research | 30 |"));
        assert!(md.contains("| www.ics.uci.edu | 5 |"));
    }

    #[test]
    fn test_empty_sections_are_omitted() {
        let snapshot = StatsSnapshot {
            unique_pages: 0,
            pages_recorded: 0,
            longest_page: None,
            top_words: Vec::new(),
            subdomains: Vec::new(),
        };
        let md = format_markdown_report(&snapshot, Utc::now());

        assert!(md.contains("- **Longest Page**: none"));
        assert!(!md.contains("## Top"));
        assert!(!md.contains("## Subdomains"));
    }

    #[test]
    fn test_write_markdown_report() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("summary.md");

        write_markdown_report(&create_test_snapshot(), &path).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("## Subdomains"));
    }
}
