//! Crawl-Sieve main entry point
//!
//! This is the command-line interface for the Crawl-Sieve focused crawler.

use anyhow::Context;
use clap::Parser;
use crawl_sieve::config::{load_config_with_hash, Config, ScopeEntry};
use crawl_sieve::crawler::{build_http_client, CrawlSession, HtmlParser};
use crawl_sieve::output::{print_report, write_markdown_report};
use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Crawl-Sieve: a focused, polite web crawler
///
/// Crawl-Sieve fetches pages breadth-first from its seeds, keeps to the
/// configured scope, waits politely between requests to the same host, and
/// reports word and subdomain statistics over substantive pages.
#[derive(Parser, Debug)]
#[command(name = "crawl-sieve")]
#[command(version)]
#[command(about = "A focused, polite web crawler", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Additional seed URL (repeatable)
    #[arg(long = "seed", value_name = "URL")]
    seeds: Vec<String>,

    /// Override the page budget from the configuration
    #[arg(long, value_name = "N")]
    max_pages: Option<usize>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would be crawled without actually crawling
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    // Load and validate configuration
    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (config, config_hash) = load_config_with_hash(&cli.config)
        .with_context(|| format!("Failed to load {}", cli.config.display()))?;
    tracing::info!("Configuration loaded successfully (hash: {})", config_hash);

    let mut seeds = config.crawl.seeds.clone();
    seeds.extend(cli.seeds.iter().cloned());
    let max_pages = cli.max_pages.unwrap_or(config.crawl.max_pages);

    if cli.dry_run {
        handle_dry_run(&config, &seeds, max_pages);
        return Ok(());
    }

    handle_crawl(config, seeds, max_pages).await
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("crawl_sieve=info,warn"),
            1 => EnvFilter::new("crawl_sieve=debug,info"),
            2 => EnvFilter::new("crawl_sieve=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the --dry-run mode: shows the policy and what would be crawled
fn handle_dry_run(config: &Config, seeds: &[String], max_pages: usize) {
    println!("=== Crawl-Sieve Dry Run ===\n");

    println!("Politeness:");
    println!("  Interval per host: {}ms", config.politeness.interval_ms);

    println!("\nContent:");
    println!("  Significant above: {} chars", config.content.min_chars);
    println!("  Significant above: {} words", config.content.min_words);

    println!("\nUser Agent:");
    println!("  Name: {}", config.user_agent.crawler_name);
    println!("  Version: {}", config.user_agent.crawler_version);
    println!("  Contact URL: {}", config.user_agent.contact_url);
    println!("  Contact Email: {}", config.user_agent.contact_email);

    println!("\nScope ({} rules):", config.admission.scope.len());
    for entry in &config.admission.scope {
        match entry {
            ScopeEntry::Domain {
                domain,
                path_prefix: Some(prefix),
            } => println!("  - {}{}", domain, prefix),
            ScopeEntry::Domain { domain, .. } => println!("  - {}", domain),
            ScopeEntry::Pattern { pattern } => println!("  - /{}/", pattern),
        }
    }

    println!("\nTrap Patterns ({}):", config.admission.traps.len());
    for trap in &config.admission.traps {
        println!("  - {}", trap);
    }

    println!("\nSeeds ({}):", seeds.len());
    for seed in seeds {
        println!("  * {}", seed);
    }

    println!("\n✓ Configuration is valid");
    println!("✓ Would fetch at most {} pages", max_pages);
}

/// Handles the main crawl operation
///
/// Fetches breadth-first from the seeds, handing each response to the
/// session on a blocking thread (the polite wait sleeps), until the page
/// budget is spent, the frontier empties, or Ctrl-C is pressed.
async fn handle_crawl(config: Config, seeds: Vec<String>, max_pages: usize) -> anyhow::Result<()> {
    let session = Arc::new(CrawlSession::new(&config)?);
    let client = build_http_client(&config.user_agent).context("Failed to build HTTP client")?;

    let mut frontier = VecDeque::new();
    for seed in seeds {
        if session.admit(&seed) {
            frontier.push_back(seed);
        } else {
            tracing::warn!("Seed {} rejected by admission rules", seed);
        }
    }

    if frontier.is_empty() {
        anyhow::bail!("No admissible seed URLs");
    }
    tracing::info!("Starting crawl with {} seed URLs", frontier.len());

    let signal_session = Arc::clone(&session);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            signal_session.shutdown();
        }
    });

    let mut fetched = 0;
    while let Some(url) = frontier.pop_front() {
        if fetched >= max_pages {
            tracing::info!("Page budget of {} reached", max_pages);
            break;
        }
        let Some(response) = session.fetch(&client, &url).await else {
            break;
        };
        fetched += 1;

        let worker = Arc::clone(&session);
        let report = tokio::task::spawn_blocking(move || worker.process_page(&response, &HtmlParser))
            .await
            .context("Page worker panicked")?;

        frontier.extend(report.admitted);
    }

    tracing::info!(
        "Crawl finished: {} pages fetched, {} still queued",
        fetched,
        frontier.len()
    );

    let snapshot = session.snapshot(config.report.top_words);
    print_report(&snapshot);

    if let Some(path) = &config.report.summary_path {
        write_markdown_report(&snapshot, Path::new(path))?;
    }

    Ok(())
}
