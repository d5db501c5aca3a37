//! Configuration module for Crawl-Sieve
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//!
//! # Example
//!
//! ```no_run
//! use crawl_sieve::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("crawl.toml")).unwrap();
//! println!("Politeness interval: {}ms", config.politeness.interval_ms);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    AdmissionConfig, Config, ContentConfig, CrawlConfig, PolitenessConfig, ReportConfig,
    ScopeEntry, UserAgentConfig,
};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash, parse_config};
pub use validation::validate;
