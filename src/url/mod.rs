//! URL handling module for Crawl-Sieve
//!
//! This module provides the small URL primitives the admission filter and
//! the page processor share: fragment stripping, relative link resolution,
//! host extraction, and wildcard host/path matching.

mod domain;
mod matcher;
mod normalize;

pub use domain::extract_host;
pub use matcher::{matches_path_prefix, matches_wildcard};
pub use normalize::{resolve_link, strip_fragment};
