//! Remote image access.
//!
//! This module provides:
//! - Per-resolution fetch URL construction
//! - The reqwest-backed image fetcher

pub mod bing_cdn;
pub mod http_fetcher;

pub use bing_cdn::{build_fetch_url, variant_urls};
pub use http_fetcher::{DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT, HttpImageFetcher};
