//! Infrastructure layer with filesystem and network adapters.

/// Application configuration.
pub mod config;
/// Remote image downloads and CDN URL rules.
pub mod http;
/// Local variant storage.
pub mod mirror;
pub mod pages;
pub mod records;

pub use config::{AppConfig, CliArgs, Command, ConfigError, ConfigStorage, LogLevel, MirrorConfig};
pub use http::{HttpImageFetcher, build_fetch_url, variant_urls};
pub use mirror::{LocalMirror, VariantFetcher, VariantIndexBuilder};
pub use pages::HtmlPageStore;
pub use records::{RecordFileError, load_records};
