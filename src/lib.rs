//! Wallmirror - keeps dated wallpapers in a local mirror.
//!
//! This crate downloads several resolutions of each remote wallpaper into a
//! `YYYY-MM` partitioned directory and rewrites generated HTML pages so that
//! their image references point at the best local variant.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

/// Application layer containing use cases and the link rewriter.
pub mod application;
/// Domain layer containing entities, errors, and port definitions.
pub mod domain;
/// Infrastructure layer containing adapters for the network and filesystem.
pub mod infrastructure;

/// Current version of the application.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name.
pub const NAME: &str = "wallmirror";
