//! Application layer with services and use cases.

/// Application services.
pub mod services;
/// Use case implementations.
pub mod use_cases;

pub use services::{LinkRewriter, RewriteOutcome};
pub use use_cases::{MirrorImagesUseCase, MirrorSummary, RewritePagesUseCase, RewriteSummary};
