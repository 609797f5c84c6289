//! Application services.

pub mod link_rewriter;
pub mod reference_scanner;

pub use link_rewriter::{LinkRewriter, RewriteOutcome};
pub use reference_scanner::{ReferenceMatch, ReferenceScanner, apply_replacements};
