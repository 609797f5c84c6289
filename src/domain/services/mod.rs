//! Pure domain services.

pub mod identity_extractor;
pub mod resolution_policy;

pub use identity_extractor::{QueryParam, extract_identity, query_param, synthesize_identity};
pub use resolution_policy::{ReferenceShape, ResolutionPolicy, width_hint};
