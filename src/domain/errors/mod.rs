//! Domain error types.

mod mirror_error;

pub use mirror_error::MirrorError;
