//! Use case implementations.

mod mirror_images_use_case;
mod rewrite_pages_use_case;

pub use mirror_images_use_case::{DEFAULT_MAX_IMAGES, MirrorImagesUseCase, MirrorSummary};
pub use rewrite_pages_use_case::{RewritePagesUseCase, RewriteSummary};
