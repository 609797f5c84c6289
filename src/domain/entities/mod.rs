//! Domain entity definitions.

mod image_record;
mod resolution;
mod variant;

pub use image_record::{ImageRecord, is_year_month_prefix};
pub use resolution::{ResolutionTag, THUMBNAIL_PATH, UrlConvention};
pub use variant::{MirrorIndex, VariantFile, VariantIndex, VariantKey};
