mod image_fetch_port;
mod page_store_port;
mod variant_port;

pub use image_fetch_port::{FetchError, FetchResult, ImageFetchPort};
pub use page_store_port::PageStorePort;
pub use variant_port::{VariantFetchPort, VariantIndexPort};
