//! Domain layer with core entities, errors, services and port definitions.

/// Entity definitions.
pub mod entities;
/// Error types.
pub mod errors;
/// Port definitions.
pub mod ports;
/// Pure domain services.
pub mod services;

pub use entities::{ImageRecord, ResolutionTag, VariantIndex, VariantKey};
pub use errors::MirrorError;
pub use ports::{ImageFetchPort, PageStorePort, VariantFetchPort, VariantIndexPort};
