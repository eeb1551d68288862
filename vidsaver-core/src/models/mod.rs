//! Domain models for `VidSaver`.
//!
//! ## Submodules
//!
//! - [`platform`] - Platform types (Platform, `ExtractionRequest`)
//! - [`media`] - Media types (`MediaCandidate`, `VideoVariant`, Resolution)
//! - [`result`] - Canonical output (`ExtractionResult`, `ErrorKind`)

mod media;
mod platform;
mod result;

// Re-export everything at the models level
pub use media::{
    MediaCandidate, QualityTier, Resolution, UNKNOWN_RESOLUTION, VideoVariant, select_best_variant,
};
pub use platform::{ExtractionRequest, Platform};
pub use result::{ErrorKind, ExtractionResult, ExtractionStatus};
#[cfg(test)]
mod serde_tests;
