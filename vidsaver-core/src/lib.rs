// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # `VidSaver` Core
//!
//! Core types and models for the `VidSaver` extractor.
//!
//! This crate provides the foundational abstractions shared by the other
//! `VidSaver` crates:
//!
//! - Domain models (platforms, media candidates, canonical results)
//! - Error types
//! - URL normalization helpers
//! - The shared quality selection rule
//!
//! ## Key Types
//!
//! ### Platform Types
//! - [`Platform`] - Supported source platforms
//! - [`ExtractionRequest`] - A raw URL plus its platform
//!
//! ### Media Types
//! - [`MediaCandidate`] - A located media URL with optional metadata
//! - [`VideoVariant`] - One quality variant of a video
//! - [`Resolution`] - Width and height in pixels
//! - [`select_best_variant`] - Picks the largest variant
//!
//! ### Results
//! - [`ExtractionResult`] - The canonical output record
//! - [`ErrorKind`] - Failure taxonomy

pub mod error;
pub mod models;
pub mod url;

// Re-export error types
pub use error::CoreError;

// Re-export all model types
pub use models::{
    // Platform types
    ExtractionRequest,
    Platform,
    // Media types
    MediaCandidate,
    QualityTier,
    Resolution,
    UNKNOWN_RESOLUTION,
    VideoVariant,
    select_best_variant,
    // Results
    ErrorKind,
    ExtractionResult,
    ExtractionStatus,
};
