// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # VidSaver Fetch
//!
//! Strategy infrastructure and host APIs for VidSaver.
//!
//! ## Host APIs
//!
//! The [`host`] module provides abstractions for outbound traffic:
//!
//! - [`host::http`] - `PageFetcher` trait and the reqwest-backed client
//! - [`host::identity`] - User agent rotation
//! - [`host::fixture`] - Canned responses for offline runs
//!
//! ## Extraction Pipeline
//!
//! - [`strategy::ExtractStrategy`] - Trait for extraction methods
//! - [`pipeline::ExtractPipeline`] - Runs strategies in priority order
//! - [`context::ExtractContext`] - Provides access to host APIs and settings
//! - [`normalize`] - Shapes outcomes into `ExtractionResult`
//!
//! ## Example
//!
//! ```ignore
//! use vidsaver_fetch::{ExtractContext, ExtractPipeline, ExtractTarget};
//!
//! let ctx = ExtractContext::new();
//! let pipeline = ExtractPipeline::with_strategies(vec![
//!     Box::new(InstagramJsonStrategy::new()),
//!     Box::new(InstagramEmbedStrategy::new()),
//! ]);
//!
//! let target = ExtractTarget::new(url, Platform::Instagram);
//! let outcome = pipeline.execute(&ctx, &target).await;
//! println!("{:?}", outcome.extraction_result());
//! ```

pub mod context;
pub mod error;
pub mod host;
pub mod normalize;
pub mod pipeline;
pub mod strategy;

// Errors
pub use error::{ExtractError, HttpError};

// Host APIs
pub use host::{
    fixture::FixtureFetcher,
    http::{FetchedPage, HttpClient, PageFetcher, PageRequest},
    identity::{ClientIdentity, DeviceClass, IdentityPool},
};

// Strategy & Pipeline
pub use context::{DEFAULT_RAPIDAPI_HOST, ExtractContext, ExtractContextBuilder, ExtractSettings};
pub use normalize::{finalize_candidate, to_extraction_result};
pub use pipeline::{ExtractAttempt, ExtractOutcome, ExtractPipeline};
pub use strategy::{ExtractStrategy, ExtractTarget, ExtractedMedia, StrategyInfo, StrategyKind};
