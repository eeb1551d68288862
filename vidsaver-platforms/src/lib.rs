// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # `VidSaver` Platforms
//!
//! Platform-specific extraction for `VidSaver`.
//!
//! Each platform module includes:
//!
//! - **Descriptor**: hosts, CLI names and the fetch plan
//! - **Strategies**: [`ExtractStrategy`](vidsaver_fetch::ExtractStrategy) implementations
//! - **Parser**: pure functions over page bodies and JSON payloads
//!
//! ## Supported Platforms
//!
//! | Platform | Strategies, in order |
//! |----------|----------------------|
//! | Instagram | `instagram.json`, `instagram.embed`, `instagram.page` |
//! | Facebook | `facebook.page` |
//! | YouTube | `youtube.api` |
//!
//! ## Usage
//!
//! ```ignore
//! use vidsaver_fetch::ExtractContext;
//! use vidsaver_platforms::VideoExtractor;
//!
//! let extractor = VideoExtractor::new(ExtractContext::new());
//! let result = extractor.extract("https://www.instagram.com/reel/Cxyz123/").await;
//! println!("{}", serde_json::to_string_pretty(&result)?);
//! ```

pub mod descriptor;
pub mod extractor;
pub mod patterns;
pub mod registry;
pub mod response;

// Platform modules (alphabetical)
pub mod facebook;
pub mod instagram;
pub mod youtube;

// Re-export key types
pub use descriptor::{CliConfig, FetchPlan, PlatformDescriptor};
pub use extractor::VideoExtractor;
pub use registry::PlatformRegistry;

// Re-export platform descriptors
pub use facebook::facebook_descriptor;
pub use instagram::instagram_descriptor;
pub use youtube::youtube_descriptor;

// Re-export strategy types for convenience
pub use facebook::FacebookPageStrategy;
pub use instagram::{InstagramEmbedStrategy, InstagramJsonStrategy, InstagramPageStrategy};
pub use youtube::{RapidApiClient, VideoApiError, VideoDetailsApi, YouTubeApiStrategy};
