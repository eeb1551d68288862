//! YouTube platform implementation.
//!
//! No scraping: the video id is parsed from the URL and resolved through a
//! [`VideoDetailsApi`].

mod api;
mod descriptor;
mod error;
mod parser;
mod strategies;
mod video_id;

pub use api::{RapidApiClient, VideoDetailsApi};
pub use descriptor::youtube_descriptor;
pub use error::VideoApiError;
pub use parser::{ApiVideo, RawApiResponse, Seconds, Thumbnail, ThumbnailRef, VideoList, select_video};
pub use strategies::YouTubeApiStrategy;
pub use video_id::parse_video_id;
