//! Video details response parsing.
//!
//! The details service is loose about its shapes: `videos` is either a list
//! or `{ "items": [...] }`, `thumbnail` an object or a list, and
//! `lengthSeconds` a number or a string. The untagged enums below accept
//! each form.

use serde::Deserialize;
use serde_json::Value;
use vidsaver_core::{MediaCandidate, Resolution};
use vidsaver_fetch::ExtractError;

// ============================================================================
// Response Types
// ============================================================================

/// Response from the video details endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawApiResponse {
    /// `false` when the video is missing or unavailable.
    #[serde(default)]
    pub status: Option<Value>,
    /// Error code accompanying a `false` status.
    #[serde(default)]
    pub error_id: Option<String>,
    /// Video title.
    #[serde(default)]
    pub title: Option<String>,
    /// Thumbnail image(s).
    #[serde(default)]
    pub thumbnail: Option<Thumbnail>,
    /// Duration in seconds.
    #[serde(default)]
    pub length_seconds: Option<Seconds>,
    /// Downloadable video streams.
    #[serde(default)]
    pub videos: Option<VideoList>,
}

/// `videos` in either of its forms.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum VideoList {
    /// `{ "items": [...] }`
    Wrapped {
        /// The streams.
        #[serde(default)]
        items: Vec<ApiVideo>,
    },
    /// A bare list.
    Plain(Vec<ApiVideo>),
}

/// `thumbnail` in either of its forms.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Thumbnail {
    /// A single image.
    Single(ThumbnailRef),
    /// Several sizes.
    List(Vec<ThumbnailRef>),
}

/// One thumbnail image.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ThumbnailRef {
    /// Image URL.
    #[serde(default)]
    pub url: Option<String>,
    /// Width in pixels.
    #[serde(default)]
    pub width: Option<u32>,
}

/// `lengthSeconds` as a number or a numeric string.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Seconds {
    /// `123`
    Number(u64),
    /// `"123"`
    Text(String),
}

impl Seconds {
    /// The value, if it is a whole number.
    pub fn as_secs(&self) -> Option<u64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(s) => s.trim().parse().ok(),
        }
    }
}

/// One downloadable stream.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiVideo {
    /// Direct URL.
    #[serde(default)]
    pub url: Option<String>,
    /// Label such as `"720p"`.
    #[serde(default)]
    pub quality: Option<String>,
    /// Width in pixels.
    #[serde(default)]
    pub width: Option<u32>,
    /// Height in pixels.
    #[serde(default)]
    pub height: Option<u32>,
    /// Container, e.g. `"mp4"`.
    #[serde(default)]
    pub extension: Option<String>,
    /// Whether audio is muxed in.
    #[serde(default)]
    pub has_audio: bool,
}

impl ApiVideo {
    fn is_mp4(&self) -> bool {
        self.extension
            .as_deref()
            .is_some_and(|e| e.eq_ignore_ascii_case("mp4"))
    }

    fn usable_url(&self) -> Option<&str> {
        self.url.as_deref().map(str::trim).filter(|u| !u.is_empty())
    }

    fn quality_label(&self) -> Option<String> {
        self.quality
            .as_deref()
            .map(str::trim)
            .filter(|q| !q.is_empty())
            .map(str::to_string)
            .or_else(|| self.height.map(|h| format!("{h}p")))
    }
}

// ============================================================================
// Interpretation
// ============================================================================

impl RawApiResponse {
    /// Returns true if the service flagged the video as unavailable.
    pub fn is_unavailable(&self) -> bool {
        matches!(self.status, Some(Value::Bool(false)))
    }

    /// The stream list, whichever form it came in.
    pub fn videos(&self) -> &[ApiVideo] {
        match &self.videos {
            Some(VideoList::Wrapped { items }) => items,
            Some(VideoList::Plain(items)) => items,
            None => &[],
        }
    }

    /// Best thumbnail URL: the widest one for a list.
    pub fn thumbnail_url(&self) -> Option<String> {
        let chosen = match self.thumbnail.as_ref()? {
            Thumbnail::Single(t) => Some(t),
            Thumbnail::List(list) => list
                .iter()
                .filter(|t| t.url.is_some())
                .max_by_key(|t| t.width.unwrap_or(0)),
        };
        chosen.and_then(|t| t.url.clone())
    }

    /// Converts the response into a media candidate.
    ///
    /// # Errors
    ///
    /// `NoVideoFound` when there are no streams or the chosen one has no URL.
    pub fn to_candidate(&self) -> Result<MediaCandidate, ExtractError> {
        let videos = self.videos();
        let chosen = select_video(videos).ok_or_else(|| {
            ExtractError::NoVideoFound("API returned no videos".to_string())
        })?;
        let url = chosen.usable_url().ok_or_else(|| {
            ExtractError::NoVideoFound("No downloadable video found".to_string())
        })?;

        let resolution = match (chosen.width, chosen.height) {
            (Some(w), Some(h)) => Some(Resolution::new(w, h)),
            _ => None,
        };
        let mut candidate = MediaCandidate::new(url)
            .with_resolution(resolution)
            .with_title(self.title.clone().filter(|t| !t.trim().is_empty()))
            .with_thumbnail(self.thumbnail_url())
            .with_duration(self.length_seconds.as_ref().and_then(Seconds::as_secs));
        if let Some(label) = chosen.quality_label() {
            candidate = candidate.with_quality(label);
        }
        Ok(candidate)
    }
}

/// Picks the stream to return.
///
/// MP4 with audio, then any MP4, then anything with a URL, then the first
/// entry. The last fallback may lack a URL; the caller rejects that.
pub fn select_video(videos: &[ApiVideo]) -> Option<&ApiVideo> {
    videos
        .iter()
        .find(|v| v.is_mp4() && v.has_audio && v.usable_url().is_some())
        .or_else(|| videos.iter().find(|v| v.is_mp4() && v.usable_url().is_some()))
        .or_else(|| videos.iter().find(|v| v.usable_url().is_some()))
        .or_else(|| videos.first())
}

// ============================================================================
// Tests
// ============================================================================
