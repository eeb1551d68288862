//! Instagram post JSON parsing.
//!
//! Instagram has served post data in several shapes over the years. The
//! known ones are modelled explicitly and probed in a fixed order.

use serde::Deserialize;
use serde_json::Value;
use vidsaver_core::{
    MediaCandidate, QualityTier, Resolution, VideoVariant, select_best_variant,
};
use vidsaver_fetch::ExtractError;

/// `media_type` value for videos in the items shape.
const MEDIA_TYPE_VIDEO: u8 = 2;

// ============================================================================
// Raw Shapes
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
struct Dimensions {
    #[serde(default)]
    width: Option<u32>,
    #[serde(default)]
    height: Option<u32>,
}

/// A post's media object, common to all shapes.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MediaNode {
    #[serde(default)]
    is_video: Option<bool>,
    #[serde(default)]
    media_type: Option<u8>,
    #[serde(default)]
    video_url: Option<String>,
    #[serde(default)]
    video_versions: Vec<VideoVariant>,
    #[serde(default)]
    dimensions: Option<Dimensions>,
    #[serde(default)]
    original_width: Option<u32>,
    #[serde(default)]
    original_height: Option<u32>,
    #[serde(default)]
    display_url: Option<String>,
    #[serde(default)]
    video_duration: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct GraphQlEnvelope {
    graphql: GraphQlBody,
}

#[derive(Debug, Deserialize)]
struct GraphQlBody {
    shortcode_media: MediaNode,
}

#[derive(Debug, Deserialize)]
struct ItemsEnvelope {
    items: Vec<MediaNode>,
}

// ============================================================================
// Post Payload
// ============================================================================

/// A recognized post payload.
#[derive(Debug, Clone)]
pub enum PostPayload {
    /// `{"graphql": {"shortcode_media": {...}}}`
    GraphQl(MediaNode),
    /// `{"items": [{...}]}`
    Items(MediaNode),
}

impl PostPayload {
    /// Resolves a JSON value against the known shapes: GraphQL, then items.
    pub fn from_value(value: &Value) -> Option<Self> {
        if let Ok(envelope) = GraphQlEnvelope::deserialize(value) {
            return Some(Self::GraphQl(envelope.graphql.shortcode_media));
        }
        if let Ok(envelope) = ItemsEnvelope::deserialize(value) {
            return envelope.items.into_iter().next().map(Self::Items);
        }
        None
    }

    /// Resolves a `window._sharedData` blob: `entry_data.PostPage[0]` holds
    /// one of the regular shapes.
    pub fn from_shared_data(value: &Value) -> Option<Self> {
        value
            .pointer("/entry_data/PostPage/0")
            .and_then(Self::from_value)
            .or_else(|| Self::from_value(value))
    }

    /// The media object.
    pub fn media(&self) -> &MediaNode {
        match self {
            Self::GraphQl(media) | Self::Items(media) => media,
        }
    }

    /// Returns true if the post is a video.
    ///
    /// The items shape may omit `is_video`; `media_type` decides then.
    pub fn is_video(&self) -> bool {
        let media = self.media();
        match self {
            Self::GraphQl(_) => media.is_video.unwrap_or(false),
            Self::Items(_) => media
                .is_video
                .unwrap_or(media.media_type == Some(MEDIA_TYPE_VIDEO)),
        }
    }

    /// Picks the best rendition of the post's video.
    ///
    /// # Errors
    ///
    /// Returns [`ExtractError::NoVideoFound`] when the post is not a video or
    /// lists no playable URL.
    pub fn to_candidate(&self) -> Result<MediaCandidate, ExtractError> {
        if !self.is_video() {
            return Err(ExtractError::NoVideoFound("post is not a video".to_string()));
        }
        self.media().to_candidate()
    }
}

impl MediaNode {
    fn declared_resolution(&self) -> Option<Resolution> {
        let (w, h) = match &self.dimensions {
            Some(d) => (d.width, d.height),
            None => (self.original_width, self.original_height),
        };
        match (w, h) {
            (Some(w), Some(h)) if w > 0 && h > 0 => Some(Resolution::new(w, h)),
            _ => None,
        }
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn duration_secs(&self) -> Option<u64> {
        self.video_duration
            .filter(|d| d.is_finite() && *d >= 0.0)
            .map(|d| d.round() as u64)
    }

    fn to_candidate(&self) -> Result<MediaCandidate, ExtractError> {
        let candidate = if let Some(best) = select_best_variant(&self.video_versions) {
            MediaCandidate::from_variant(best, QualityTier::Original)
        } else if let Some(url) = self.video_url.as_deref().filter(|u| !u.is_empty()) {
            MediaCandidate::new(url)
                .with_resolution(self.declared_resolution())
                .with_tier(QualityTier::Original)
        } else {
            return Err(ExtractError::NoVideoFound(
                "video post without a playable URL".to_string(),
            ));
        };

        Ok(candidate
            .with_thumbnail(self.display_url.clone())
            .with_duration(self.duration_secs()))
    }
}

// ============================================================================
// Entry Points
// ============================================================================

/// Parses the structured endpoint's body.
///
/// # Errors
///
/// - `Json` if the body is not JSON
/// - `NotApplicable` if the JSON matches no known shape
/// - `NoVideoFound` if the post is not a video
pub fn parse_post_json(body: &str) -> Result<MediaCandidate, ExtractError> {
    let value: Value = serde_json::from_str(body)?;
    PostPayload::from_value(&value)
        .ok_or_else(|| ExtractError::NotApplicable("unrecognized JSON shape".to_string()))?
        .to_candidate()
}

/// Parses a `video_versions` array and picks the largest rendition.
pub fn best_of_versions(array_json: &str) -> Option<MediaCandidate> {
    let variants: Vec<VideoVariant> = serde_json::from_str(array_json).ok()?;
    select_best_variant(&variants).map(|v| MediaCandidate::from_variant(v, QualityTier::Original))
}

// ============================================================================
// Tests
// ============================================================================
