//! Media-related types.
//!
//! - [`MediaCandidate`] - A located media URL before normalization
//! - [`VideoVariant`] - One quality variant of a video
//! - [`Resolution`] - Pixel dimensions
//! - [`select_best_variant`] - The shared "largest wins" rule

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::url::absolute_media_url;

/// Resolution string emitted when the dimensions are not known.
pub const UNKNOWN_RESOLUTION: &str = "unknown";

// ============================================================================
// Resolution
// ============================================================================

/// Pixel dimensions of a video.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Resolution {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Resolution {
    /// Creates a new resolution.
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Number of pixels (`width × height`).
    pub fn area(&self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

// ============================================================================
// Quality Tier
// ============================================================================

/// Coarse quality label attached by the scraping strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QualityTier {
    /// The best rendition the post exposes (picked from variants).
    Original,
    /// An explicitly HD source.
    Hd,
    /// An explicitly SD source.
    Sd,
    /// A single rendition of unknown tier (meta tags, plain fields).
    Standard,
}

impl QualityTier {
    /// Returns the label used in results.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Original => "original",
            Self::Hd => "hd",
            Self::Sd => "sd",
            Self::Standard => "standard",
        }
    }
}

impl fmt::Display for QualityTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Video Variant
// ============================================================================

/// One rendition of a video as listed by the platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoVariant {
    /// Direct URL of this rendition.
    pub url: String,
    /// Width in pixels, if listed.
    #[serde(default)]
    pub width: Option<u32>,
    /// Height in pixels, if listed.
    #[serde(default)]
    pub height: Option<u32>,
}

impl VideoVariant {
    /// Creates a variant with known dimensions.
    pub fn new(url: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            url: url.into(),
            width: Some(width),
            height: Some(height),
        }
    }

    /// Pixel area; missing dimensions count as zero.
    pub fn area(&self) -> u64 {
        u64::from(self.width.unwrap_or(0)) * u64::from(self.height.unwrap_or(0))
    }

    /// Returns true if the URL resolves to an absolute http(s) URL.
    pub fn has_usable_url(&self) -> bool {
        absolute_media_url(&self.url).is_some()
    }

    /// Returns the resolution if both dimensions are known and non-zero.
    pub fn resolution(&self) -> Option<Resolution> {
        match (self.width, self.height) {
            (Some(w), Some(h)) if w > 0 && h > 0 => Some(Resolution::new(w, h)),
            _ => None,
        }
    }
}

/// Picks the variant with the largest `width × height`.
///
/// Variants whose URL is not an absolute http(s) URL are skipped. Ties keep
/// the earliest variant in list order.
pub fn select_best_variant(variants: &[VideoVariant]) -> Option<&VideoVariant> {
    let mut best: Option<&VideoVariant> = None;
    for variant in variants.iter().filter(|v| v.has_usable_url()) {
        match best {
            Some(current) if variant.area() <= current.area() => {}
            _ => best = Some(variant),
        }
    }
    best
}

// ============================================================================
// Media Candidate
// ============================================================================

/// A located media URL with whatever metadata the strategy could see.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaCandidate {
    /// The media URL as found (may still need unescaping).
    pub url: String,
    /// Known dimensions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolution: Option<Resolution>,
    /// Free-text quality label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quality: Option<String>,
    /// Post or video title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Thumbnail image URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    /// Duration in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_secs: Option<u64>,
}

impl MediaCandidate {
    /// Creates a candidate with only a URL.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            resolution: None,
            quality: None,
            title: None,
            thumbnail: None,
            duration_secs: None,
        }
    }

    /// Creates a candidate from a chosen variant.
    pub fn from_variant(variant: &VideoVariant, tier: QualityTier) -> Self {
        Self::new(variant.url.clone())
            .with_resolution(variant.resolution())
            .with_tier(tier)
    }

    /// Sets the resolution.
    #[must_use]
    pub fn with_resolution(mut self, resolution: Option<Resolution>) -> Self {
        self.resolution = resolution;
        self
    }

    /// Sets a free-text quality label.
    #[must_use]
    pub fn with_quality(mut self, quality: impl Into<String>) -> Self {
        self.quality = Some(quality.into());
        self
    }

    /// Sets the quality from a tier.
    #[must_use]
    pub fn with_tier(self, tier: QualityTier) -> Self {
        self.with_quality(tier.as_str())
    }

    /// Sets the title.
    #[must_use]
    pub fn with_title(mut self, title: Option<String>) -> Self {
        self.title = title;
        self
    }

    /// Sets the thumbnail URL.
    #[must_use]
    pub fn with_thumbnail(mut self, thumbnail: Option<String>) -> Self {
        self.thumbnail = thumbnail;
        self
    }

    /// Sets the duration.
    #[must_use]
    pub fn with_duration(mut self, secs: Option<u64>) -> Self {
        self.duration_secs = secs;
        self
    }

    /// Resolution as emitted in results: `"<w>x<h>"` or `"unknown"`.
    pub fn resolution_label(&self) -> String {
        self.resolution
            .map_or_else(|| UNKNOWN_RESOLUTION.to_string(), |r| r.to_string())
    }
}

// ============================================================================
// Tests
// ============================================================================
