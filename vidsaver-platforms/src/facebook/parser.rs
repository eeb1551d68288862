//! Facebook video page parsing.

use vidsaver_core::{MediaCandidate, QualityTier};

use crate::patterns::{OG_VIDEO_TAGS, meta_content, quoted_field};

/// Inline player fields, in lookup order, with the tier each one implies.
const PLAYER_FIELDS: &[(&str, QualityTier)] = &[
    ("hd_src", QualityTier::Hd),
    ("sd_src", QualityTier::Sd),
];

/// Newer player fields, checked after the Open Graph tags.
const NATIVE_FIELDS: &[(&str, QualityTier)] = &[
    ("browser_native_hd_url", QualityTier::Hd),
    ("browser_native_sd_url", QualityTier::Sd),
];

/// Finds the video on a Facebook page; returns the pattern name with it.
pub fn extract_video(body: &str) -> Option<(&'static str, MediaCandidate)> {
    let field = |fields: &'static [(&'static str, QualityTier)]| {
        fields.iter().find_map(|(name, tier)| {
            quoted_field(body, name).map(|url| (*name, MediaCandidate::new(url).with_tier(*tier)))
        })
    };

    field(PLAYER_FIELDS)
        .or_else(|| {
            meta_content(body, OG_VIDEO_TAGS)
                .map(|url| ("og:video", MediaCandidate::new(url).with_tier(QualityTier::Standard)))
        })
        .or_else(|| field(NATIVE_FIELDS))
}
