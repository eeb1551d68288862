//! Platform-related types.
//!
//! - [`Platform`] - Enum of supported source platforms
//! - [`ExtractionRequest`] - A raw URL together with its platform

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::url::host_matches;

// ============================================================================
// Platform
// ============================================================================

/// Supported source platforms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    /// Instagram posts and reels.
    Instagram,
    /// Facebook videos and `fb.watch` links.
    Facebook,
    /// YouTube videos and shorts.
    YouTube,
}

impl Platform {
    /// Returns the display name for this platform.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Instagram => "Instagram",
            Self::Facebook => "Facebook",
            Self::YouTube => "YouTube",
        }
    }

    /// Returns all supported platforms.
    pub fn all() -> &'static [Platform] {
        &[Self::Instagram, Self::Facebook, Self::YouTube]
    }

    /// Returns the CLI name for this platform (lowercase, no spaces).
    pub fn cli_name(&self) -> &'static str {
        match self {
            Self::Instagram => "instagram",
            Self::Facebook => "facebook",
            Self::YouTube => "youtube",
        }
    }

    /// Short aliases accepted on the command line.
    pub fn aliases(&self) -> &'static [&'static str] {
        match self {
            Self::Instagram => &["ig", "insta"],
            Self::Facebook => &["fb"],
            Self::YouTube => &["yt"],
        }
    }

    /// Hosts served by this platform. Subdomains match too.
    pub fn hosts(&self) -> &'static [&'static str] {
        match self {
            Self::Instagram => &["instagram.com", "instagr.am"],
            Self::Facebook => &["facebook.com", "fb.watch", "fb.com"],
            Self::YouTube => &["youtube.com", "youtu.be", "yt.be"],
        }
    }

    /// Returns true if `host` belongs to this platform.
    pub fn owns_host(&self, host: &str) -> bool {
        self.hosts().iter().any(|domain| host_matches(host, domain))
    }

    /// Detects the platform from a post URL.
    ///
    /// Unparsable input falls back to a substring check, so that a sloppy
    /// paste like `instagram.com/reel/abc` still routes somewhere useful.
    pub fn from_url(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if let Some(host) = ::url::Url::parse(trimmed)
            .ok()
            .and_then(|u| u.host_str().map(str::to_ascii_lowercase))
        {
            return Self::all().iter().copied().find(|p| p.owns_host(&host));
        }

        let lowered = trimmed.to_ascii_lowercase();
        Self::all()
            .iter()
            .copied()
            .find(|p| p.hosts().iter().any(|domain| lowered.contains(domain)))
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl FromStr for Platform {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::all()
            .iter()
            .copied()
            .find(|p| p.cli_name() == wanted || p.aliases().contains(&wanted.as_str()))
            .ok_or_else(|| CoreError::UnknownPlatform(s.to_string()))
    }
}

// ============================================================================
// Extraction Request
// ============================================================================

/// A request to extract the video behind a post URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionRequest {
    /// The URL exactly as the user supplied it.
    pub raw_url: String,
    /// Platform whose strategies should run.
    pub platform: Platform,
}

impl ExtractionRequest {
    /// Creates a request for an explicit platform.
    pub fn new(raw_url: impl Into<String>, platform: Platform) -> Self {
        Self {
            raw_url: raw_url.into(),
            platform,
        }
    }

    /// Creates a request, detecting the platform from the URL host.
    pub fn detect(raw_url: impl Into<String>) -> Result<Self, CoreError> {
        let raw_url = raw_url.into();
        let platform =
            Platform::from_url(&raw_url).ok_or_else(|| CoreError::InvalidUrl(raw_url.clone()))?;
        Ok(Self { raw_url, platform })
    }
}

// ============================================================================
// Tests
// ============================================================================
