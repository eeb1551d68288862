//! Result normalization.
//!
//! Turns a strategy's raw candidate into something safe to hand out, and the
//! pipeline's final outcome into the canonical [`ExtractionResult`].

use vidsaver_core::ExtractionResult;
use vidsaver_core::MediaCandidate;
use vidsaver_core::url::absolute_media_url;

use crate::error::ExtractError;
use crate::strategy::ExtractedMedia;

/// Unescapes the candidate URL and makes it absolute.
///
/// # Errors
///
/// Returns [`ExtractError::InvalidResponse`] if the URL cannot be turned into
/// an absolute http(s) URL. The strategy that produced it counts as failed.
pub fn finalize_candidate(mut candidate: MediaCandidate) -> Result<MediaCandidate, ExtractError> {
    candidate.url = absolute_media_url(&candidate.url).ok_or_else(|| {
        ExtractError::InvalidResponse(format!(
            "not an absolute http(s) media URL: {}",
            candidate.url
        ))
    })?;
    // Thumbnails are decoration; an unusable one is dropped rather than fatal.
    candidate.thumbnail = candidate
        .thumbnail
        .as_deref()
        .and_then(absolute_media_url);
    Ok(candidate)
}

/// Shapes the pipeline's final result into the canonical record.
pub fn to_extraction_result(result: &Result<ExtractedMedia, ExtractError>) -> ExtractionResult {
    match result {
        Ok(media) => ExtractionResult::success(media.candidate.clone(), &media.strategy_id),
        Err(error) => ExtractionResult::failure(error.kind(), error.to_string()),
    }
}

// ============================================================================
// Tests
// ============================================================================
