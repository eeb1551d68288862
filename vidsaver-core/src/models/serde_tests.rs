//! Serde serialization/deserialization tests for core types.
//!
//! The canonical result is consumed by outer layers as JSON, so the wire
//! names matter as much as the values.

use serde_json::{Value, json};

use crate::{
    ErrorKind, ExtractionRequest, ExtractionResult, ExtractionStatus, MediaCandidate, Platform,
    QualityTier, Resolution, VideoVariant,
};

// ============================================================================
// Platform Serde Tests
// ============================================================================

#[test]
fn test_platform_serde_roundtrip_all_variants() {
    for platform in Platform::all() {
        let json = serde_json::to_string(platform).unwrap();
        let back: Platform = serde_json::from_str(&json).unwrap();
        assert_eq!(*platform, back, "Round-trip failed for {platform:?}");
    }
}

#[test]
fn test_platform_lowercase_names() {
    assert_eq!(serde_json::to_string(&Platform::YouTube).unwrap(), r#""youtube""#);
    assert_eq!(serde_json::to_string(&Platform::Instagram).unwrap(), r#""instagram""#);
    assert!(serde_json::from_str::<Platform>(r#""tiktok""#).is_err());
}

#[test]
fn test_request_camel_case() {
    let req = ExtractionRequest::new("https://fb.watch/x/", Platform::Facebook);
    let value = serde_json::to_value(&req).unwrap();
    assert_eq!(value, json!({"rawUrl": "https://fb.watch/x/", "platform": "facebook"}));
}

// ============================================================================
// Result Serde Tests
// ============================================================================

#[test]
fn test_success_wire_shape() {
    let candidate = MediaCandidate::new("https://scontent.cdninstagram.com/v/a.mp4")
        .with_resolution(Some(Resolution::new(1080, 1920)))
        .with_tier(QualityTier::Original);
    let value = serde_json::to_value(ExtractionResult::success(candidate, "instagram.json")).unwrap();

    assert_eq!(
        value,
        json!({
            "status": "success",
            "videoUrl": "https://scontent.cdninstagram.com/v/a.mp4",
            "resolution": "1080x1920",
            "quality": "original",
            "sourceStrategy": "instagram.json"
        })
    );
}

#[test]
fn test_error_wire_shape() {
    let result = ExtractionResult::failure(ErrorKind::UpstreamBlocked, "Server blocked");
    let value = serde_json::to_value(&result).unwrap();

    assert_eq!(value["status"], Value::from("error"));
    assert_eq!(value["errorKind"], Value::from("UpstreamBlocked"));
    assert_eq!(value["errorMessage"], Value::from("Server blocked"));
    assert!(value.get("videoUrl").is_none());
}

#[test]
fn test_result_roundtrip_keeps_metadata() {
    let candidate = MediaCandidate::new("https://rr1.googlevideo.com/videoplayback?id=1")
        .with_quality("720p")
        .with_title(Some("A short".to_string()))
        .with_thumbnail(Some("https://i.ytimg.com/vi/abc/hq.jpg".to_string()))
        .with_duration(Some(42));
    let original = ExtractionResult::success(candidate, "youtube.api");

    let json = serde_json::to_string(&original).unwrap();
    let back: ExtractionResult = serde_json::from_str(&json).unwrap();
    assert_eq!(back, original);
    assert_eq!(back.status, ExtractionStatus::Success);
    assert_eq!(back.duration_secs, Some(42));
}

#[test]
fn test_error_kind_names() {
    for (kind, name) in [
        (ErrorKind::NotFound, "NotFound"),
        (ErrorKind::AccessDenied, "AccessDenied"),
        (ErrorKind::Timeout, "Timeout"),
        (ErrorKind::UpstreamBlocked, "UpstreamBlocked"),
        (ErrorKind::NoVideoFound, "NoVideoFound"),
        (ErrorKind::ConfigError, "ConfigError"),
    ] {
        assert_eq!(serde_json::to_value(kind).unwrap(), Value::from(name));
        assert_eq!(kind.to_string(), name);
    }
}

// ============================================================================
// Media Serde Tests
// ============================================================================

#[test]
fn test_variant_missing_dimensions_default() {
    let v: VideoVariant = serde_json::from_str(r#"{"url": "https://x.fbcdn.net/a.mp4"}"#).unwrap();
    assert_eq!(v.width, None);
    assert_eq!(v.area(), 0);
}
