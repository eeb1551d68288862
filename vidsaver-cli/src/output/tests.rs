//! CLI output formatting tests.
//!
//! These tests verify that extraction reports render correctly in both
//! text and JSON output modes.

use std::time::Duration;

use vidsaver_core::{ErrorKind, ExtractionResult, MediaCandidate, Platform, Resolution};
use vidsaver_fetch::{ExtractAttempt, ExtractError, StrategyInfo, StrategyKind};
use vidsaver_platforms::{PlatformDescriptor, PlatformRegistry};

use crate::commands::extract::ExtractReport;

fn success_report() -> ExtractReport {
    let candidate = MediaCandidate {
        resolution: Some(Resolution::new(1080, 1920)),
        quality: Some("hd".to_string()),
        duration_secs: Some(75),
        ..MediaCandidate::new("https://scontent.cdninstagram.com/v/reel.mp4")
    };
    ExtractReport {
        url: "https://www.instagram.com/reel/Cxyz123/".to_string(),
        platform: Some(Platform::Instagram),
        result: ExtractionResult::success(candidate, "instagram.embed"),
        attempts: vec![
            ExtractAttempt::failure(
                "instagram.json",
                StrategyKind::JsonEndpoint,
                &ExtractError::NotApplicable("html".to_string()),
                Duration::from_millis(120),
            ),
            ExtractAttempt::success(
                "instagram.embed",
                StrategyKind::EmbedPage,
                "https://scontent.cdninstagram.com/v/reel.mp4",
                Duration::from_millis(340),
            ),
        ],
    }
}

fn failure_report() -> ExtractReport {
    ExtractReport {
        url: "https://www.facebook.com/watch?v=42".to_string(),
        platform: Some(Platform::Facebook),
        result: ExtractionResult::failure(
            ErrorKind::UpstreamBlocked,
            "Server blocked (login page). Try again later.",
        ),
        attempts: vec![ExtractAttempt::failure(
            "facebook.page",
            StrategyKind::HtmlPage,
            &ExtractError::Blocked("login wall".to_string()),
            Duration::from_millis(900),
        )],
    }
}

fn instagram_listing() -> Vec<(&'static PlatformDescriptor, Vec<StrategyInfo>)> {
    let desc = PlatformRegistry::get(Platform::Instagram).unwrap();
    let info = |id: &str, kind: StrategyKind, timeout_secs| StrategyInfo {
        id: id.to_string(),
        kind,
        priority: kind.default_priority(),
        timeout_secs,
    };
    vec![(
        desc,
        vec![
            info("instagram.json", StrategyKind::JsonEndpoint, 5),
            info("instagram.page", StrategyKind::HtmlPage, 30),
        ],
    )]
}

mod text_formatter_tests {
    use super::*;
    use crate::output::TextFormatter;

    #[test]
    fn test_success_report_plain() {
        let out = TextFormatter::new(false).format_report(&success_report(), false);

        assert!(out.starts_with("https://www.instagram.com/reel/Cxyz123/ (Instagram)"));
        assert!(out.contains("✓ https://scontent.cdninstagram.com/v/reel.mp4"));
        assert!(out.contains("quality hd"));
        assert!(out.contains("resolution 1080x1920"));
        assert!(out.contains("via instagram.embed"));
        assert!(out.contains("Duration: 1:15"));
        assert!(!out.contains("Attempts"));
        assert!(!out.contains('\x1b'));
    }

    #[test]
    fn test_failure_report_shows_kind_and_message() {
        let out = TextFormatter::new(false).format_report(&failure_report(), false);
        assert!(out.contains("✗ UpstreamBlocked: Server blocked (login page). Try again later."));
    }

    #[test]
    fn test_attempts_are_listed_in_order() {
        let out = TextFormatter::new(false).format_report(&success_report(), true);

        let json_pos = out.find("instagram.json").unwrap();
        let embed_pos = out.rfind("instagram.embed").unwrap();
        assert!(out.contains("Attempts"));
        assert!(json_pos < embed_pos);
        assert!(out.contains("120ms"));
    }

    #[test]
    fn test_platform_listing_numbers_strategies() {
        let out = TextFormatter::new(false).format_platforms(&instagram_listing());

        assert!(out.starts_with("Instagram (instagram"));
        assert!(out.contains("Hosts: instagram.com"));
        assert!(out.contains("1. instagram.json"));
        assert!(out.contains("2. instagram.page"));
        assert!(out.contains("30s"));
    }

    #[test]
    fn test_colors_when_enabled() {
        let out = TextFormatter::new(true).format_report(&failure_report(), false);
        assert!(out.contains("\x1b[31m"));
    }
}

mod json_formatter_tests {
    use super::*;
    use crate::output::JsonFormatter;

    #[test]
    fn test_single_report_is_an_object() {
        let json = JsonFormatter::new(false)
            .format_reports(&[success_report()], false)
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert!(value.is_object());
        assert_eq!(value["url"], "https://www.instagram.com/reel/Cxyz123/");
        assert_eq!(value["status"], "success");
        assert_eq!(value["videoUrl"], "https://scontent.cdninstagram.com/v/reel.mp4");
        assert_eq!(value["resolution"], "1080x1920");
        assert_eq!(value["sourceStrategy"], "instagram.embed");
        assert!(value.get("attempts").is_none());
        assert!(value.get("errorKind").is_none());
    }

    #[test]
    fn test_many_reports_are_an_array() {
        let json = JsonFormatter::new(false)
            .format_reports(&[success_report(), failure_report()], false)
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        let items = value.as_array().unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[1]["status"], "error");
        assert_eq!(items[1]["errorKind"], "UpstreamBlocked");
        assert!(items[1].get("videoUrl").is_none());
    }

    #[test]
    fn test_attempts_carry_duration_and_kind() {
        let json = JsonFormatter::new(false)
            .format_reports(&[failure_report()], true)
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        let attempt = &value["attempts"][0];
        assert_eq!(attempt["strategy"], "facebook.page");
        assert_eq!(attempt["kind"], "HTML Page");
        assert_eq!(attempt["success"], false);
        assert_eq!(attempt["errorKind"], "UpstreamBlocked");
        assert_eq!(attempt["durationMs"], 900);
    }

    #[test]
    fn test_platform_listing_fields() {
        let json = JsonFormatter::new(false)
            .format_platforms(&instagram_listing())
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        let platform = &value[0];
        assert_eq!(platform["displayName"], "Instagram");
        assert_eq!(platform["cliName"], "instagram");
        let strategy = &platform["strategies"][0];
        assert_eq!(strategy["id"], "instagram.json");
        assert_eq!(strategy["kind"], "JSON Endpoint");
        assert_eq!(strategy["priority"], 100);
        assert_eq!(strategy["timeoutSecs"], 5);
        assert!(strategy.get("available").is_none());
    }

    #[test]
    fn test_config_output_redacts_key() {
        let config = vidsaver_store::Config {
            rapidapi_key: Some("super-secret".to_string()),
            ..vidsaver_store::Config::default()
        };
        let json = JsonFormatter::new(true).format_config(&config).unwrap();

        assert!(!json.contains("super-secret"));
        assert!(json.contains("<redacted>"));
        assert!(json.contains("\"pageSecs\": 30"));
    }

    #[test]
    fn test_pretty_output_is_indented() {
        let json = JsonFormatter::new(true)
            .format_reports(&[failure_report()], false)
            .unwrap();
        assert!(json.contains("\n  \"url\""));
    }
}
