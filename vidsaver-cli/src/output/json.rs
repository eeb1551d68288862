//! JSON output formatting.

use anyhow::Result;
use serde::Serialize;
use vidsaver_core::{ErrorKind, ExtractionResult};
use vidsaver_fetch::{ExtractAttempt, StrategyInfo};
use vidsaver_platforms::PlatformDescriptor;
use vidsaver_store::Config;

use crate::commands::extract::ExtractReport;

// ============================================================================
// Output Types
// ============================================================================

/// JSON output for one URL.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractOutput<'a> {
    pub url: &'a str,
    #[serde(flatten)]
    pub result: &'a ExtractionResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attempts: Option<Vec<AttemptOutput>>,
}

/// One strategy attempt.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttemptOutput {
    pub strategy: String,
    pub kind: String,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<ErrorKind>,
    pub duration_ms: u64,
}

impl From<&ExtractAttempt> for AttemptOutput {
    fn from(attempt: &ExtractAttempt) -> Self {
        Self {
            strategy: attempt.strategy_id.clone(),
            kind: attempt.kind.to_string(),
            success: attempt.success,
            error: attempt.error.clone(),
            error_kind: attempt.error_kind,
            duration_ms: u64::try_from(attempt.duration.as_millis()).unwrap_or(u64::MAX),
        }
    }
}

/// Platform info output.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformOutput {
    pub display_name: String,
    pub cli_name: String,
    pub aliases: Vec<String>,
    pub hosts: Vec<String>,
    pub strategies: Vec<StrategyOutput>,
}

/// Strategy info output.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StrategyOutput {
    pub id: String,
    pub kind: String,
    pub priority: u32,
    pub timeout_secs: u64,
}

/// Effective configuration, key redacted.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigOutput<'a> {
    pub json_probe_secs: u64,
    pub embed_secs: u64,
    pub page_secs: u64,
    pub api_secs: u64,
    pub rapidapi_key: Option<&'static str>,
    pub rapidapi_host: &'a str,
    pub debug_log_body: bool,
    pub log_level: &'a str,
    pub restrict_hosts: bool,
}

impl<'a> From<&'a Config> for ConfigOutput<'a> {
    fn from(config: &'a Config) -> Self {
        Self {
            json_probe_secs: config.json_probe_secs,
            embed_secs: config.embed_secs,
            page_secs: config.page_secs,
            api_secs: config.api_secs,
            rapidapi_key: config.has_api_key().then_some("<redacted>"),
            rapidapi_host: &config.rapidapi_host,
            debug_log_body: config.debug_log_body,
            log_level: &config.log_level,
            restrict_hosts: config.restrict_hosts,
        }
    }
}

// ============================================================================
// JSON Formatter
// ============================================================================

/// JSON formatter.
pub struct JsonFormatter {
    pretty: bool,
}

impl JsonFormatter {
    /// Creates a new JSON formatter.
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }

    /// Formats any serializable value.
    pub fn format<T: Serialize>(&self, data: &T) -> Result<String> {
        let json = if self.pretty {
            serde_json::to_string_pretty(data)?
        } else {
            serde_json::to_string(data)?
        };
        Ok(json)
    }

    /// Formats extraction reports: a single object for one URL, else an array.
    pub fn format_reports(&self, reports: &[ExtractReport], with_attempts: bool) -> Result<String> {
        let outputs: Vec<ExtractOutput<'_>> = reports
            .iter()
            .map(|report| ExtractOutput {
                url: &report.url,
                result: &report.result,
                attempts: with_attempts
                    .then(|| report.attempts.iter().map(AttemptOutput::from).collect()),
            })
            .collect();

        if outputs.len() == 1 {
            self.format(&outputs[0])
        } else {
            self.format(&outputs)
        }
    }

    /// Formats the platform list.
    pub fn format_platforms(
        &self,
        platforms: &[(&PlatformDescriptor, Vec<StrategyInfo>)],
    ) -> Result<String> {
        let outputs: Vec<PlatformOutput> = platforms
            .iter()
            .map(|(desc, strategies)| PlatformOutput {
                display_name: desc.display_name().to_string(),
                cli_name: desc.cli_name().to_string(),
                aliases: desc.cli.aliases.iter().map(ToString::to_string).collect(),
                hosts: desc.hosts.iter().map(ToString::to_string).collect(),
                strategies: strategies
                    .iter()
                    .map(|s| StrategyOutput {
                        id: s.id.clone(),
                        kind: s.kind.to_string(),
                        priority: s.priority,
                        timeout_secs: s.timeout_secs,
                    })
                    .collect(),
            })
            .collect();
        self.format(&outputs)
    }

    /// Formats the effective configuration.
    pub fn format_config(&self, config: &Config) -> Result<String> {
        self.format(&ConfigOutput::from(config))
    }
}
