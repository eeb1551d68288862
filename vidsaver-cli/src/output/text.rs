//! Text output formatting with colors.

use vidsaver_fetch::{ExtractAttempt, StrategyInfo};
use vidsaver_platforms::PlatformDescriptor;
use vidsaver_store::Config;

use crate::commands::extract::ExtractReport;

// ============================================================================
// ANSI Colors
// ============================================================================

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const RED: &str = "\x1b[31m";
const CYAN: &str = "\x1b[36m";

/// Text formatter with optional colors.
pub struct TextFormatter {
    use_colors: bool,
}

impl TextFormatter {
    /// Creates a new text formatter.
    pub fn new(use_colors: bool) -> Self {
        Self { use_colors }
    }

    /// Formats the outcome for one URL.
    pub fn format_report(&self, report: &ExtractReport, with_attempts: bool) -> String {
        let mut lines = Vec::new();
        let result = &report.result;

        let platform = report.platform.map_or("Unknown", |p| p.display_name());
        lines.push(format!("{} ({})", self.bold(&report.url), self.dim(platform)));

        if let Some(video_url) = &result.video_url {
            lines.push(format!("  {} {}", self.green("✓"), self.cyan(video_url)));

            let mut details = Vec::new();
            if let Some(quality) = &result.quality {
                details.push(format!("quality {quality}"));
            }
            if let Some(resolution) = &result.resolution {
                details.push(format!("resolution {resolution}"));
            }
            if let Some(strategy) = &result.source_strategy {
                details.push(format!("via {strategy}"));
            }
            if !details.is_empty() {
                lines.push(format!("    {}", self.dim(&details.join(" · "))));
            }
            if let Some(title) = &result.title {
                lines.push(format!("    Title: {title}"));
            }
            if let Some(secs) = result.duration_secs {
                lines.push(format!("    Duration: {}", format_duration(secs)));
            }
        } else {
            let kind = result.error_kind.map_or("Error", |k| k.as_str());
            let message = result.error_message.as_deref().unwrap_or("No video found");
            lines.push(format!("  {} {}: {}", self.red("✗"), self.red(kind), message));
        }

        if with_attempts && !report.attempts.is_empty() {
            lines.push(format!("  {}", self.bold("Attempts")));
            for attempt in &report.attempts {
                lines.push(self.format_attempt(attempt));
            }
        }

        lines.join("\n")
    }

    fn format_attempt(&self, attempt: &ExtractAttempt) -> String {
        let mark = if attempt.success {
            self.green("✓")
        } else {
            self.red("✗")
        };
        let detail = match (&attempt.error_kind, &attempt.error) {
            (Some(kind), Some(error)) => format!("{kind}: {error}"),
            (None, Some(error)) => error.clone(),
            _ => String::new(),
        };

        format!(
            "    {} {:<18} {:>6}ms  {}",
            mark,
            attempt.strategy_id,
            attempt.duration.as_millis(),
            self.dim(&detail)
        )
        .trim_end()
        .to_string()
    }

    /// Formats the platform list with each pipeline in execution order.
    pub fn format_platforms(&self, platforms: &[(&PlatformDescriptor, Vec<StrategyInfo>)]) -> String {
        let mut lines = Vec::new();

        for (i, (desc, strategies)) in platforms.iter().enumerate() {
            if i > 0 {
                lines.push(String::new());
            }

            let mut names = vec![desc.cli_name()];
            names.extend(desc.cli.aliases.iter().copied());
            lines.push(format!(
                "{} {}",
                self.bold(desc.display_name()),
                self.dim(&format!("({})", names.join(", ")))
            ));
            lines.push(format!("  Hosts: {}", desc.hosts.join(", ")));

            for (step, info) in strategies.iter().enumerate() {
                lines.push(format!(
                    "  {}. {:<18} {:<14} {}",
                    step + 1,
                    info.id,
                    info.kind.to_string(),
                    self.dim(&format!("{}s", info.timeout_secs))
                ));
            }
        }

        lines.join("\n")
    }

    /// Formats the effective configuration.
    pub fn format_config(&self, config: &Config) -> String {
        let key = if config.has_api_key() {
            self.green("set")
        } else {
            self.yellow("not set")
        };

        [
            self.bold("VidSaver Configuration"),
            "─".repeat(40),
            format!("JSON probe timeout: {}s", config.json_probe_secs),
            format!("Embed timeout:      {}s", config.embed_secs),
            format!("Page timeout:       {}s", config.page_secs),
            format!("API timeout:        {}s", config.api_secs),
            format!("RapidAPI host:      {}", config.rapidapi_host),
            format!("RapidAPI key:       {key}"),
            format!("Log level:          {}", config.log_level),
            format!("Log page bodies:    {}", config.debug_log_body),
            format!("Restrict hosts:     {}", config.restrict_hosts),
        ]
        .join("\n")
    }

    // ========================================================================
    // Color/style helpers
    // ========================================================================

    fn paint(&self, code: &str, text: &str) -> String {
        if self.use_colors {
            format!("{code}{text}{RESET}")
        } else {
            text.to_string()
        }
    }

    fn bold(&self, text: &str) -> String {
        self.paint(BOLD, text)
    }

    fn dim(&self, text: &str) -> String {
        self.paint(DIM, text)
    }

    fn green(&self, text: &str) -> String {
        self.paint(GREEN, text)
    }

    fn yellow(&self, text: &str) -> String {
        self.paint(YELLOW, text)
    }

    fn red(&self, text: &str) -> String {
        self.paint(RED, text)
    }

    fn cyan(&self, text: &str) -> String {
        self.paint(CYAN, text)
    }
}

/// Formats seconds as `m:ss`, or `h:mm:ss` past an hour.
fn format_duration(secs: u64) -> String {
    let (h, m, s) = (secs / 3600, (secs % 3600) / 60, secs % 60);
    if h > 0 {
        format!("{h}:{m:02}:{s:02}")
    } else {
        format!("{m}:{s:02}")
    }
}

// ============================================================================
// Tests
// ============================================================================
