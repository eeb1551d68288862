//! Extract command - resolve post URLs into direct video URLs.

use std::sync::Arc;

use anyhow::{Result, bail};
use clap::Args;
use futures::future::join_all;
use tracing::debug;
use vidsaver_core::{ExtractionRequest, ExtractionResult, Platform};
use vidsaver_fetch::{ExtractAttempt, ExtractContext, HttpClient};
use vidsaver_platforms::{PlatformRegistry, VideoExtractor};
use vidsaver_store::Config;

use crate::output::{JsonFormatter, TextFormatter};
use crate::{Cli, ExitCode, OutputFormat};

/// Arguments for the extract command.
#[derive(Args, Debug)]
pub struct ExtractArgs {
    /// Post URLs to extract.
    #[arg(required = true)]
    pub urls: Vec<String>,

    /// Force a platform instead of detecting it from the URL host.
    #[arg(long, short)]
    pub platform: Option<String>,

    /// Include every strategy attempt in the output.
    #[arg(long, short)]
    pub attempts: bool,
}

/// Outcome for one input URL.
#[derive(Debug)]
pub struct ExtractReport {
    /// URL as given on the command line.
    pub url: String,
    /// Platform the URL was routed to, if any.
    pub platform: Option<Platform>,
    /// Canonical result.
    pub result: ExtractionResult,
    /// Strategy attempts, in execution order.
    pub attempts: Vec<ExtractAttempt>,
}

impl ExtractReport {
    /// Returns true if a video URL was found.
    pub fn is_success(&self) -> bool {
        self.result.is_success()
    }
}

/// Runs the extract command.
pub async fn run(args: &ExtractArgs, config: &Config, cli: &Cli) -> Result<ExitCode> {
    let forced = match &args.platform {
        Some(name) => match PlatformRegistry::get_by_cli_name(name) {
            Some(desc) => Some(desc.id),
            None => bail!("Unknown platform: {name}"),
        },
        None => None,
    };

    let extractor = VideoExtractor::new(build_context(config)?);

    let reports = join_all(
        args.urls
            .iter()
            .map(|url| extract_one(&extractor, url, forced)),
    )
    .await;

    print_reports(&reports, args.attempts, cli)?;

    if reports.iter().all(ExtractReport::is_success) {
        Ok(ExitCode::Success)
    } else {
        Ok(ExitCode::ExtractionFailed)
    }
}

/// Builds the extraction context from configuration.
pub fn build_context(config: &Config) -> Result<ExtractContext> {
    let mut http = HttpClient::try_new()?;
    if config.restrict_hosts {
        let domains = allowed_domains(config);
        debug!(?domains, "Restricting outbound hosts");
        http = http.with_allowed_domains(domains);
    }

    Ok(ExtractContext::builder()
        .http(Arc::new(http))
        .settings(config.to_extract_settings())
        .build())
}

/// Platform hosts plus the video details API host.
fn allowed_domains(config: &Config) -> Vec<String> {
    PlatformRegistry::all()
        .iter()
        .flat_map(|desc| desc.hosts.iter().map(ToString::to_string))
        .chain(std::iter::once(config.rapidapi_host.clone()))
        .collect()
}

async fn extract_one(
    extractor: &VideoExtractor,
    url: &str,
    forced: Option<Platform>,
) -> ExtractReport {
    let request = match forced {
        Some(platform) => Some(ExtractionRequest::new(url, platform)),
        None => ExtractionRequest::detect(url).ok(),
    };

    match request {
        Some(request) => {
            let outcome = extractor.extract_detailed(&request).await;
            ExtractReport {
                url: url.to_string(),
                platform: Some(request.platform),
                result: outcome.extraction_result(),
                attempts: outcome.attempts,
            }
        }
        None => ExtractReport {
            url: url.to_string(),
            platform: None,
            result: extractor.extract(url).await,
            attempts: Vec::new(),
        },
    }
}

fn print_reports(reports: &[ExtractReport], with_attempts: bool, cli: &Cli) -> Result<()> {
    match cli.format {
        OutputFormat::Json => {
            let formatter = JsonFormatter::new(cli.pretty);
            println!("{}", formatter.format_reports(reports, with_attempts)?);
        }
        OutputFormat::Text => {
            let formatter = TextFormatter::new(!cli.no_color);
            for (i, report) in reports.iter().enumerate() {
                if i > 0 {
                    println!();
                }
                println!("{}", formatter.format_report(report, with_attempts));
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allowed_domains_cover_platforms_and_api() {
        let config = Config::default();
        let domains = allowed_domains(&config);
        for host in ["instagram.com", "facebook.com", "fb.watch", "youtube.com", "youtu.be"] {
            assert!(domains.iter().any(|d| d == host), "missing {host}");
        }
        assert!(domains.contains(&config.rapidapi_host));
    }

    #[tokio::test]
    async fn test_unsupported_url_reports_not_found() {
        let extractor = VideoExtractor::new(build_context(&Config::default()).unwrap());
        let report = extract_one(&extractor, "https://example.com/video/1", None).await;

        assert!(!report.is_success());
        assert!(report.platform.is_none());
        assert!(report.attempts.is_empty());
        assert_eq!(
            report.result.error_kind,
            Some(vidsaver_core::ErrorKind::NotFound)
        );
    }

    #[tokio::test]
    async fn test_forced_youtube_without_id_skips_network() {
        let extractor = VideoExtractor::new(build_context(&Config::default()).unwrap());
        let report = extract_one(
            &extractor,
            "https://www.youtube.com/feed/trending",
            Some(Platform::YouTube),
        )
        .await;

        assert_eq!(report.platform, Some(Platform::YouTube));
        assert_eq!(report.attempts.len(), 1);
        assert_eq!(
            report.result.error_kind,
            Some(vidsaver_core::ErrorKind::NotFound)
        );
    }
}
