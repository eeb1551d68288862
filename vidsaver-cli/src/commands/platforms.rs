//! Platforms command - list supported platforms and their strategies.

use anyhow::Result;
use vidsaver_fetch::StrategyInfo;
use vidsaver_platforms::{PlatformDescriptor, PlatformRegistry};
use vidsaver_store::Config;

use super::extract::build_context;
use crate::output::{JsonFormatter, TextFormatter};
use crate::{Cli, ExitCode, OutputFormat};

/// Runs the platforms command.
pub fn run(config: &Config, cli: &Cli) -> Result<ExitCode> {
    let ctx = build_context(config)?;

    let platforms: Vec<(&PlatformDescriptor, Vec<StrategyInfo>)> = PlatformRegistry::all()
        .iter()
        .map(|desc| (desc, desc.build_pipeline(&ctx).strategy_info(&ctx)))
        .collect();

    match cli.format {
        OutputFormat::Json => {
            let formatter = JsonFormatter::new(cli.pretty);
            println!("{}", formatter.format_platforms(&platforms)?);
        }
        OutputFormat::Text => {
            let formatter = TextFormatter::new(!cli.no_color);
            println!("{}", formatter.format_platforms(&platforms));
        }
    }

    Ok(ExitCode::Success)
}
