//! Config command - manage configuration.

use anyhow::{Result, bail};
use clap::{Args, Subcommand};
use vidsaver_store::{Config, ENV_RAPIDAPI_KEY, default_config_dir};

use crate::output::{JsonFormatter, TextFormatter};
use crate::{Cli, ExitCode, OutputFormat};

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Config subcommands.
#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show the effective configuration (API key redacted).
    Show,

    /// Show configuration paths.
    Path,

    /// Write a default config file.
    Init {
        /// Overwrite an existing file.
        #[arg(long)]
        force: bool,
    },
}

/// Runs the config command.
///
/// `loaded` is passed through unresolved so that `init --force` can
/// replace a file that no longer parses.
pub async fn run(args: &ConfigArgs, loaded: Result<Config>, cli: &Cli) -> Result<ExitCode> {
    match &args.action {
        ConfigAction::Show => show_config(&loaded?, cli),
        ConfigAction::Path => show_paths(cli),
        ConfigAction::Init { force } => init_config(*force, cli).await,
    }
}

fn show_config(config: &Config, cli: &Cli) -> Result<ExitCode> {
    match cli.format {
        OutputFormat::Json => {
            let formatter = JsonFormatter::new(cli.pretty);
            println!("{}", formatter.format_config(config)?);
        }
        OutputFormat::Text => {
            let formatter = TextFormatter::new(!cli.no_color);
            println!("{}", formatter.format_config(config));
            if !config.has_api_key() {
                println!();
                println!("Set {ENV_RAPIDAPI_KEY} to enable YouTube extraction.");
            }
        }
    }
    Ok(ExitCode::Success)
}

fn show_paths(cli: &Cli) -> Result<ExitCode> {
    let dir = default_config_dir();
    let file = config_file(cli);

    match cli.format {
        OutputFormat::Json => {
            let paths = serde_json::json!({
                "configDir": dir,
                "configFile": file,
            });
            println!("{}", JsonFormatter::new(cli.pretty).format(&paths)?);
        }
        OutputFormat::Text => {
            println!("Config directory: {}", dir.display());
            println!("Config file:      {}", file.display());
        }
    }
    Ok(ExitCode::Success)
}

async fn init_config(force: bool, cli: &Cli) -> Result<ExitCode> {
    let path = config_file(cli);
    if path.exists() && !force {
        bail!(
            "{} already exists (use --force to overwrite)",
            path.display()
        );
    }

    Config::default().save_to(&path).await?;

    if !cli.quiet {
        println!("Wrote default configuration to {}", path.display());
    }
    Ok(ExitCode::Success)
}

fn config_file(cli: &Cli) -> std::path::PathBuf {
    cli.config.clone().unwrap_or_else(Config::default_path)
}
