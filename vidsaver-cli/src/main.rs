// Lint configuration for this crate
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! `VidSaver` CLI - direct video URLs from the command line.
//!
//! # Examples
//!
//! ```bash
//! # Extract a reel
//! vidsaver extract https://www.instagram.com/reel/Cxyz123/
//!
//! # Several URLs at once, JSON output
//! vidsaver --format json --pretty extract URL1 URL2
//!
//! # Show every strategy that ran
//! vidsaver extract --attempts https://fb.watch/abc/
//!
//! # List platforms and their strategies
//! vidsaver platforms
//!
//! # Write a default config file
//! vidsaver config init
//! ```

mod commands;
mod output;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use commands::{config, extract, platforms};

// ============================================================================
// CLI Definition
// ============================================================================

/// `VidSaver` CLI - direct video URL extraction.
#[derive(Parser)]
#[command(name = "vidsaver")]
#[command(about = "Extract direct video URLs from social media posts")]
#[command(long_about = r"
VidSaver turns a post URL into a direct, playable video URL.

Supported platforms:
  • Instagram (instagram, ig)
  • Facebook (facebook, fb)
  • YouTube (youtube, yt) - requires RAPIDAPI_KEY

Examples:
  vidsaver extract https://www.instagram.com/reel/Cxyz123/
  vidsaver --format json extract URL1 URL2
  vidsaver platforms
  vidsaver config show
")]
#[command(version)]
#[command(author = "VidSaver Contributors")]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (text or json).
    #[arg(long, short = 'f', default_value = "text", global = true)]
    pub format: OutputFormat,

    /// Pretty-print JSON output.
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Path to the config file.
    #[arg(long, short = 'c', global = true)]
    pub config: Option<PathBuf>,

    /// Verbose output (show debug info).
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Disable colored output.
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Quiet mode (minimal output).
    #[arg(long, short, global = true)]
    pub quiet: bool,
}

/// CLI commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Extract direct video URLs.
    #[command(visible_alias = "x")]
    Extract(extract::ExtractArgs),

    /// List supported platforms and their strategies.
    #[command(visible_alias = "p")]
    Platforms,

    /// Manage configuration.
    Config(config::ConfigArgs),
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum OutputFormat {
    /// Human-readable text with colors.
    #[default]
    Text,
    /// JSON output for scripting.
    Json,
}

/// CLI exit codes.
#[repr(i32)]
pub enum ExitCode {
    /// Success.
    Success = 0,
    /// General error (bad arguments, unreadable config).
    Error = 1,
    /// At least one URL yielded no video.
    ExtractionFailed = 2,
}

// ============================================================================
// Logging Setup
// ============================================================================

fn setup_logging(verbose: bool, quiet: bool, level: &str) {
    if quiet {
        return;
    }

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("vidsaver=debug,warn")
        } else {
            EnvFilter::new(format!("vidsaver={level},warn"))
        }
    });

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .without_time()
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}

// ============================================================================
// Main Entry Point
// ============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let loaded = commands::load_config(cli.config.as_deref()).await;
    let level = loaded.as_ref().map_or("info", |c| c.log_level.as_str());
    setup_logging(cli.verbose, cli.quiet, level);

    let result = match &cli.command {
        Commands::Extract(args) => match loaded {
            Ok(config) => extract::run(args, &config, &cli).await,
            Err(e) => Err(e),
        },
        Commands::Platforms => match loaded {
            Ok(config) => platforms::run(&config, &cli),
            Err(e) => Err(e),
        },
        Commands::Config(args) => config::run(args, loaded, &cli).await,
    };

    match result {
        Ok(ExitCode::Success) => Ok(()),
        Ok(code) => std::process::exit(code as i32),
        Err(e) => {
            if !cli.quiet {
                eprintln!("Error: {e:#}");
            }
            std::process::exit(ExitCode::Error as i32);
        }
    }
}
