// Lint configuration for this crate
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! Storagift CLI - rank who you follow by Farcaster storage left and gift
//! storage to whoever needs it most.
//!
//! # Examples
//!
//! ```bash
//! # Rank the accounts 16098 follows, lowest storage first
//! storagift rank --fid 16098
//!
//! # Show one ranked account per page, page 3
//! storagift rank --fid 16098 --page 3
//!
//! # Who needs a gift the most?
//! storagift suggest --fid 16098
//!
//! # Quote the rent price for 2 storage units
//! storagift price --units 2
//!
//! # Open a gift payment session
//! storagift gift create --recipient 3 --payer 0x... --chain eip155:8453
//!
//! # JSON output
//! storagift rank --fid 16098 --format json --pretty
//! ```

mod commands;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use commands::{config, gift, price, rank, suggest};
use storagift_core::CoreError;

// ============================================================================
// CLI Definition
// ============================================================================

/// Storagift CLI - Farcaster storage ranking and gifting.
#[derive(Parser)]
#[command(name = "storagift")]
#[command(about = "Rank followed accounts by storage left and gift storage")]
#[command(long_about = r#"
Storagift ranks the accounts you follow on Farcaster by how much storage
they have left (casts + reactions + links) and helps you gift storage
units to whoever is running lowest.

Examples:
  storagift rank --fid 16098            # Ranked list, lowest first
  storagift rank --fid 16098 --page 2   # One page of the ranking
  storagift suggest --fid 16098         # Single suggested recipient
  storagift price --units 1             # Rent price quote in wei
  storagift gift create --recipient 3 --payer 0x... --chain eip155:8453
"#)]
#[command(version)]
#[command(author = "Storagift Contributors")]
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

    /// Path to a configuration file.
    #[arg(long, global = true)]
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
    /// Rank followed accounts by storage left (default page 1).
    #[command(visible_alias = "r")]
    Rank(rank::RankArgs),

    /// Show the single suggested gift recipient.
    #[command(visible_alias = "s")]
    Suggest(suggest::SuggestArgs),

    /// Quote the rent price for storage units.
    #[command(visible_alias = "p")]
    Price(price::PriceArgs),

    /// Manage gift payment sessions.
    #[command(visible_alias = "g")]
    Gift(gift::GiftArgs),

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
    /// General error.
    Error = 1,
    /// Timeout.
    Timeout = 4,
}

// ============================================================================
// Logging Setup
// ============================================================================

fn setup_logging(verbose: bool, quiet: bool) {
    if quiet {
        return; // No logging in quiet mode
    }

    let filter = if verbose {
        EnvFilter::new("storagift=debug,info")
    } else {
        EnvFilter::new("storagift=warn")
    };

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

    setup_logging(cli.verbose, cli.quiet);

    let result = match &cli.command {
        Commands::Rank(args) => rank::run(args, &cli).await,
        Commands::Suggest(args) => suggest::run(args, &cli).await,
        Commands::Price(args) => price::run(args, &cli).await,
        Commands::Gift(args) => gift::run(args, &cli).await,
        Commands::Config(args) => config::run(args, &cli).await,
    };

    if let Err(e) = result {
        if !cli.quiet {
            eprintln!("Error: {e:#}");
        }
        let code = match e.downcast_ref::<CoreError>() {
            Some(CoreError::ProviderTimeout(_)) => ExitCode::Timeout,
            _ => ExitCode::Error,
        };
        std::process::exit(code as i32);
    }

    Ok(())
}
