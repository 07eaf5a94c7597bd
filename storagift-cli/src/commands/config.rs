//! Config command - manage configuration.

use anyhow::Result;
use clap::{Args, Subcommand};
use tracing::info;

use storagift_store::Config;

use crate::output::JsonFormatter;
use crate::{Cli, OutputFormat};

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Config subcommands.
#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration.
    Show,

    /// Show the configuration file path.
    Path,

    /// Write a default configuration file.
    Init,

    /// Reset to defaults by deleting the configuration file.
    Reset,
}

/// Runs the config command.
pub async fn run(args: &ConfigArgs, cli: &Cli) -> Result<()> {
    match &args.action {
        ConfigAction::Show => show_config(cli),
        ConfigAction::Path => show_path(cli),
        ConfigAction::Init => init_config(cli),
        ConfigAction::Reset => reset_config(cli),
    }
}

fn config_path(cli: &Cli) -> std::path::PathBuf {
    cli.config.clone().unwrap_or_else(Config::default_path)
}

fn show_config(cli: &Cli) -> Result<()> {
    let config = super::load_config(cli)?;

    match cli.format {
        OutputFormat::Text => {
            println!("Storagift Configuration");
            println!("{}", "─".repeat(40));
            println!();
            println!("Items per page:   {}", config.general.items_per_page);
            println!("Max pages:        {}", config.general.max_pages);
            println!("Follow limit:     {}", config.pipeline.follow_limit);
            println!("Batch size:       {}", config.pipeline.batch_size);
            println!("Call timeout:     {}s", config.pipeline.call_timeout_secs);
            println!("Cache capacity:   {}", config.pipeline.cache_capacity);
            println!();
            println!("RPC endpoint:     {}", config.providers.rpc_url);
            println!("API key env:      ${}", config.providers.neynar_api_key_env);
            println!("Project id env:   ${}", config.providers.glide_project_id_env);
            if let Some(address) = &config.providers.registry_address {
                println!("Registry address: {address}");
            }
        }
        OutputFormat::Json => {
            let formatter = JsonFormatter::new(cli.pretty);
            println!("{}", formatter.format(&config)?);
        }
    }

    Ok(())
}

fn show_path(cli: &Cli) -> Result<()> {
    let path = config_path(cli);

    match cli.format {
        OutputFormat::Text => println!("{}", path.display()),
        OutputFormat::Json => {
            let value = serde_json::json!({ "config_file": path.display().to_string() });
            let formatter = JsonFormatter::new(cli.pretty);
            println!("{}", formatter.format(&value)?);
        }
    }

    Ok(())
}

fn init_config(cli: &Cli) -> Result<()> {
    let path = config_path(cli);

    if path.exists() {
        anyhow::bail!("Configuration file already exists: {}", path.display());
    }

    Config::default().save_to(&path)?;
    info!(path = %path.display(), "Wrote default configuration");
    println!("Wrote default configuration to {}", path.display());

    Ok(())
}

fn reset_config(cli: &Cli) -> Result<()> {
    let path = config_path(cli);

    if path.exists() {
        std::fs::remove_file(&path)?;
        info!(path = %path.display(), "Configuration reset");
        println!("Configuration reset to defaults");
    } else {
        println!("No configuration file to reset");
    }

    Ok(())
}
