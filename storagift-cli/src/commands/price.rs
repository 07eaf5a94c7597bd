//! Price command - quote the rent price for storage units.

use anyhow::Result;
use clap::Args;
use tracing::info;

use crate::output::{JsonFormatter, PriceOutput, TextFormatter};
use crate::{Cli, OutputFormat};

/// Arguments for the price command.
#[derive(Args)]
pub struct PriceArgs {
    /// Number of storage units to quote.
    #[arg(long, default_value = "1")]
    pub units: u64,
}

/// Runs the price command.
pub async fn run(args: &PriceArgs, cli: &Cli) -> Result<()> {
    let config = super::load_config(cli)?;
    let registry = super::build_registry(&config)?;

    info!(units = args.units, "Quoting rent price");

    let wei = registry
        .price(args.units)
        .await
        .map_err(storagift_core::CoreError::from)?;

    match cli.format {
        OutputFormat::Text => {
            let formatter = TextFormatter::new(!cli.no_color);
            println!("{}", formatter.format_price(args.units, wei));
        }
        OutputFormat::Json => {
            let formatter = JsonFormatter::new(cli.pretty);
            println!(
                "{}",
                formatter.format(&PriceOutput {
                    units: args.units,
                    wei,
                })?
            );
        }
    }

    Ok(())
}
