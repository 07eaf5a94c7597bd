//! Suggest command - show the single suggested gift recipient.

use anyhow::Result;
use clap::Args;
use tracing::info;

use storagift_core::Fid;
use storagift_fetch::rank_followed_by_storage;

use crate::output::{EntryOutput, JsonFormatter, TextFormatter};
use crate::{Cli, OutputFormat};

/// Arguments for the suggest command.
#[derive(Args)]
pub struct SuggestArgs {
    /// Account whose follow list is searched.
    #[arg(long)]
    pub fid: u64,
}

/// Runs the suggest command.
pub async fn run(args: &SuggestArgs, cli: &Cli) -> Result<()> {
    let config = super::load_config(cli)?;
    let graph = super::build_graph(&config)?;
    let cache = super::build_cache(&config);
    let options = super::rank_options(&config);

    info!(fid = args.fid, "Finding suggested recipient");

    let ranking = rank_followed_by_storage(&graph, &cache, Fid(args.fid), &options).await?;

    let Some(entry) = ranking.suggested() else {
        if cli.format == OutputFormat::Json {
            println!("null");
        } else {
            println!("No rankable accounts found.");
        }
        return Ok(());
    };

    match cli.format {
        OutputFormat::Text => {
            let formatter = TextFormatter::new(!cli.no_color);
            println!("{}", formatter.format_suggestion(entry));
        }
        OutputFormat::Json => {
            let formatter = JsonFormatter::new(cli.pretty);
            println!("{}", formatter.format(&EntryOutput::from(entry))?);
        }
    }

    Ok(())
}
