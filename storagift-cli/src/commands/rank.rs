//! Rank command - rank followed accounts by storage left.

use anyhow::Result;
use clap::Args;
use tracing::info;

use storagift_core::{Fid, PageParams};
use storagift_fetch::rank_followed_by_storage;

use crate::output::{JsonFormatter, RankOutput, TextFormatter};
use crate::{Cli, OutputFormat};

/// Arguments for the rank command.
#[derive(Args)]
pub struct RankArgs {
    /// Account whose follow list is ranked.
    #[arg(long)]
    pub fid: u64,

    /// Page of the ranking to show (1-based).
    #[arg(long, default_value = "1")]
    pub page: usize,

    /// Show the full ranking instead of the capped page window.
    #[arg(long)]
    pub all: bool,

    /// Override the follow-list fetch cap.
    #[arg(long)]
    pub limit: Option<usize>,

    /// Override the per-batch concurrency ceiling.
    #[arg(long)]
    pub batch_size: Option<usize>,
}

/// Runs the rank command.
pub async fn run(args: &RankArgs, cli: &Cli) -> Result<()> {
    let config = super::load_config(cli)?;
    let graph = super::build_graph(&config)?;
    let cache = super::build_cache(&config);

    let mut options = super::rank_options(&config);
    if let Some(limit) = args.limit {
        options.follow_limit = limit;
    }
    if let Some(batch_size) = args.batch_size {
        options.batch_size = batch_size;
    }

    info!(fid = args.fid, "Ranking followed accounts");

    let ranking = rank_followed_by_storage(&graph, &cache, Fid(args.fid), &options).await?;

    let params = if args.all {
        PageParams::new(config.general.items_per_page).uncapped()
    } else {
        PageParams {
            items_per_page: config.general.items_per_page,
            max_pages: Some(config.general.max_pages),
        }
    };
    let page = ranking.page(clamp_page(args.page, ranking.total_pages(&params)), &params);

    match cli.format {
        OutputFormat::Text => {
            let formatter = TextFormatter::new(!cli.no_color);
            println!("{}", formatter.format_ranking_page(&page, ranking.dropped));
        }
        OutputFormat::Json => {
            let formatter = JsonFormatter::new(cli.pretty);
            let output = RankOutput::from_page(args.fid, &page, ranking.dropped);
            println!("{}", formatter.format(&output)?);
        }
    }

    Ok(())
}

/// Clamps a requested page number to `[1, total_pages]`.
///
/// Page numbers must be pre-clamped before paging; an empty ranking pins
/// the request to page 1.
fn clamp_page(requested: usize, total_pages: usize) -> usize {
    requested.clamp(1, total_pages.max(1))
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_page_bounds() {
        assert_eq!(clamp_page(0, 3), 1);
        assert_eq!(clamp_page(1, 3), 1);
        assert_eq!(clamp_page(3, 3), 3);
        assert_eq!(clamp_page(99, 3), 3);
    }

    #[test]
    fn test_clamp_page_empty_ranking() {
        assert_eq!(clamp_page(0, 0), 1);
        assert_eq!(clamp_page(4, 0), 1);
    }
}
