//! JSON output formatting.

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;
use storagift_core::{Page, PaymentSession, RankedEntry};

// ============================================================================
// Output Types
// ============================================================================

/// JSON output for a ranking page.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankOutput {
    pub viewer_fid: u64,
    pub page: usize,
    pub total_pages: usize,
    pub dropped: usize,
    pub entries: Vec<EntryOutput>,
}

/// JSON output for one ranked entry.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryOutput {
    pub fid: u64,
    pub username: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    pub total_remaining: u64,
    pub casts_remaining: u64,
    pub reactions_remaining: u64,
    pub links_remaining: u64,
    pub fetched_at: DateTime<Utc>,
}

impl From<&RankedEntry> for EntryOutput {
    fn from(entry: &RankedEntry) -> Self {
        Self {
            fid: entry.account.fid.0,
            username: entry.account.username.clone(),
            display_name: entry.account.display_name.clone(),
            total_remaining: entry.total_remaining,
            casts_remaining: entry.usage.casts.remaining(),
            reactions_remaining: entry.usage.reactions.remaining(),
            links_remaining: entry.usage.links.remaining(),
            fetched_at: entry.usage.fetched_at,
        }
    }
}

impl RankOutput {
    /// Builds output from a ranking page.
    pub fn from_page(viewer_fid: u64, page: &Page<RankedEntry>, dropped: usize) -> Self {
        Self {
            viewer_fid,
            page: page.number,
            total_pages: page.total_pages,
            dropped,
            entries: page.items.iter().map(EntryOutput::from).collect(),
        }
    }
}

/// JSON output for a rent-price quote.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceOutput {
    pub units: u64,
    pub wei: u128,
}

/// JSON output for a payment session.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionOutput {
    pub session_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sponsored_transaction_hash: Option<String>,
}

impl From<&PaymentSession> for SessionOutput {
    fn from(session: &PaymentSession) -> Self {
        let tx = session.unsigned_transaction.as_ref();
        Self {
            session_id: session.session_id.clone(),
            to: tx.map(|t| t.to.clone()),
            input: tx.map(|t| t.input.clone()),
            value: tx.map(|t| t.value.clone()),
            sponsored_transaction_hash: session.sponsored_transaction_hash.clone(),
        }
    }
}

// ============================================================================
// Formatter
// ============================================================================

/// JSON formatter with optional pretty-printing.
pub struct JsonFormatter {
    pretty: bool,
}

impl JsonFormatter {
    /// Creates a new JSON formatter.
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }

    /// Serializes any value.
    pub fn format<T: Serialize>(&self, value: &T) -> Result<String> {
        let output = if self.pretty {
            serde_json::to_string_pretty(value)?
        } else {
            serde_json::to_string(value)?
        };
        Ok(output)
    }
}
