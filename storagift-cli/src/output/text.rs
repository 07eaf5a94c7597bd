//! Text output formatting with usage bars and colors.

use storagift_core::{CategoryUsage, Page, PaymentSession, RankedEntry};

// ============================================================================
// ANSI Colors
// ============================================================================

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const RED: &str = "\x1b[31m";
const CYAN: &str = "\x1b[36m";

// Usage bar characters
const BAR_FULL: char = '█';
const BAR_EMPTY: char = '░';

/// Text formatter with optional colors.
pub struct TextFormatter {
    use_colors: bool,
    bar_width: usize,
}

impl TextFormatter {
    /// Creates a new text formatter.
    pub fn new(use_colors: bool) -> Self {
        Self {
            use_colors,
            bar_width: 10,
        }
    }

    /// Formats one page of a ranking.
    pub fn format_ranking_page(&self, page: &Page<RankedEntry>, dropped: usize) -> String {
        let mut lines = Vec::new();

        if page.total_pages == 0 {
            lines.push("No rankable accounts found.".to_string());
        } else {
            lines.push(format!(
                "{} (page {}/{})",
                self.bold("Storage ranking, lowest first"),
                page.number,
                page.total_pages
            ));
            lines.push(String::new());

            for entry in &page.items {
                lines.push(self.format_entry(entry));
            }
        }

        if dropped > 0 {
            lines.push(String::new());
            lines.push(self.dim(&format!(
                "{dropped} account(s) skipped (incomplete or unavailable data)"
            )));
        }

        lines.join("\n")
    }

    /// Formats a single ranked entry with a per-category breakdown.
    pub fn format_entry(&self, entry: &RankedEntry) -> String {
        let mut lines = Vec::new();

        let name = entry
            .account
            .display_name
            .as_deref()
            .unwrap_or(&entry.account.username);
        lines.push(format!(
            "{} @{} {}",
            self.bold(name),
            entry.account.username,
            self.dim(&format!("(fid {})", entry.account.fid))
        ));

        lines.push(self.format_category("Casts", &entry.usage.casts));
        lines.push(self.format_category("Reactions", &entry.usage.reactions));
        lines.push(self.format_category("Links", &entry.usage.links));

        let total = if entry.total_remaining == 0 {
            self.red("OUT OF STORAGE")
        } else {
            format!("{} left", entry.total_remaining)
        };
        lines.push(format!("  Total: {total}"));

        lines.join("\n")
    }

    /// Formats the suggested gift recipient.
    pub fn format_suggestion(&self, entry: &RankedEntry) -> String {
        format!(
            "{}\n\n{}",
            self.bold("Suggested gift recipient"),
            self.format_entry(entry)
        )
    }

    /// Formats a rent-price quote.
    #[allow(clippy::cast_precision_loss)]
    pub fn format_price(&self, units: u64, wei: u128) -> String {
        // 1 ETH = 10^18 wei
        let eth = wei as f64 / 1e18;
        format!(
            "Rent price for {} unit(s): {} wei ({})",
            units,
            wei,
            self.cyan(&format!("{eth:.6} ETH"))
        )
    }

    /// Formats a payment session.
    pub fn format_session(&self, session: &PaymentSession) -> String {
        let mut lines = Vec::new();
        lines.push(format!("Session: {}", self.bold(&session.session_id)));

        match &session.unsigned_transaction {
            Some(tx) => {
                lines.push(format!("  To:    {}", tx.to));
                lines.push(format!("  Value: {}", tx.value));
                lines.push(format!("  Input: {}", self.dim(&tx.input)));
            }
            None => lines.push(self.dim("  No transaction attached yet")),
        }

        if let Some(hash) = &session.sponsored_transaction_hash {
            lines.push(format!("  Settled: {}", self.green(hash)));
        }

        lines.join("\n")
    }

    #[allow(clippy::cast_precision_loss)]
    fn format_category(&self, label: &str, usage: &CategoryUsage) -> String {
        let remaining = usage.remaining();
        let used_fraction = if usage.capacity == 0 {
            1.0
        } else {
            usage.used as f64 / usage.capacity as f64
        };

        format!(
            "  {:<10} {} {}/{} used, {} left",
            label,
            self.usage_bar(used_fraction),
            usage.used,
            usage.capacity,
            remaining
        )
    }

    /// Renders a usage bar; fuller and redder means less storage left.
    pub fn usage_bar(&self, used_fraction: f64) -> String {
        let fraction = used_fraction.clamp(0.0, 1.0);
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let filled = ((fraction * self.bar_width as f64).round() as usize).min(self.bar_width);

        let bar: String = std::iter::repeat(BAR_FULL)
            .take(filled)
            .chain(std::iter::repeat(BAR_EMPTY).take(self.bar_width - filled))
            .collect();

        if !self.use_colors {
            return bar;
        }

        let color = if fraction >= 0.9 {
            RED
        } else if fraction >= 0.7 {
            YELLOW
        } else {
            GREEN
        };
        format!("{color}{bar}{RESET}")
    }

    fn bold(&self, s: &str) -> String {
        self.wrap(s, BOLD)
    }

    fn dim(&self, s: &str) -> String {
        self.wrap(s, DIM)
    }

    fn red(&self, s: &str) -> String {
        self.wrap(s, RED)
    }

    fn green(&self, s: &str) -> String {
        self.wrap(s, GREEN)
    }

    fn cyan(&self, s: &str) -> String {
        self.wrap(s, CYAN)
    }

    fn wrap(&self, s: &str, code: &str) -> String {
        if self.use_colors {
            format!("{code}{s}{RESET}")
        } else {
            s.to_string()
        }
    }
}
