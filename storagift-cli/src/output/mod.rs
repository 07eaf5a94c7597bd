//! Output formatting for CLI.

mod json;
mod text;

pub use json::{EntryOutput, JsonFormatter, PriceOutput, RankOutput, SessionOutput};
pub use text::TextFormatter;
#[cfg(test)]
mod tests;
