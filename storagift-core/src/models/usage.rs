//! Storage usage types.
//!
//! Farcaster storage units are consumed by three tracked categories: casts,
//! reactions, and links (follows). A [`StorageUsage`] record only exists
//! when all three categories were present in the provider payload; a
//! partial payload never becomes a record with zero-defaulted categories.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::account::FollowedAccount;

// ============================================================================
// Category Usage
// ============================================================================

/// Capacity and consumption for one tracked resource category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryUsage {
    /// Total units rented for this category.
    pub capacity: u64,
    /// Units currently consumed.
    pub used: u64,
}

impl CategoryUsage {
    /// Creates a new category usage.
    pub fn new(capacity: u64, used: u64) -> Self {
        Self { capacity, used }
    }

    /// Remaining units; saturates at zero when over capacity.
    pub fn remaining(&self) -> u64 {
        self.capacity.saturating_sub(self.used)
    }

    /// Returns true if the category is full or over capacity.
    pub fn is_exhausted(&self) -> bool {
        self.used >= self.capacity
    }
}

// ============================================================================
// Storage Usage
// ============================================================================

/// One account's storage usage across all tracked categories.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageUsage {
    /// Cast storage.
    pub casts: CategoryUsage,
    /// Reaction storage.
    pub reactions: CategoryUsage,
    /// Link (follow) storage.
    pub links: CategoryUsage,
    /// When this record was fetched from the provider.
    pub fetched_at: DateTime<Utc>,
}

impl StorageUsage {
    /// Creates a usage record stamped with the current time.
    pub fn new(casts: CategoryUsage, reactions: CategoryUsage, links: CategoryUsage) -> Self {
        Self {
            casts,
            reactions,
            links,
            fetched_at: Utc::now(),
        }
    }

    /// Total remaining units summed over all categories.
    pub fn total_remaining(&self) -> u64 {
        self.casts.remaining() + self.reactions.remaining() + self.links.remaining()
    }

    /// Returns true if every category is exhausted.
    pub fn is_out_of_storage(&self) -> bool {
        self.total_remaining() == 0
    }

    /// Returns true if this record is older than the threshold.
    pub fn is_stale(&self, threshold: Duration) -> bool {
        Utc::now() - self.fetched_at > threshold
    }
}

// ============================================================================
// Ranked Entry
// ============================================================================

/// A followed account paired with its computed storage headroom.
///
/// Derived once per ranking pass; `total_remaining` reflects exactly the
/// fetches made during that pass and is never recomputed mid-pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedEntry {
    /// The followed account.
    pub account: FollowedAccount,
    /// The usage record the ranking was computed from.
    pub usage: StorageUsage,
    /// Sort key: total units left across casts, reactions, and links.
    pub total_remaining: u64,
}

impl RankedEntry {
    /// Pairs an account with its usage record.
    pub fn new(account: FollowedAccount, usage: StorageUsage) -> Self {
        let total_remaining = usage.total_remaining();
        Self {
            account,
            usage,
            total_remaining,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::account::Fid;

    fn account(fid: u64) -> FollowedAccount {
        FollowedAccount {
            fid: Fid(fid),
            username: format!("user{fid}"),
            display_name: None,
            avatar_url: "https://example.com/pfp.png".to_string(),
        }
    }

    #[test]
    fn test_category_remaining_saturates() {
        assert_eq!(CategoryUsage::new(100, 40).remaining(), 60);
        // Over capacity does not underflow
        assert_eq!(CategoryUsage::new(100, 150).remaining(), 0);
        assert!(CategoryUsage::new(100, 100).is_exhausted());
    }

    #[test]
    fn test_total_remaining_sums_categories() {
        let usage = StorageUsage::new(
            CategoryUsage::new(5000, 4000),
            CategoryUsage::new(2500, 2500),
            CategoryUsage::new(2500, 1500),
        );
        assert_eq!(usage.total_remaining(), 1000 + 0 + 1000);
        assert!(!usage.is_out_of_storage());
    }

    #[test]
    fn test_out_of_storage() {
        let usage = StorageUsage::new(
            CategoryUsage::new(5000, 5000),
            CategoryUsage::new(2500, 2600),
            CategoryUsage::new(2500, 2500),
        );
        assert!(usage.is_out_of_storage());
    }

    #[test]
    fn test_ranked_entry_caches_sort_key() {
        let usage = StorageUsage::new(
            CategoryUsage::new(10, 5),
            CategoryUsage::new(10, 5),
            CategoryUsage::new(10, 5),
        );
        let entry = RankedEntry::new(account(1), usage);
        assert_eq!(entry.total_remaining, 15);
    }
}
