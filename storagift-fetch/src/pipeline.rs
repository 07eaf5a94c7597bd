//! The follower storage-ranking pipeline.
//!
//! Given an account, fetch its follow list, fetch every followed account's
//! storage usage (batched, cached), rank ascending by storage left, and
//! page through the result. The account with the least storage left is the
//! suggested gift recipient.
//!
//! Failure semantics are asymmetric and deliberate: a failed follow-list
//! fetch aborts the whole invocation, while a failed per-account usage
//! fetch only drops that account from the ranking.

use futures::future::join_all;
use std::time::Duration;
use tokio::time::timeout;
use tracing::{debug, info, instrument, warn};

use storagift_core::{
    paginate, total_pages, CoreError, Fid, Page, PageParams, RankedEntry, SocialGraph,
};

use crate::cache::UsageCache;

/// Default cap on the follow-list fetch.
///
/// A soft limit to stay clear of provider rate limits; configurable, not a
/// contract.
pub const DEFAULT_FOLLOW_LIMIT: usize = 100;

/// Default number of concurrent usage fetches per batch.
///
/// A ceiling on in-flight requests to the storage-usage endpoint, not a
/// performance tunable.
pub const DEFAULT_BATCH_SIZE: usize = 15;

/// Default per-call timeout in seconds.
pub const DEFAULT_CALL_TIMEOUT_SECS: u64 = 10;

// ============================================================================
// Rank Options
// ============================================================================

/// Tunables for one ranking invocation.
#[derive(Debug, Clone)]
pub struct RankOptions {
    /// Maximum follow-list entries to fetch.
    pub follow_limit: usize,
    /// Maximum concurrent usage fetches; batches run sequentially.
    pub batch_size: usize,
    /// Timeout applied to every external call.
    pub call_timeout: Duration,
}

impl Default for RankOptions {
    fn default() -> Self {
        Self {
            follow_limit: DEFAULT_FOLLOW_LIMIT,
            batch_size: DEFAULT_BATCH_SIZE,
            call_timeout: Duration::from_secs(DEFAULT_CALL_TIMEOUT_SECS),
        }
    }
}

// ============================================================================
// Ranking
// ============================================================================

/// A materialized ranking: the sorted entries plus the observable count of
/// accounts dropped for incomplete or unavailable data.
///
/// Materialized once per invocation; re-pageable without re-fetching for as
/// long as the caller retains it.
#[derive(Debug, Clone)]
pub struct Ranking {
    entries: Vec<RankedEntry>,
    /// Accounts excluded from the ranking: incomplete profiles, incomplete
    /// usage records, and failed per-account fetches.
    pub dropped: usize,
}

impl Ranking {
    /// The ranked entries, ascending by storage left.
    pub fn entries(&self) -> &[RankedEntry] {
        &self.entries
    }

    /// Number of ranked entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing survived ranking.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The suggested gift recipient: the account with the least storage left.
    pub fn suggested(&self) -> Option<&RankedEntry> {
        self.entries.first()
    }

    /// Returns one page of the ranking and the recomputed page count.
    ///
    /// `page_number` is 1-based and expected to be pre-clamped by the
    /// caller; out-of-range values yield an empty page.
    pub fn page(&self, page_number: usize, params: &PageParams) -> Page<RankedEntry> {
        paginate(&self.entries, page_number, params)
    }

    /// The exposed page count under the given paging parameters.
    pub fn total_pages(&self, params: &PageParams) -> usize {
        total_pages(self.entries.len(), params)
    }
}

// ============================================================================
// Pipeline
// ============================================================================

/// Ranks the accounts followed by `fid` ascending by total storage left.
///
/// The follow list is fetched once; each followed account's usage comes
/// from `cache` or, on a miss, from the provider (at most `batch_size`
/// in-flight at a time). Accounts with incomplete records or failed
/// fetches are dropped, never zero-defaulted.
///
/// # Errors
///
/// Returns [`CoreError::ProviderUnavailable`] when the follow-list fetch
/// fails or returns an unexpected shape, and [`CoreError::ProviderTimeout`]
/// when it exceeds `options.call_timeout`. Per-account fetch failures are
/// not errors; they increment [`Ranking::dropped`].
#[instrument(skip(graph, cache, options), fields(fid = %fid))]
pub async fn rank_followed_by_storage<G: SocialGraph>(
    graph: &G,
    cache: &UsageCache,
    fid: Fid,
    options: &RankOptions,
) -> Result<Ranking, CoreError> {
    let list = match timeout(
        options.call_timeout,
        graph.following(fid, options.follow_limit),
    )
    .await
    {
        Ok(result) => result?,
        Err(_) => return Err(CoreError::ProviderTimeout(options.call_timeout.as_secs())),
    };

    info!(
        count = list.accounts.len(),
        incomplete = list.incomplete,
        "Fetched follow list"
    );

    let mut dropped = list.incomplete;
    let mut entries = Vec::with_capacity(list.accounts.len());

    for batch in list.accounts.chunks(options.batch_size.max(1)) {
        let fetches = batch.iter().map(|account| async move {
            match timeout(
                options.call_timeout,
                cache.get_or_fetch(account.fid, || graph.storage_usage(account.fid)),
            )
            .await
            {
                Ok(Ok(Some(usage))) => Some(usage),
                Ok(Ok(None)) => {
                    debug!(fid = %account.fid, "Incomplete usage record, dropping");
                    None
                }
                Ok(Err(e)) => {
                    warn!(fid = %account.fid, error = %e, "Usage fetch failed, dropping");
                    None
                }
                Err(_) => {
                    warn!(fid = %account.fid, "Usage fetch timed out, dropping");
                    None
                }
            }
        });

        // Re-associate results positionally, never by completion order.
        let results = join_all(fetches).await;
        for (account, usage) in batch.iter().zip(results) {
            match usage {
                Some(usage) => entries.push(RankedEntry::new(account.clone(), usage)),
                None => dropped += 1,
            }
        }
    }

    // Stable sort: ties keep follow-list order.
    entries.sort_by_key(|entry| entry.total_remaining);

    info!(ranked = entries.len(), dropped, "Ranking complete");
    Ok(Ranking { entries, dropped })
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::collections::{HashMap, HashSet};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use storagift_core::{CategoryUsage, FollowList, FollowedAccount, StorageUsage, UserProfile};

    fn account(fid: u64) -> FollowedAccount {
        FollowedAccount {
            fid: Fid(fid),
            username: format!("user{fid}"),
            display_name: None,
            avatar_url: format!("https://example.com/{fid}.png"),
        }
    }

    fn usage(remaining: u64) -> StorageUsage {
        StorageUsage::new(
            CategoryUsage::new(remaining, 0),
            CategoryUsage::new(100, 100),
            CategoryUsage::new(50, 50),
        )
    }

    #[derive(Default)]
    struct MockGraph {
        accounts: Vec<FollowedAccount>,
        incomplete_profiles: usize,
        /// Remaining storage per fid; absent = incomplete usage record.
        remaining: HashMap<u64, u64>,
        /// Fids whose usage fetch errors out.
        failing: HashSet<u64>,
        fail_following: bool,
        following_delay: Option<Duration>,
        usage_delay: Option<Duration>,
        usage_calls: AtomicUsize,
        in_flight: AtomicUsize,
        max_in_flight: AtomicUsize,
    }

    impl MockGraph {
        fn with_remaining(values: &[(u64, u64)]) -> Self {
            Self {
                accounts: values.iter().map(|(fid, _)| account(*fid)).collect(),
                remaining: values.iter().copied().collect(),
                ..Self::default()
            }
        }
    }

    #[async_trait]
    impl SocialGraph for MockGraph {
        async fn following(&self, _fid: Fid, limit: usize) -> Result<FollowList, CoreError> {
            if let Some(delay) = self.following_delay {
                tokio::time::sleep(delay).await;
            }
            if self.fail_following {
                return Err(CoreError::ProviderUnavailable("HTTP 502".to_string()));
            }
            Ok(FollowList {
                accounts: self.accounts.iter().take(limit).cloned().collect(),
                incomplete: self.incomplete_profiles,
            })
        }

        async fn storage_usage(&self, fid: Fid) -> Result<Option<StorageUsage>, CoreError> {
            self.usage_calls.fetch_add(1, Ordering::SeqCst);
            let current = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.max_in_flight.fetch_max(current, Ordering::SeqCst);
            tokio::time::sleep(self.usage_delay.unwrap_or(Duration::from_millis(5))).await;
            self.in_flight.fetch_sub(1, Ordering::SeqCst);

            if self.failing.contains(&fid.0) {
                return Err(CoreError::ProviderUnavailable("HTTP 500".to_string()));
            }
            Ok(self.remaining.get(&fid.0).copied().map(usage))
        }

        async fn users_by_fids(&self, fids: &[Fid]) -> Result<Vec<UserProfile>, CoreError> {
            Ok(fids
                .iter()
                .map(|fid| UserProfile {
                    fid: *fid,
                    username: format!("user{fid}"),
                    display_name: None,
                    avatar_url: None,
                })
                .collect())
        }
    }

    #[tokio::test]
    async fn test_ranked_ascending_with_suggested_recipient() {
        // Remaining {50, 0, 120} ranks as [0, 50, 120].
        let graph = MockGraph::with_remaining(&[(1, 50), (2, 0), (3, 120)]);
        let cache = UsageCache::new();

        let ranking = rank_followed_by_storage(&graph, &cache, Fid(99), &RankOptions::default())
            .await
            .unwrap();

        let order: Vec<u64> = ranking.entries().iter().map(|e| e.account.fid.0).collect();
        assert_eq!(order, vec![2, 1, 3]);
        assert_eq!(ranking.suggested().unwrap().account.fid, Fid(2));

        let page = ranking.page(1, &PageParams::default());
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].account.fid, Fid(2));
        assert_eq!(page.total_pages, 3);
    }

    #[tokio::test]
    async fn test_ties_keep_follow_list_order() {
        let graph = MockGraph::with_remaining(&[(10, 7), (20, 7), (30, 3), (40, 7)]);
        let cache = UsageCache::new();

        let ranking = rank_followed_by_storage(&graph, &cache, Fid(99), &RankOptions::default())
            .await
            .unwrap();

        let order: Vec<u64> = ranking.entries().iter().map(|e| e.account.fid.0).collect();
        assert_eq!(order, vec![30, 10, 20, 40]);
    }

    #[tokio::test]
    async fn test_incomplete_usage_record_is_dropped_not_zeroed() {
        let mut graph = MockGraph::with_remaining(&[(1, 50), (3, 120)]);
        // Fid 2 is followed but its usage payload is incomplete.
        graph.accounts.insert(1, account(2));
        let cache = UsageCache::new();

        let ranking = rank_followed_by_storage(&graph, &cache, Fid(99), &RankOptions::default())
            .await
            .unwrap();

        assert_eq!(ranking.len(), 2);
        assert!(ranking.entries().iter().all(|e| e.account.fid != Fid(2)));
        assert_eq!(ranking.dropped, 1);
    }

    #[tokio::test]
    async fn test_primary_fetch_failure_is_fatal() {
        let graph = MockGraph {
            fail_following: true,
            ..MockGraph::default()
        };
        let cache = UsageCache::new();

        let err = rank_followed_by_storage(&graph, &cache, Fid(99), &RankOptions::default())
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::ProviderUnavailable(_)));
    }

    #[tokio::test]
    async fn test_primary_fetch_timeout_is_distinct() {
        let graph = MockGraph {
            following_delay: Some(Duration::from_millis(200)),
            ..MockGraph::default()
        };
        let cache = UsageCache::new();
        let options = RankOptions {
            call_timeout: Duration::from_millis(20),
            ..RankOptions::default()
        };

        let err = rank_followed_by_storage(&graph, &cache, Fid(99), &options)
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::ProviderTimeout(_)));
    }

    #[tokio::test]
    async fn test_per_account_failure_drops_only_that_entry() {
        let mut graph = MockGraph::with_remaining(&[(1, 50), (2, 10), (3, 120)]);
        graph.failing.insert(2);
        let cache = UsageCache::new();

        let ranking = rank_followed_by_storage(&graph, &cache, Fid(99), &RankOptions::default())
            .await
            .unwrap();

        let order: Vec<u64> = ranking.entries().iter().map(|e| e.account.fid.0).collect();
        assert_eq!(order, vec![1, 3]);
        assert_eq!(ranking.dropped, 1);
    }

    #[tokio::test]
    async fn test_batching_bounds_concurrency() {
        let values: Vec<(u64, u64)> = (1..=120).map(|fid| (fid, fid)).collect();
        let graph = MockGraph::with_remaining(&values);
        let cache = UsageCache::new();
        let options = RankOptions {
            follow_limit: 120,
            ..RankOptions::default()
        };

        let ranking = rank_followed_by_storage(&graph, &cache, Fid(99), &options)
            .await
            .unwrap();

        assert_eq!(ranking.len(), 120);
        assert_eq!(graph.usage_calls.load(Ordering::SeqCst), 120);
        // Each batch is internally concurrent, and the batch size is the
        // ceiling on in-flight usage fetches.
        assert_eq!(graph.max_in_flight.load(Ordering::SeqCst), DEFAULT_BATCH_SIZE);
    }

    #[tokio::test]
    async fn test_follow_limit_caps_the_fetch() {
        let values: Vec<(u64, u64)> = (1..=50).map(|fid| (fid, fid)).collect();
        let graph = MockGraph::with_remaining(&values);
        let cache = UsageCache::new();
        let options = RankOptions {
            follow_limit: 10,
            ..RankOptions::default()
        };

        let ranking = rank_followed_by_storage(&graph, &cache, Fid(99), &options)
            .await
            .unwrap();
        assert_eq!(ranking.len(), 10);
    }

    #[tokio::test]
    async fn test_shared_cache_skips_refetch_on_second_ranking() {
        let graph = MockGraph::with_remaining(&[(1, 50), (2, 0), (3, 120)]);
        let cache = UsageCache::new();
        let options = RankOptions::default();

        let first = rank_followed_by_storage(&graph, &cache, Fid(99), &options)
            .await
            .unwrap();
        let second = rank_followed_by_storage(&graph, &cache, Fid(99), &options)
            .await
            .unwrap();

        assert_eq!(first.len(), second.len());
        // Three accounts, fetched once each across both rankings.
        assert_eq!(graph.usage_calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_incomplete_profiles_counted_as_dropped() {
        let mut graph = MockGraph::with_remaining(&[(1, 50)]);
        graph.incomplete_profiles = 2;
        let cache = UsageCache::new();

        let ranking = rank_followed_by_storage(&graph, &cache, Fid(99), &RankOptions::default())
            .await
            .unwrap();
        assert_eq!(ranking.len(), 1);
        assert_eq!(ranking.dropped, 2);
    }

    #[tokio::test]
    async fn test_empty_follow_list_yields_empty_ranking() {
        let graph = MockGraph::default();
        let cache = UsageCache::new();

        let ranking = rank_followed_by_storage(&graph, &cache, Fid(99), &RankOptions::default())
            .await
            .unwrap();
        assert!(ranking.is_empty());
        assert!(ranking.suggested().is_none());

        let page = ranking.page(1, &PageParams::default());
        assert!(page.is_empty());
        assert_eq!(page.total_pages, 0);
    }
}
