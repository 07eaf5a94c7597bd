//! Bounded storage-usage cache.
//!
//! Usage changes slowly, so a record fetched once is reused across ranking
//! invocations that share the cache. The cache is bounded with
//! least-recently-used eviction, and `get_or_fetch` deduplicates concurrent
//! misses on the same key so the provider sees at most one in-flight fetch
//! per account.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::debug;

use storagift_core::{CoreError, Fid, StorageUsage};

/// Default cache capacity, in accounts.
pub const DEFAULT_CACHE_CAPACITY: usize = 512;

// ============================================================================
// Inner State
// ============================================================================

struct CacheEntry {
    usage: StorageUsage,
    last_touched: u64,
}

struct CacheInner {
    entries: HashMap<Fid, CacheEntry>,
    /// Monotonic recency counter.
    tick: u64,
    /// Per-key gates for in-flight fetch deduplication.
    in_flight: HashMap<Fid, Arc<Mutex<()>>>,
}

impl CacheInner {
    /// Returns a clone of the cached record and marks it recently used.
    fn touch(&mut self, fid: Fid) -> Option<StorageUsage> {
        self.tick += 1;
        let tick = self.tick;
        self.entries.get_mut(&fid).map(|entry| {
            entry.last_touched = tick;
            entry.usage.clone()
        })
    }

    fn insert(&mut self, fid: Fid, usage: StorageUsage, capacity: usize) {
        self.tick += 1;
        if !self.entries.contains_key(&fid) && self.entries.len() >= capacity {
            // Evict the least-recently-touched entry.
            if let Some(victim) = self
                .entries
                .iter()
                .min_by_key(|(_, e)| e.last_touched)
                .map(|(k, _)| *k)
            {
                debug!(fid = %victim, "Evicting least-recently-used usage record");
                self.entries.remove(&victim);
            }
        }
        self.entries.insert(
            fid,
            CacheEntry {
                usage,
                last_touched: self.tick,
            },
        );
    }
}

// ============================================================================
// Usage Cache
// ============================================================================

/// Bounded LRU cache of [`StorageUsage`] records keyed by [`Fid`].
///
/// Owned by the caller of the ranking pipeline and passed by reference, so
/// repeated rankings can share previously fetched records.
pub struct UsageCache {
    capacity: usize,
    inner: Mutex<CacheInner>,
}

impl UsageCache {
    /// Creates a cache with the default capacity.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CACHE_CAPACITY)
    }

    /// Creates a cache holding at most `capacity` records.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            inner: Mutex::new(CacheInner {
                entries: HashMap::new(),
                tick: 0,
                in_flight: HashMap::new(),
            }),
        }
    }

    /// Returns the cached record for `fid`, if any, marking it recently used.
    pub async fn get(&self, fid: Fid) -> Option<StorageUsage> {
        self.inner.lock().await.touch(fid)
    }

    /// Inserts a record, evicting the least-recently-used entry at capacity.
    pub async fn insert(&self, fid: Fid, usage: StorageUsage) {
        self.inner.lock().await.insert(fid, usage, self.capacity);
    }

    /// Returns the number of cached records.
    pub async fn len(&self) -> usize {
        self.inner.lock().await.entries.len()
    }

    /// Returns true if the cache holds no records.
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Atomic check-and-fetch.
    ///
    /// On a hit the stored record is returned without calling `fetch`.
    /// On a miss, concurrent callers for the same key are serialized on a
    /// per-key gate: exactly one runs `fetch`, the rest observe its result
    /// from the cache. `Ok(None)` (incomplete record) and errors are not
    /// cached, so a later call may retry the provider.
    pub async fn get_or_fetch<F, Fut>(
        &self,
        fid: Fid,
        fetch: F,
    ) -> Result<Option<StorageUsage>, CoreError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Option<StorageUsage>, CoreError>>,
    {
        // Fast path: hit without touching the per-key gate.
        if let Some(hit) = self.inner.lock().await.touch(fid) {
            return Ok(Some(hit));
        }

        let gate = {
            let mut inner = self.inner.lock().await;
            // Prune gates abandoned by cancelled callers: an entry only the
            // map itself still references has no fetcher and no waiters.
            inner
                .in_flight
                .retain(|_, gate| Arc::strong_count(gate) > 1);
            inner
                .in_flight
                .entry(fid)
                .or_insert_with(|| Arc::new(Mutex::new(())))
                .clone()
        };
        let _guard = gate.lock().await;

        // Re-check under the gate: a concurrent caller may have filled it.
        if let Some(hit) = self.inner.lock().await.touch(fid) {
            return Ok(Some(hit));
        }

        let result = fetch().await;

        let mut inner = self.inner.lock().await;
        inner.in_flight.remove(&fid);
        if let Ok(Some(ref usage)) = result {
            inner.insert(fid, usage.clone(), self.capacity);
        }
        result
    }

    /// Number of live per-key gates.
    #[cfg(test)]
    async fn in_flight_len(&self) -> usize {
        self.inner.lock().await.in_flight.len()
    }
}

impl Default for UsageCache {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Tests
// ============================================================================
