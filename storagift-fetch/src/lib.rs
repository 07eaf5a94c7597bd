// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # Storagift Fetch
//!
//! HTTP plumbing and the storage-ranking pipeline for Storagift.
//!
//! This crate provides:
//!
//! - [`client::HttpClient`] - reqwest wrapper with retry and timeout
//! - [`cache::UsageCache`] - bounded LRU cache with atomic get-or-fetch
//! - [`pipeline::rank_followed_by_storage`] - the ranking pipeline
//!
//! ## Example
//!
//! ```ignore
//! use storagift_fetch::{rank_followed_by_storage, RankOptions, UsageCache};
//!
//! let cache = UsageCache::new();
//! let ranking = rank_followed_by_storage(&graph, &cache, fid, &RankOptions::default()).await?;
//!
//! let page = ranking.page(1, &PageParams::default());
//! let recipient = ranking.suggested();
//! ```

pub mod cache;
pub mod client;
pub mod error;
pub mod pipeline;
pub mod retry;

// Re-export key types at crate root
pub use cache::{UsageCache, DEFAULT_CACHE_CAPACITY};
pub use client::HttpClient;
pub use error::FetchError;
pub use pipeline::{
    rank_followed_by_storage, RankOptions, Ranking, DEFAULT_BATCH_SIZE, DEFAULT_CALL_TIMEOUT_SECS,
    DEFAULT_FOLLOW_LIMIT,
};
pub use retry::RetryStrategy;
