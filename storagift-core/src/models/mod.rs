//! Domain models for Storagift.
//!
//! - [`account`] - Accounts, follow lists, and profiles
//! - [`usage`] - Storage usage and ranked entries
//! - [`page`] - Pagination over materialized rankings

pub mod account;
pub mod page;
pub mod usage;

pub use account::{Fid, FollowList, FollowedAccount, UserProfile};
pub use page::{paginate, total_pages, Page, PageParams};
pub use usage::{CategoryUsage, RankedEntry, StorageUsage};
