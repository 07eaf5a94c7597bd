// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # Storagift Core
//!
//! Core types, models, and traits for the Storagift application.
//!
//! This crate provides the foundational abstractions used across all other
//! Storagift crates, including:
//!
//! - Domain models (accounts, storage usage, ranked entries, pages)
//! - Error types
//! - Trait definitions for the external collaborators
//!
//! ## Key Types
//!
//! ### Account Types
//! - [`Fid`] - Opaque numeric account identifier
//! - [`FollowedAccount`] - Follow-list snapshot of one account
//! - [`FollowList`] - One follow-list fetch plus its dropped-entry count
//! - [`UserProfile`] - Bulk user-lookup profile
//!
//! ### Usage Types
//! - [`CategoryUsage`] - Capacity/used for one resource category
//! - [`StorageUsage`] - Complete three-category usage record
//! - [`RankedEntry`] - Account plus computed storage headroom
//!
//! ### Pagination
//! - [`PageParams`] / [`Page`] - Paging over a materialized ranking
//!
//! ### Collaborator Seams
//! - [`SocialGraph`] - Follow lists, storage usage, user lookup
//! - [`PaymentGateway`] - Payment-session lifecycle for gifting

pub mod error;
pub mod models;
pub mod traits;

// Re-export error types
pub use error::CoreError;

// Re-export all model types
pub use models::{
    // Account types
    Fid,
    FollowList,
    FollowedAccount,
    UserProfile,
    // Usage types
    CategoryUsage,
    RankedEntry,
    StorageUsage,
    // Pagination
    paginate,
    total_pages,
    Page,
    PageParams,
};

// Re-export traits and gateway types
pub use traits::{GiftParams, PaymentGateway, PaymentSession, SocialGraph, UnsignedTransaction};
