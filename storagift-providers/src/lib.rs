//! External provider clients for Storagift.
//!
//! Each provider lives in its own module with an API client, wire-format
//! parsing, and an error type that maps into [`storagift_core::CoreError`]:
//!
//! - [`neynar`] — the social-graph provider (follow lists, storage usage,
//!   profile lookups)
//! - [`contract`] — the on-chain storage registry (rent-price quotes,
//!   `rent` calldata)
//! - [`glide`] — the payment-abstraction gateway (gift payment sessions)

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod contract;
pub mod glide;
pub mod neynar;

pub use contract::{ContractError, StorageRegistryClient, STORAGE_REGISTRY_ADDRESS};
pub use glide::{GlideClient, GlideError};
pub use neynar::{NeynarClient, NeynarError};
