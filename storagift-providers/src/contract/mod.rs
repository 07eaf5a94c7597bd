//! Storage-registry contract provider.
//!
//! Encodes `rent`/`price` calls for the on-chain storage registry and
//! quotes rent prices over JSON-RPC.

pub(crate) mod abi;
mod error;
mod registry;

pub use error::ContractError;
pub use registry::{StorageRegistryClient, STORAGE_REGISTRY_ADDRESS, STORAGE_REGISTRY_CHAIN};
