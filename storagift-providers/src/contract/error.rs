//! Storage-registry errors.

use storagift_core::CoreError;
use storagift_fetch::FetchError;
use thiserror::Error;

/// Errors from the storage-registry read client.
#[derive(Debug, Error)]
pub enum ContractError {
    /// HTTP-level failure.
    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    /// The RPC node returned an error object.
    #[error("RPC error: {0}")]
    Rpc(String),

    /// Response body did not match the expected shape.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Returned word could not be decoded.
    #[error("Decode error: {0}")]
    Decode(String),
}

impl From<ContractError> for CoreError {
    fn from(err: ContractError) -> Self {
        match err {
            ContractError::Fetch(e) => e.into(),
            other => CoreError::ProviderUnavailable(other.to_string()),
        }
    }
}
