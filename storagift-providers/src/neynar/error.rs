//! Neynar-specific errors.

use storagift_core::CoreError;
use storagift_fetch::FetchError;
use thiserror::Error;

/// Neynar-specific errors.
#[derive(Debug, Error)]
pub enum NeynarError {
    /// HTTP-level failure.
    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    /// Response body did not match the expected shape.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl From<NeynarError> for CoreError {
    fn from(err: NeynarError) -> Self {
        match err {
            NeynarError::Fetch(e) => e.into(),
            NeynarError::InvalidResponse(msg) => CoreError::ProviderUnavailable(msg),
        }
    }
}
