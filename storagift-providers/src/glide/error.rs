//! Payment-gateway errors.

use storagift_core::CoreError;
use storagift_fetch::FetchError;
use thiserror::Error;

/// Errors from the Glide payment gateway client.
#[derive(Debug, Error)]
pub enum GlideError {
    /// HTTP-level failure.
    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    /// Response body did not match the expected shape.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// The gateway rejected the session request.
    #[error("Session rejected: {0}")]
    SessionRejected(String),
}

impl From<GlideError> for CoreError {
    fn from(err: GlideError) -> Self {
        match err {
            GlideError::Fetch(e) => e.into(),
            other => CoreError::ProviderUnavailable(other.to_string()),
        }
    }
}
