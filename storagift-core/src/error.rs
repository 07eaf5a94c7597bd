//! Core error types for Storagift.

use thiserror::Error;

/// Core error type for Storagift operations.
///
/// Per-entry incompleteness (a followed account missing a username, an
/// avatar, or a usage category) is *not* represented here: incomplete
/// records are filtered out of the ranking and counted, never raised.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The provider call failed or returned an unexpected shape.
    ///
    /// Fatal to the pipeline invocation when raised for the primary
    /// follow-list fetch.
    #[error("Provider unavailable: {0}")]
    ProviderUnavailable(String),

    /// The provider call did not answer within the configured timeout.
    ///
    /// Kept distinct from [`CoreError::ProviderUnavailable`] for
    /// testability; user-facing messaging may collapse the two.
    #[error("Provider timed out after {0} seconds")]
    ProviderTimeout(u64),

    /// Invalid data from an API response.
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl CoreError {
    /// Returns true if this error aborts a whole pipeline invocation.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            CoreError::ProviderUnavailable(_) | CoreError::ProviderTimeout(_)
        )
    }
}
