//! Fetch error types.

use storagift_core::CoreError;
use thiserror::Error;

/// Error type for HTTP-level fetch operations.
#[derive(Debug, Error)]
pub enum FetchError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Request timed out.
    #[error("Request timed out after {0} seconds")]
    Timeout(u64),

    /// Rate limited by the provider.
    #[error("Rate limited, retry after {retry_after:?} seconds")]
    RateLimited {
        /// Seconds to wait before retrying.
        retry_after: Option<u64>,
    },

    /// Authentication failed (rejected API key).
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    /// Invalid response from the provider.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// JSON parsing error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Core error.
    #[error("Core error: {0}")]
    Core(CoreError),
}

impl From<FetchError> for CoreError {
    /// Collapses transport-level errors into the pipeline taxonomy:
    /// timeouts stay distinct, everything else is a provider failure.
    fn from(err: FetchError) -> Self {
        match err {
            FetchError::Timeout(secs) => CoreError::ProviderTimeout(secs),
            FetchError::Http(e) if e.is_timeout() => CoreError::ProviderTimeout(0),
            FetchError::Core(e) => e,
            other => CoreError::ProviderUnavailable(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout_maps_to_provider_timeout() {
        let err: CoreError = FetchError::Timeout(10).into();
        assert!(matches!(err, CoreError::ProviderTimeout(10)));
    }

    #[test]
    fn test_invalid_response_maps_to_unavailable() {
        let err: CoreError = FetchError::InvalidResponse("HTTP 502".to_string()).into();
        assert!(matches!(err, CoreError::ProviderUnavailable(_)));
    }

    #[test]
    fn test_core_error_passes_through() {
        let err: CoreError =
            FetchError::Core(CoreError::InvalidData("bad shape".to_string())).into();
        assert!(matches!(err, CoreError::InvalidData(_)));
    }
}
