//! Neynar API client.

use async_trait::async_trait;
use tracing::{debug, instrument};

use storagift_core::{CoreError, Fid, FollowList, SocialGraph, StorageUsage, UserProfile};
use storagift_fetch::HttpClient;

use super::error::NeynarError;
use super::parser;

// ============================================================================
// Constants
// ============================================================================

/// Neynar v2 API base URL.
pub const NEYNAR_API_BASE: &str = "https://api.neynar.com/v2/farcaster";

/// Header carrying the API key.
const API_KEY_HEADER: &str = "api_key";

/// Follow-list endpoint.
const FOLLOWING_ENDPOINT: &str = "/following";

/// Storage-usage endpoint.
const STORAGE_USAGE_ENDPOINT: &str = "/storage/usage";

/// Bulk user-lookup endpoint.
const USER_BULK_ENDPOINT: &str = "/user/bulk";

// ============================================================================
// API Client
// ============================================================================

/// Client for the Neynar social-graph API.
#[derive(Debug, Clone)]
pub struct NeynarClient {
    http: HttpClient,
    base_url: String,
    api_key: String,
}

impl NeynarClient {
    /// Creates a client against the public API base.
    pub fn new(http: HttpClient, api_key: impl Into<String>) -> Self {
        Self::with_base_url(http, NEYNAR_API_BASE, api_key)
    }

    /// Creates a client against a custom base URL (hosted hubs, tests).
    pub fn with_base_url(
        http: HttpClient,
        base_url: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }

    async fn get_text(&self, path_and_query: &str) -> Result<String, NeynarError> {
        let url = format!("{}{}", self.base_url, path_and_query);
        let response = self
            .http
            .get_with_key(&url, API_KEY_HEADER, &self.api_key)
            .await?;
        Ok(response.text().await.map_err(storagift_fetch::FetchError::from)?)
    }

    /// Fetches the follow list for `fid`, capped at `limit`.
    #[instrument(skip(self))]
    pub async fn fetch_following(&self, fid: Fid, limit: usize) -> Result<FollowList, NeynarError> {
        debug!("Fetching follow list");
        let body = self
            .get_text(&format!("{FOLLOWING_ENDPOINT}?fid={fid}&limit={limit}"))
            .await?;
        parser::parse_following(&body)
    }

    /// Fetches one account's storage usage.
    ///
    /// `Ok(None)` means the payload was missing a category; the account is
    /// excluded from ranking.
    #[instrument(skip(self))]
    pub async fn fetch_storage_usage(&self, fid: Fid) -> Result<Option<StorageUsage>, NeynarError> {
        debug!("Fetching storage usage");
        let body = self
            .get_text(&format!("{STORAGE_USAGE_ENDPOINT}?fid={fid}"))
            .await?;
        parser::parse_storage_usage(&body)
    }

    /// Looks up profiles for a set of fids.
    #[instrument(skip(self, fids), fields(count = fids.len()))]
    pub async fn fetch_users(&self, fids: &[Fid]) -> Result<Vec<UserProfile>, NeynarError> {
        if fids.is_empty() {
            return Ok(Vec::new());
        }
        let joined = fids
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(",");
        let body = self
            .get_text(&format!("{USER_BULK_ENDPOINT}?fids={joined}"))
            .await?;
        parser::parse_user_bulk(&body)
    }
}

#[async_trait]
impl SocialGraph for NeynarClient {
    async fn following(&self, fid: Fid, limit: usize) -> Result<FollowList, CoreError> {
        Ok(self.fetch_following(fid, limit).await?)
    }

    async fn storage_usage(&self, fid: Fid) -> Result<Option<StorageUsage>, CoreError> {
        Ok(self.fetch_storage_usage(fid).await?)
    }

    async fn users_by_fids(&self, fids: &[Fid]) -> Result<Vec<UserProfile>, CoreError> {
        Ok(self.fetch_users(fids).await?)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client =
            NeynarClient::with_base_url(HttpClient::default(), "https://hub.example/v2/", "key");
        assert_eq!(client.base_url, "https://hub.example/v2");
    }
}
