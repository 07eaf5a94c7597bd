//! Neynar response parsers.
//!
//! The wire shapes here are deliberately lenient: every field is optional
//! and entries that turn out incomplete are dropped (and counted), never
//! defaulted. Only a body that fails to parse as JSON at all is an
//! endpoint-level error.

use serde::Deserialize;
use tracing::debug;

use storagift_core::{
    CategoryUsage, Fid, FollowList, FollowedAccount, StorageUsage, UserProfile,
};

use super::error::NeynarError;

// ============================================================================
// Wire Types
// ============================================================================

/// Response from `GET /following`.
#[derive(Debug, Deserialize)]
pub struct FollowingResponse {
    /// Follow entries, each wrapping the followed user.
    #[serde(default)]
    pub users: Vec<FollowEntry>,
}

/// One entry of the follow list.
#[derive(Debug, Deserialize)]
pub struct FollowEntry {
    /// The followed user record.
    #[serde(default)]
    pub user: Option<WireUser>,
}

/// A user as it appears on the wire.
#[derive(Debug, Deserialize)]
pub struct WireUser {
    /// Numeric account id.
    #[serde(default)]
    pub fid: Option<u64>,
    /// Handle.
    #[serde(default)]
    pub username: Option<String>,
    /// Profile picture URL.
    #[serde(default)]
    pub pfp_url: Option<String>,
    /// Display name.
    #[serde(default)]
    pub display_name: Option<String>,
}

impl WireUser {
    /// Converts to a [`FollowedAccount`] if the record is complete.
    fn into_account(self) -> Option<FollowedAccount> {
        Some(FollowedAccount {
            fid: Fid(self.fid?),
            username: self.username.filter(|u| !u.is_empty())?,
            display_name: self.display_name,
            avatar_url: self.pfp_url.filter(|u| !u.is_empty())?,
        })
    }
}

/// Response from `GET /storage/usage`.
#[derive(Debug, Deserialize)]
pub struct StorageUsageResponse {
    /// Cast storage, if reported.
    #[serde(default)]
    pub casts: Option<WireCategory>,
    /// Reaction storage, if reported.
    #[serde(default)]
    pub reactions: Option<WireCategory>,
    /// Link (follow) storage, if reported.
    #[serde(default)]
    pub links: Option<WireCategory>,
}

/// One storage category on the wire.
#[derive(Debug, Deserialize)]
pub struct WireCategory {
    /// Rented capacity.
    #[serde(default)]
    pub capacity: Option<u64>,
    /// Consumed units.
    #[serde(default)]
    pub used: Option<u64>,
}

impl WireCategory {
    fn into_usage(self) -> Option<CategoryUsage> {
        Some(CategoryUsage::new(self.capacity?, self.used?))
    }
}

/// Response from `GET /user/bulk`.
#[derive(Debug, Deserialize)]
pub struct UserBulkResponse {
    /// Resolved profiles.
    #[serde(default)]
    pub users: Vec<WireUser>,
}

// ============================================================================
// Parsers
// ============================================================================

/// Parses a follow-list body, dropping and counting incomplete entries.
pub fn parse_following(json_str: &str) -> Result<FollowList, NeynarError> {
    let response: FollowingResponse = serde_json::from_str(json_str)
        .map_err(|e| NeynarError::InvalidResponse(format!("Invalid JSON: {e}")))?;

    let total = response.users.len();
    let accounts: Vec<FollowedAccount> = response
        .users
        .into_iter()
        .filter_map(|entry| entry.user.and_then(WireUser::into_account))
        .collect();
    let incomplete = total - accounts.len();

    if incomplete > 0 {
        debug!(incomplete, "Dropped follow entries with missing fields");
    }

    Ok(FollowList {
        accounts,
        incomplete,
    })
}

/// Parses a storage-usage body.
///
/// Returns `Ok(None)` when any of the three categories is missing or
/// partial; the account is then excluded from ranking rather than treated
/// as zero.
pub fn parse_storage_usage(json_str: &str) -> Result<Option<StorageUsage>, NeynarError> {
    let response: StorageUsageResponse = serde_json::from_str(json_str)
        .map_err(|e| NeynarError::InvalidResponse(format!("Invalid JSON: {e}")))?;

    let usage = (|| {
        Some(StorageUsage::new(
            response.casts?.into_usage()?,
            response.reactions?.into_usage()?,
            response.links?.into_usage()?,
        ))
    })();

    Ok(usage)
}

/// Parses a bulk user-lookup body, dropping entries without a fid or
/// username.
pub fn parse_user_bulk(json_str: &str) -> Result<Vec<UserProfile>, NeynarError> {
    let response: UserBulkResponse = serde_json::from_str(json_str)
        .map_err(|e| NeynarError::InvalidResponse(format!("Invalid JSON: {e}")))?;

    Ok(response
        .users
        .into_iter()
        .filter_map(|user| {
            Some(UserProfile {
                fid: Fid(user.fid?),
                username: user.username.filter(|u| !u.is_empty())?,
                display_name: user.display_name,
                avatar_url: user.pfp_url,
            })
        })
        .collect())
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_following_complete() {
        let json = r#"{
            "users": [
                {"user": {"fid": 3, "username": "dwr", "pfp_url": "https://i.example/3.png", "display_name": "Dan"}},
                {"user": {"fid": 2, "username": "v", "pfp_url": "https://i.example/2.png"}}
            ]
        }"#;

        let list = parse_following(json).unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list.incomplete, 0);
        assert_eq!(list.accounts[0].fid, Fid(3));
        assert_eq!(list.accounts[0].display_name.as_deref(), Some("Dan"));
        assert_eq!(list.accounts[1].display_name, None);
    }

    #[test]
    fn test_parse_following_drops_and_counts_incomplete() {
        let json = r#"{
            "users": [
                {"user": {"fid": 1, "username": "ok", "pfp_url": "https://i.example/1.png"}},
                {"user": {"fid": 2, "pfp_url": "https://i.example/2.png"}},
                {"user": {"username": "nofid", "pfp_url": "https://i.example/x.png"}},
                {"user": {"fid": 4, "username": "noavatar"}},
                {}
            ]
        }"#;

        let list = parse_following(json).unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(list.incomplete, 4);
    }

    #[test]
    fn test_parse_following_empty_body() {
        let list = parse_following("{}").unwrap();
        assert!(list.is_empty());
        assert_eq!(list.incomplete, 0);
    }

    #[test]
    fn test_parse_following_malformed_is_error() {
        assert!(parse_following("not json").is_err());
    }

    #[test]
    fn test_parse_storage_usage_complete() {
        let json = r#"{
            "casts": {"capacity": 5000, "used": 4400},
            "reactions": {"capacity": 2500, "used": 2500},
            "links": {"capacity": 2500, "used": 1000}
        }"#;

        let usage = parse_storage_usage(json).unwrap().unwrap();
        assert_eq!(usage.total_remaining(), 600 + 0 + 1500);
    }

    #[test]
    fn test_parse_storage_usage_missing_category_is_none() {
        let json = r#"{
            "casts": {"capacity": 5000, "used": 4400},
            "reactions": {"capacity": 2500, "used": 2500}
        }"#;
        assert!(parse_storage_usage(json).unwrap().is_none());
    }

    #[test]
    fn test_parse_storage_usage_partial_category_is_none() {
        let json = r#"{
            "casts": {"capacity": 5000},
            "reactions": {"capacity": 2500, "used": 2500},
            "links": {"capacity": 2500, "used": 1000}
        }"#;
        assert!(parse_storage_usage(json).unwrap().is_none());
    }

    #[test]
    fn test_parse_user_bulk() {
        let json = r#"{
            "users": [
                {"fid": 16098, "username": "gifter", "display_name": "The Gifter"},
                {"username": "ghost"}
            ]
        }"#;

        let profiles = parse_user_bulk(json).unwrap();
        assert_eq!(profiles.len(), 1);
        assert_eq!(profiles[0].fid, Fid(16098));
        assert_eq!(profiles[0].avatar_url, None);
    }
}
