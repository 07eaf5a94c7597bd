//! Account-related types.
//!
//! These are immutable snapshots from the social graph provider: they exist
//! for the duration of one ranking computation and have no lifecycle of
//! their own.

use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Fid
// ============================================================================

/// The opaque numeric identifier for an account in the social graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Fid(pub u64);

impl Fid {
    /// Returns the raw numeric value.
    pub fn value(self) -> u64 {
        self.0
    }
}

impl From<u64> for Fid {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl fmt::Display for Fid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// Followed Account
// ============================================================================

/// A followed account as returned by the follow-list endpoint.
///
/// Only complete entries become a `FollowedAccount`; provider entries
/// missing a fid, username, or avatar URL are dropped during parsing and
/// counted in [`FollowList::incomplete`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FollowedAccount {
    /// Account identifier.
    pub fid: Fid,
    /// Handle, without the leading `@`.
    pub username: String,
    /// Display name, if the account set one.
    pub display_name: Option<String>,
    /// Profile picture URL.
    pub avatar_url: String,
}

/// One follow-list fetch, with the number of entries dropped for missing
/// fields made observable.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FollowList {
    /// Accounts with a complete profile, in provider order.
    pub accounts: Vec<FollowedAccount>,
    /// Entries dropped because the provider record lacked a username,
    /// avatar, or numeric identifier.
    pub incomplete: usize,
}

impl FollowList {
    /// Returns the number of usable accounts.
    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    /// Returns true if no usable accounts were returned.
    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }
}

// ============================================================================
// User Profile
// ============================================================================

/// A profile from the bulk user lookup, used by the gift confirmation step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Account identifier.
    pub fid: Fid,
    /// Handle, without the leading `@`.
    pub username: String,
    /// Display name, if set.
    pub display_name: Option<String>,
    /// Profile picture URL, if set.
    pub avatar_url: Option<String>,
}

// ============================================================================
// Tests
// ============================================================================
