//! Trait definitions for Storagift.
//!
//! These are the seams between the ranking pipeline and its external
//! collaborators: the social graph provider and the payment gateway.
//! The pipeline only ever talks to these traits, so tests can substitute
//! in-memory mocks.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::models::{Fid, FollowList, StorageUsage, UserProfile};

// ============================================================================
// Social Graph
// ============================================================================

/// The social-graph data provider.
///
/// Implementors are responsible for authenticating with the provider,
/// fetching follow lists and storage usage, and normalizing responses into
/// core types. Error mapping contract:
///
/// - endpoint-level failure or malformed response → [`CoreError::ProviderUnavailable`]
/// - no answer within the configured timeout → [`CoreError::ProviderTimeout`]
/// - per-record incompleteness → `Ok(None)` / the `incomplete` counter,
///   never an error
#[async_trait]
pub trait SocialGraph: Send + Sync {
    /// Fetches the accounts `fid` follows, capped at `limit` entries.
    ///
    /// Entries missing a username, avatar, or numeric id are dropped and
    /// counted in [`FollowList::incomplete`].
    async fn following(&self, fid: Fid, limit: usize) -> Result<FollowList, CoreError>;

    /// Fetches one account's storage usage.
    ///
    /// Returns `Ok(None)` when the provider payload lacks any of the three
    /// tracked categories; the caller excludes such accounts from ranking.
    async fn storage_usage(&self, fid: Fid) -> Result<Option<StorageUsage>, CoreError>;

    /// Looks up profiles for a set of accounts.
    async fn users_by_fids(&self, fids: &[Fid]) -> Result<Vec<UserProfile>, CoreError>;
}

// ============================================================================
// Payment Gateway
// ============================================================================

/// Parameters for a storage gift payment session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GiftParams {
    /// Wallet address paying for the gift.
    pub payer_address: String,
    /// CAIP-2 chain id the payment settles on.
    pub chain_id: String,
    /// Currency identifier the payer is restricted to, if any.
    pub payment_currency: Option<String>,
    /// Account receiving the storage units.
    pub recipient_fid: Fid,
    /// Number of storage units to gift.
    pub units: u64,
}

/// An unsigned transaction produced by the payment gateway.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnsignedTransaction {
    /// Target contract address.
    pub to: String,
    /// ABI-encoded calldata, 0x-prefixed hex.
    pub input: String,
    /// Value in wei, 0x-prefixed hex.
    pub value: String,
}

/// A payment session tracked by the gateway.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentSession {
    /// Gateway session identifier.
    pub session_id: String,
    /// Transaction for the payer to sign, once the session is ready.
    pub unsigned_transaction: Option<UnsignedTransaction>,
    /// Hash of the sponsored transaction, once settled.
    pub sponsored_transaction_hash: Option<String>,
}

/// The payment-abstraction collaborator (session create / poll / attach).
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Creates a payment session for a storage gift.
    async fn create_session(&self, params: &GiftParams) -> Result<PaymentSession, CoreError>;

    /// Fetches a session by its identifier.
    async fn session_by_id(&self, session_id: &str) -> Result<PaymentSession, CoreError>;

    /// Attaches the payer's transaction hash to a session.
    ///
    /// Returns the gateway's success flag.
    async fn update_payment_transaction(
        &self,
        session_id: &str,
        tx_hash: &str,
    ) -> Result<bool, CoreError>;
}
