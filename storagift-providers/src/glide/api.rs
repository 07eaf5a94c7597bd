//! Glide API client.

use async_trait::async_trait;
use tracing::{debug, instrument};

use storagift_core::{CoreError, GiftParams, PaymentGateway, PaymentSession};
use storagift_fetch::{FetchError, HttpClient};

use crate::contract::StorageRegistryClient;

use super::error::GlideError;
use super::parser::{self, CreateSessionRequest, PaymentTransactionRequest, WireTransaction};

// ============================================================================
// Constants
// ============================================================================

/// Glide API base URL.
pub const GLIDE_API_BASE: &str = "https://api.paywithglide.xyz/v1";

/// Header carrying the project id.
const PROJECT_ID_HEADER: &str = "x-glide-project-id";

// ============================================================================
// API Client
// ============================================================================

/// Client for the Glide payment-abstraction gateway.
///
/// Sessions wrap an unsigned `rent` call against the storage registry; the
/// registry client supplies the calldata and a fresh price quote so the
/// attached value never goes stale.
#[derive(Debug, Clone)]
pub struct GlideClient {
    http: HttpClient,
    base_url: String,
    project_id: String,
    registry: StorageRegistryClient,
    registry_chain: String,
}

impl GlideClient {
    /// Creates a client against the public API base.
    pub fn new(
        http: HttpClient,
        project_id: impl Into<String>,
        registry: StorageRegistryClient,
        registry_chain: impl Into<String>,
    ) -> Self {
        Self::with_base_url(http, GLIDE_API_BASE, project_id, registry, registry_chain)
    }

    /// Creates a client against a custom base URL (staging, tests).
    pub fn with_base_url(
        http: HttpClient,
        base_url: impl Into<String>,
        project_id: impl Into<String>,
        registry: StorageRegistryClient,
        registry_chain: impl Into<String>,
    ) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            project_id: project_id.into(),
            registry,
            registry_chain: registry_chain.into(),
        }
    }

    async fn post(&self, path: &str, body: &impl serde::Serialize) -> Result<String, GlideError> {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .http
            .post_json_with_key(&url, PROJECT_ID_HEADER, &self.project_id, body)
            .await?;
        Ok(response.text().await.map_err(FetchError::from)?)
    }

    async fn get(&self, path: &str) -> Result<String, GlideError> {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .http
            .get_with_key(&url, PROJECT_ID_HEADER, &self.project_id)
            .await?;
        Ok(response.text().await.map_err(FetchError::from)?)
    }

    /// Opens a payment session for a storage gift.
    #[instrument(skip(self, params), fields(recipient = %params.recipient_fid, units = params.units))]
    pub async fn open_session(&self, params: &GiftParams) -> Result<PaymentSession, GlideError> {
        debug!("Creating payment session");

        let price = self
            .registry
            .price(params.units)
            .await
            .map_err(|e| GlideError::SessionRejected(format!("price quote failed: {e}")))?;
        let tx = self
            .registry
            .rent_transaction(params.recipient_fid.0, params.units, price);

        let request = CreateSessionRequest {
            chain_id: params.chain_id.clone(),
            account: params.payer_address.clone(),
            payment_currency: params.payment_currency.clone(),
            transaction: WireTransaction {
                chain_id: self.registry_chain.clone(),
                to: tx.to,
                input: tx.input,
                value: tx.value,
            },
        };

        let body = self.post("/sessions", &request).await?;
        let session = parser::parse_session(&body)?;

        // A fresh session must carry the transaction for the payer to sign.
        if session.unsigned_transaction.is_none() {
            return Err(GlideError::SessionRejected(
                "session created without an unsigned transaction".to_string(),
            ));
        }
        Ok(session)
    }

    /// Fetches the current state of a session.
    #[instrument(skip(self))]
    pub async fn fetch_session(&self, session_id: &str) -> Result<PaymentSession, GlideError> {
        debug!("Fetching payment session");
        let body = self.get(&format!("/sessions/{session_id}")).await?;
        parser::parse_session(&body)
    }

    /// Attaches the payer's signed transaction hash to a session.
    #[instrument(skip(self))]
    pub async fn attach_payment_transaction(
        &self,
        session_id: &str,
        tx_hash: &str,
    ) -> Result<bool, GlideError> {
        debug!("Attaching payment transaction");
        let request = PaymentTransactionRequest {
            tx_hash: tx_hash.to_string(),
        };
        let body = self
            .post(&format!("/sessions/{session_id}/payment-transaction"), &request)
            .await?;
        parser::parse_payment_ack(&body)
    }
}

#[async_trait]
impl PaymentGateway for GlideClient {
    async fn create_session(&self, params: &GiftParams) -> Result<PaymentSession, CoreError> {
        Ok(self.open_session(params).await?)
    }

    async fn session_by_id(&self, session_id: &str) -> Result<PaymentSession, CoreError> {
        Ok(self.fetch_session(session_id).await?)
    }

    async fn update_payment_transaction(
        &self,
        session_id: &str,
        tx_hash: &str,
    ) -> Result<bool, CoreError> {
        Ok(self.attach_payment_transaction(session_id, tx_hash).await?)
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
        let registry = StorageRegistryClient::new(HttpClient::default(), "https://rpc.example");
        let client = GlideClient::with_base_url(
            HttpClient::default(),
            "https://gw.example/v1/",
            "proj",
            registry,
            "eip155:10",
        );
        assert_eq!(client.base_url, "https://gw.example/v1");
    }
}
