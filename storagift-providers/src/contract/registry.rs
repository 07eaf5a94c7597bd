//! Storage-registry read client.
//!
//! A thin JSON-RPC `eth_call` client against the deployed storage-rental
//! contract. Only the `price` read is performed over the wire; the `rent`
//! write call is encoded here but signed and submitted through the payment
//! gateway.

use serde::Deserialize;
use serde_json::json;
use tracing::{debug, instrument};

use storagift_core::UnsignedTransaction;
use storagift_fetch::{FetchError, HttpClient};

use super::abi;
use super::error::ContractError;

/// Deployed storage registry on OP Mainnet.
pub const STORAGE_REGISTRY_ADDRESS: &str = "0x00000000fcce7f938e7ae6d3c335bd6a1a7c593d";

/// CAIP-2 chain id the registry lives on.
pub const STORAGE_REGISTRY_CHAIN: &str = "eip155:10";

// ============================================================================
// Wire Types
// ============================================================================

#[derive(Debug, Deserialize)]
struct RpcResponse {
    #[serde(default)]
    result: Option<String>,
    #[serde(default)]
    error: Option<RpcError>,
}

#[derive(Debug, Deserialize)]
struct RpcError {
    code: i64,
    message: String,
}

// ============================================================================
// Registry Client
// ============================================================================

/// Read/encode client for the storage registry.
#[derive(Debug, Clone)]
pub struct StorageRegistryClient {
    http: HttpClient,
    rpc_url: String,
    address: String,
}

impl StorageRegistryClient {
    /// Creates a client for the canonical registry address.
    pub fn new(http: HttpClient, rpc_url: impl Into<String>) -> Self {
        Self::with_address(http, rpc_url, STORAGE_REGISTRY_ADDRESS)
    }

    /// Creates a client for a custom registry deployment.
    pub fn with_address(
        http: HttpClient,
        rpc_url: impl Into<String>,
        address: impl Into<String>,
    ) -> Self {
        Self {
            http,
            rpc_url: rpc_url.into(),
            address: address.into(),
        }
    }

    /// The registry contract address.
    pub fn address(&self) -> &str {
        &self.address
    }

    /// Quotes the rent price for `units` storage units, in wei.
    #[instrument(skip(self))]
    pub async fn price(&self, units: u64) -> Result<u128, ContractError> {
        debug!("Quoting storage rent price");

        let request = json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": "eth_call",
            "params": [
                {
                    "to": self.address,
                    "data": abi::to_hex(&abi::price_calldata(units)),
                },
                "latest"
            ]
        });

        let response = self.http.post_json(&self.rpc_url, &request).await?;
        let body: RpcResponse = response
            .json()
            .await
            .map_err(FetchError::from)?;

        if let Some(err) = body.error {
            return Err(ContractError::Rpc(format!("{} ({})", err.message, err.code)));
        }
        let result = body
            .result
            .ok_or_else(|| ContractError::InvalidResponse("missing result".to_string()))?;
        abi::decode_u256_word(&result)
    }

    /// Builds the unsigned `rent(fid, units)` transaction for a gift.
    ///
    /// `value_wei` is the payment attached to the call, normally a fresh
    /// [`price`](Self::price) quote.
    pub fn rent_transaction(&self, fid: u64, units: u64, value_wei: u128) -> UnsignedTransaction {
        UnsignedTransaction {
            to: self.address.clone(),
            input: abi::to_hex(&abi::rent_calldata(fid, units)),
            value: format!("{value_wei:#x}"),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rent_transaction_shape() {
        let client = StorageRegistryClient::new(HttpClient::default(), "https://rpc.example");
        let tx = client.rent_transaction(16098, 1, 1_313_000_000_000_000);

        assert_eq!(tx.to, STORAGE_REGISTRY_ADDRESS);
        assert!(tx.input.starts_with("0x783a112b"));
        // selector + two words = 68 bytes = 136 hex chars
        assert_eq!(tx.input.len(), 2 + 136);
        assert_eq!(tx.value, "0x4aa2aa2971000");
    }

    #[test]
    fn test_rpc_error_parsing() {
        let body = r#"{"jsonrpc":"2.0","id":1,"error":{"code":-32000,"message":"execution reverted"}}"#;
        let parsed: RpcResponse = serde_json::from_str(body).unwrap();
        assert!(parsed.result.is_none());
        assert_eq!(parsed.error.unwrap().code, -32000);
    }
}
