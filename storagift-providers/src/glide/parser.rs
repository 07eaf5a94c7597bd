//! Glide wire formats and parsing.
//!
//! The gateway speaks camelCase JSON. Wire structs stay private to this
//! module; callers only see core types.

use serde::{Deserialize, Serialize};

use storagift_core::{PaymentSession, UnsignedTransaction};

use super::error::GlideError;

// ============================================================================
// Request Types
// ============================================================================

/// Body for `POST /sessions`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct CreateSessionRequest {
    pub chain_id: String,
    pub account: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_currency: Option<String>,
    pub transaction: WireTransaction,
}

/// The transaction the session will sponsor.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct WireTransaction {
    pub chain_id: String,
    pub to: String,
    pub input: String,
    pub value: String,
}

/// Body for `POST /sessions/{id}/payment-transaction`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PaymentTransactionRequest {
    pub tx_hash: String,
}

// ============================================================================
// Response Types
// ============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SessionResponse {
    session_id: Option<String>,
    unsigned_transaction: Option<WireUnsignedTransaction>,
    sponsored_transaction_hash: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireUnsignedTransaction {
    to: Option<String>,
    input: Option<String>,
    value: Option<String>,
}

impl WireUnsignedTransaction {
    fn into_transaction(self) -> Option<UnsignedTransaction> {
        Some(UnsignedTransaction {
            to: self.to?,
            input: self.input?,
            value: self.value?,
        })
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PaymentTransactionResponse {
    #[serde(default)]
    success: bool,
}

// ============================================================================
// Parsing
// ============================================================================

/// Parses a session body into a [`PaymentSession`].
///
/// A session with no id is unusable and rejected; a missing or partial
/// unsigned transaction just means the session is not ready yet.
pub(crate) fn parse_session(body: &str) -> Result<PaymentSession, GlideError> {
    let response: SessionResponse = serde_json::from_str(body)
        .map_err(|e| GlideError::InvalidResponse(format!("malformed session body: {e}")))?;

    let session_id = response
        .session_id
        .filter(|id| !id.is_empty())
        .ok_or_else(|| GlideError::InvalidResponse("session id missing".to_string()))?;

    Ok(PaymentSession {
        session_id,
        unsigned_transaction: response
            .unsigned_transaction
            .and_then(WireUnsignedTransaction::into_transaction),
        sponsored_transaction_hash: response.sponsored_transaction_hash,
    })
}

/// Parses the payment-transaction acknowledgement.
pub(crate) fn parse_payment_ack(body: &str) -> Result<bool, GlideError> {
    let response: PaymentTransactionResponse = serde_json::from_str(body)
        .map_err(|e| GlideError::InvalidResponse(format!("malformed ack body: {e}")))?;
    Ok(response.success)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_fresh_session() {
        let body = r#"{
            "sessionId": "sess_01",
            "unsignedTransaction": {
                "to": "0x00000000fcce7f938e7ae6d3c335bd6a1a7c593d",
                "input": "0x783a112b",
                "value": "0x4aa2aa2971000"
            }
        }"#;

        let session = parse_session(body).unwrap();
        assert_eq!(session.session_id, "sess_01");
        let tx = session.unsigned_transaction.unwrap();
        assert_eq!(tx.value, "0x4aa2aa2971000");
        assert!(session.sponsored_transaction_hash.is_none());
    }

    #[test]
    fn test_parse_settled_session() {
        let body = r#"{
            "sessionId": "sess_02",
            "sponsoredTransactionHash": "0xabc123"
        }"#;

        let session = parse_session(body).unwrap();
        assert_eq!(session.session_id, "sess_02");
        assert!(session.unsigned_transaction.is_none());
        assert_eq!(session.sponsored_transaction_hash.as_deref(), Some("0xabc123"));
    }

    #[test]
    fn test_partial_transaction_treated_as_pending() {
        let body = r#"{
            "sessionId": "sess_03",
            "unsignedTransaction": { "to": "0x01" }
        }"#;

        let session = parse_session(body).unwrap();
        assert!(session.unsigned_transaction.is_none());
    }

    #[test]
    fn test_missing_session_id_rejected() {
        assert!(parse_session("{}").is_err());
        assert!(parse_session(r#"{"sessionId": ""}"#).is_err());
        assert!(parse_session("not json").is_err());
    }

    #[test]
    fn test_parse_payment_ack() {
        assert!(parse_payment_ack(r#"{"success": true}"#).unwrap());
        assert!(!parse_payment_ack(r#"{"success": false}"#).unwrap());
        assert!(!parse_payment_ack("{}").unwrap());
        assert!(parse_payment_ack("nope").is_err());
    }

    #[test]
    fn test_request_serialization_is_camel_case() {
        let request = CreateSessionRequest {
            chain_id: "eip155:8453".to_string(),
            account: "0xpayer".to_string(),
            payment_currency: None,
            transaction: WireTransaction {
                chain_id: "eip155:10".to_string(),
                to: "0xregistry".to_string(),
                input: "0x783a112b".to_string(),
                value: "0x0".to_string(),
            },
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["chainId"], "eip155:8453");
        assert_eq!(json["transaction"]["chainId"], "eip155:10");
        assert!(json.get("paymentCurrency").is_none());
    }
}
