//! Type definitions for the V1 Solana "exact" payment scheme.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use x402_types::lit_str;
use x402_types::proto::v1;
use x402_types::schema::{ObjectFields, PayloadSchema, SchemaIssue};
use x402_types::util::Base64Bytes;

use crate::chain::{Address, SolanaNetwork};

lit_str!(ExactScheme, "exact");

pub type PaymentPayload = v1::PaymentPayload<ExactScheme, SolanaNetwork, ExactSolanaPayload>;

/// A base64-encoded, partially signed versioned transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExactSolanaPayload {
    pub transaction: String,
}

impl PayloadSchema for ExactSolanaPayload {
    fn validate_at(value: &Value, path: &str, issues: &mut Vec<SchemaIssue>) -> Option<Self> {
        let mut fields = ObjectFields::open(value, path, issues)?;
        let transaction: String = fields.required("transaction")?;
        if transaction.is_empty() || !Base64Bytes::from(transaction.as_str()).is_valid() {
            fields.reject("transaction", "expected a non-empty base64 string");
            return None;
        }
        Some(ExactSolanaPayload { transaction })
    }
}

/// `extra` of a facilitator's Solana exact kind, and of the requirements built from it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SupportedPaymentKindExtra {
    pub fee_payer: Address,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_transaction_must_be_base64() {
        assert!(ExactSolanaPayload::validate(&json!({"transaction": "AQID"})).is_ok());
        for bad in [json!({"transaction": "not base64!"}), json!({"transaction": ""})] {
            let err = ExactSolanaPayload::validate(&bad).unwrap_err();
            assert!(err.issue_at("transaction").is_some());
        }
        let err = ExactSolanaPayload::validate(&json!({"transaction": 7})).unwrap_err();
        assert!(err.issue_at("transaction").is_some());
    }
}
