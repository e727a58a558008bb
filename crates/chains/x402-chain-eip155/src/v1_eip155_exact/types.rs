//! Type definitions for the V1 EIP-155 "exact" payment scheme.
//!
//! The payload is an ERC-3009 `transferWithAuthorization` signed by the buyer. Its integer
//! fields (`value`, `validAfter`, `validBefore`) travel as decimal strings.

use alloy_primitives::{Address, B256, Bytes, U256};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use x402_types::lit_str;
use x402_types::proto::v1;
use x402_types::schema::{ObjectFields, PayloadSchema, SchemaIssue};
use x402_types::timestamp::UnixTimestamp;

use crate::chain::{Eip155Network, decimal_u256};

lit_str!(ExactScheme, "exact");

pub type PaymentPayload = v1::PaymentPayload<ExactScheme, Eip155Network, ExactEvmPayload>;

/// Full payload required to authorize an ERC-3009 transfer:
/// includes the signature and the EIP-712 struct.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExactEvmPayload {
    pub signature: Bytes,
    pub authorization: ExactEvmPayloadAuthorization,
}

/// EIP-712 structured data for ERC-3009-based authorization.
/// Defines who can transfer how much tokens and when.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExactEvmPayloadAuthorization {
    pub from: Address,
    pub to: Address,
    #[serde(with = "decimal_u256")]
    pub value: U256,
    pub valid_after: UnixTimestamp,
    pub valid_before: UnixTimestamp,
    pub nonce: B256,
}

#[derive(Deserialize)]
struct DecimalU256(#[serde(with = "decimal_u256")] U256);

impl PayloadSchema for ExactEvmPayload {
    fn validate_at(value: &Value, path: &str, issues: &mut Vec<SchemaIssue>) -> Option<Self> {
        let mut fields = ObjectFields::open(value, path, issues)?;
        let signature = fields.required("signature");
        let authorization = fields.nested("authorization");
        Some(ExactEvmPayload {
            signature: signature?,
            authorization: authorization?,
        })
    }
}

impl PayloadSchema for ExactEvmPayloadAuthorization {
    fn validate_at(value: &Value, path: &str, issues: &mut Vec<SchemaIssue>) -> Option<Self> {
        let mut fields = ObjectFields::open(value, path, issues)?;
        let from = fields.required("from");
        let to = fields.required("to");
        let amount = fields.required::<DecimalU256>("value");
        let valid_after = fields.required("validAfter");
        let valid_before = fields.required("validBefore");
        let nonce = fields.required("nonce");
        Some(ExactEvmPayloadAuthorization {
            from: from?,
            to: to?,
            value: amount?.0,
            valid_after: valid_after?,
            valid_before: valid_before?,
            nonce: nonce?,
        })
    }
}
