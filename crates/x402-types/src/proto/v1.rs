//! Protocol version 1 (V1) types for x402.
//!
//! - [`X402Version1`] - Version marker that serializes as `1`
//! - [`PaymentPayload`] - Signed payment authorization from the buyer
//! - [`PaymentRequirements`] - Payment terms set by the seller
//! - [`PaymentRequired`] - HTTP 402 response body

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use std::fmt;
use std::fmt::Display;

use crate::schema::{ObjectFields, PayloadSchema, SchemaIssue};

/// Version marker for x402 protocol version 1.
///
/// Serializes as the integer `1`; any other number is rejected.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct X402Version1;

impl X402Version1 {
    pub const VALUE: u8 = 1;
}

impl PartialEq<u8> for X402Version1 {
    fn eq(&self, other: &u8) -> bool {
        *other == Self::VALUE
    }
}

impl From<X402Version1> for u8 {
    fn from(_: X402Version1) -> Self {
        X402Version1::VALUE
    }
}

impl Serialize for X402Version1 {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(Self::VALUE)
    }
}

impl<'de> Deserialize<'de> for X402Version1 {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let num = u8::deserialize(deserializer)?;
        if num == Self::VALUE {
            Ok(X402Version1)
        } else {
            Err(serde::de::Error::custom(format!(
                "expected version {}, got {}",
                Self::VALUE,
                num
            )))
        }
    }
}

impl Display for X402Version1 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", Self::VALUE)
    }
}

/// A signed payment authorization from the buyer.
///
/// Field order is the wire key order: `x402Version`, `scheme`, `network`, `payload`.
///
/// # Type Parameters
///
/// - `TScheme` - The scheme identifier type (default: `String`)
/// - `TNetwork` - The network type (default: `String`)
/// - `TPayload` - The scheme-specific payload type (default: raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentPayload<TScheme = String, TNetwork = String, TPayload = Value> {
    pub x402_version: X402Version1,
    pub scheme: TScheme,
    pub network: TNetwork,
    pub payload: TPayload,
}

impl<TScheme, TNetwork, TPayload> PayloadSchema for PaymentPayload<TScheme, TNetwork, TPayload>
where
    TScheme: DeserializeOwned,
    TNetwork: DeserializeOwned,
    TPayload: PayloadSchema,
{
    fn validate_at(value: &Value, path: &str, issues: &mut Vec<SchemaIssue>) -> Option<Self> {
        let mut fields = ObjectFields::open(value, path, issues)?;
        let x402_version = fields.required("x402Version");
        let scheme = fields.required("scheme");
        let network = fields.required("network");
        let payload = fields.nested("payload");
        Some(PaymentPayload {
            x402_version: x402_version?,
            scheme: scheme?,
            network: network?,
            payload: payload?,
        })
    }
}

/// Payment requirements set by the seller.
///
/// `extra` is an open bag of scheme-specific attributes: the EIP-712 domain `{name, version}`
/// for EVM `exact`, `{feePayer}` for Solana `exact`.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRequirements {
    pub scheme: String,
    pub network: String,
    /// Atomic token amount as a decimal string.
    pub max_amount_required: String,
    pub resource: String,
    pub description: String,
    pub mime_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_schema: Option<Value>,
    pub pay_to: String,
    pub max_timeout_seconds: u64,
    pub asset: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extra: Option<Map<String, Value>>,
}

/// HTTP 402 Payment Required response body for V1.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRequired {
    pub x402_version: X402Version1,
    #[serde(default)]
    pub accepts: Vec<PaymentRequirements>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl PaymentRequired {
    pub fn new(accepts: Vec<PaymentRequirements>) -> Self {
        Self {
            x402_version: X402Version1,
            accepts,
            error: None,
        }
    }

    pub fn with_error(mut self, error: impl Into<String>) -> Self {
        self.error = Some(error.into());
        self
    }
}
