//! Wire format types for x402 payment messages.
//!
//! Everything here speaks protocol version 1, where networks are identified by name
//! (`"base-sepolia"`, `"solana-devnet"`). All messages serialize to camelCase JSON.
//!
//! - [`v1`] - payment payloads, payment requirements and the 402 response body
//! - [`SupportedPaymentKind`] / [`SupportedPaymentKindsResponse`] - a facilitator's `/supported` answer

use serde::{Deserialize, Serialize};
use serde_with::{VecSkipError, serde_as};

pub mod v1;

/// Describes a payment method supported by a facilitator.
///
/// ```json
/// {
///   "x402Version": 1,
///   "scheme": "exact",
///   "network": "solana-devnet",
///   "extra": { "feePayer": "2wKupLR9q6wXYppw8Gr2NvWxKBUqm4PPJKkQfoxHDBg4" }
/// }
/// ```
///
/// `x402Version` may be omitted and then defaults to `1`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SupportedPaymentKind {
    #[serde(default = "default_x402_version")]
    pub x402_version: u8,
    pub scheme: String,
    pub network: String,
    /// Scheme-specific data, e.g. the fee payer for Solana `exact`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extra: Option<serde_json::Value>,
}

fn default_x402_version() -> u8 {
    v1::X402Version1::VALUE
}

/// Response from a facilitator's `/supported` endpoint.
///
/// Entries that fail to deserialize are dropped instead of failing the whole response,
/// so a facilitator advertising kinds this crate does not understand stays usable.
#[serde_as]
#[derive(Clone, Default, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SupportedPaymentKindsResponse {
    #[serde_as(as = "VecSkipError<_>")]
    pub kinds: Vec<SupportedPaymentKind>,
}

impl SupportedPaymentKindsResponse {
    /// First advertised kind for `(network, scheme)`, ignoring the protocol version.
    pub fn find(&self, network: &str, scheme: &str) -> Option<&SupportedPaymentKind> {
        self.kinds
            .iter()
            .find(|kind| kind.network == network && kind.scheme == scheme)
    }
}
