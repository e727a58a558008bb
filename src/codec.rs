//! Payment payload codec.
//!
//! A buyer sends its signed payment in the `X-PAYMENT` header as base64 of the payload's JSON
//! text. [`encode`] produces that header value, [`decode`] turns it back into a typed
//! [`PaymentPayload`].
//!
//! Decoding is strict. Every successful result has passed schema validation for its network
//! family, and each way of failing maps to its own [`PaymentPayloadError`] variant:
//!
//! 1. not base64: [`PaymentPayloadError::Encoding`]
//! 2. not JSON: [`PaymentPayloadError::MalformedPayload`]
//! 3. no string `network`: [`PaymentPayloadError::MissingField`]
//! 4. unknown network: [`PaymentPayloadError::UnsupportedNetwork`]
//! 5. schema rejects the document: [`PaymentPayloadError::Validation`]
//!
//! Large EVM integers (`value`, `validAfter`, `validBefore`) are written as decimal strings, so a
//! `U256` amount survives the trip through any JSON parser on the other side.

use serde::Serialize;
use serde_json::Value;
use x402_chain_eip155::v1_eip155_exact;
use x402_chain_solana::v1_solana_exact;
use x402_types::networks::{Network, NetworkFamily, network_by_name};
use x402_types::schema::{PayloadSchema, SchemaError};
use x402_types::util::b64::{safe_base64_decode, safe_base64_encode};

/// A payment payload of either supported network family.
///
/// Serializes exactly as the inner payload, with no family tag on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum PaymentPayload {
    Evm(v1_eip155_exact::PaymentPayload),
    Svm(v1_solana_exact::PaymentPayload),
}

#[derive(Debug, thiserror::Error)]
pub enum PaymentPayloadError {
    #[error("Unsupported network: {0}")]
    UnsupportedNetwork(String),
    #[error("Payment payload is not valid base64: {0}")]
    Encoding(String),
    #[error("Payment payload is not valid JSON: {0}")]
    MalformedPayload(String),
    #[error("Payment payload is missing required field `{0}`")]
    MissingField(&'static str),
    #[error("Invalid payment payload: {0}")]
    Validation(#[from] SchemaError),
    #[error("Failed to serialize payment payload: {0}")]
    Serialization(#[source] serde_json::Error),
}

impl PaymentPayload {
    pub fn network(&self) -> Network {
        match self {
            PaymentPayload::Evm(payload) => payload.network.network(),
            PaymentPayload::Svm(payload) => payload.network.network(),
        }
    }

    /// Validates an already parsed JSON document.
    ///
    /// The `network` field picks the family whose schema the whole document is checked against.
    pub fn from_json(value: &Value) -> Result<Self, PaymentPayloadError> {
        let network = value
            .as_object()
            .and_then(|object| object.get("network"))
            .and_then(Value::as_str)
            .ok_or(PaymentPayloadError::MissingField("network"))?;
        let network = network_by_name(network)
            .ok_or_else(|| PaymentPayloadError::UnsupportedNetwork(network.to_string()))?;
        let payload = match network.family() {
            NetworkFamily::Evm => {
                PaymentPayload::Evm(v1_eip155_exact::PaymentPayload::validate(value)?)
            }
            NetworkFamily::Svm => {
                PaymentPayload::Svm(v1_solana_exact::PaymentPayload::validate(value)?)
            }
        };
        Ok(payload)
    }
}

impl From<v1_eip155_exact::PaymentPayload> for PaymentPayload {
    fn from(value: v1_eip155_exact::PaymentPayload) -> Self {
        PaymentPayload::Evm(value)
    }
}

impl From<v1_solana_exact::PaymentPayload> for PaymentPayload {
    fn from(value: v1_solana_exact::PaymentPayload) -> Self {
        PaymentPayload::Svm(value)
    }
}

/// Encodes `payload` as a header value.
///
/// Keys are written in field order, so equal payloads always encode to the same string.
pub fn encode(payload: &PaymentPayload) -> Result<String, PaymentPayloadError> {
    let json = serde_json::to_string(payload).map_err(PaymentPayloadError::Serialization)?;
    Ok(safe_base64_encode(&json))
}

/// Decodes and validates a header value produced by [`encode`] or by any other x402 client.
#[cfg_attr(
    feature = "telemetry",
    tracing::instrument(name = "x402.codec.decode", skip_all, err(level = "debug"))
)]
pub fn decode(encoded: &str) -> Result<PaymentPayload, PaymentPayloadError> {
    let bytes =
        safe_base64_decode(encoded).map_err(|e| PaymentPayloadError::Encoding(e.to_string()))?;
    let value: Value = serde_json::from_slice(&bytes)
        .map_err(|e| PaymentPayloadError::MalformedPayload(e.to_string()))?;
    PaymentPayload::from_json(&value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::{Address, B256, Bytes, U256};
    use serde_json::json;
    use x402_chain_eip155::chain::Eip155Network;
    use x402_chain_eip155::v1_eip155_exact::{
        ExactEvmPayload, ExactEvmPayloadAuthorization, ExactScheme,
    };
    use x402_chain_solana::chain::SolanaNetwork;
    use x402_chain_solana::v1_solana_exact::ExactSolanaPayload;
    use x402_types::proto::v1::X402Version1;
    use x402_types::timestamp::UnixTimestamp;

    fn evm_payload(value: U256) -> PaymentPayload {
        PaymentPayload::Evm(v1_eip155_exact::PaymentPayload {
            x402_version: X402Version1,
            scheme: ExactScheme,
            network: Eip155Network::try_from(Network::BaseSepolia).unwrap(),
            payload: ExactEvmPayload {
                signature: Bytes::from(vec![0xab; 65]),
                authorization: ExactEvmPayloadAuthorization {
                    from: "0x857b06519E91e3A54538791bDbb0E22373e36b66"
                        .parse::<Address>()
                        .unwrap(),
                    to: "0x209693Bc6afc0C5328bA36FaF03C514EF312287C"
                        .parse::<Address>()
                        .unwrap(),
                    value,
                    valid_after: UnixTimestamp::from_secs(1740672089),
                    valid_before: UnixTimestamp::from_secs(1740672154),
                    nonce: B256::repeat_byte(0x11),
                },
            },
        })
    }

    fn svm_payload() -> PaymentPayload {
        PaymentPayload::Svm(v1_solana_exact::PaymentPayload {
            x402_version: X402Version1,
            scheme: v1_solana_exact::ExactScheme,
            network: SolanaNetwork::try_from(Network::SolanaDevnet).unwrap(),
            payload: ExactSolanaPayload {
                transaction: "AQIDBAUG".into(),
            },
        })
    }

    fn encode_json(value: &Value) -> String {
        safe_base64_encode(&value.to_string())
    }

    fn evm_json() -> Value {
        serde_json::to_value(evm_payload(U256::from(10000u64))).unwrap()
    }

    #[test]
    fn test_round_trip_preserves_large_amounts() {
        let value = U256::MAX - U256::from(1u8);
        let payload = evm_payload(value);
        let decoded = decode(&encode(&payload).unwrap()).unwrap();
        assert_eq!(decoded, payload);
        let PaymentPayload::Evm(decoded) = decoded else {
            panic!("expected an EVM payload");
        };
        assert_eq!(decoded.payload.authorization.value, value);
    }

    #[test]
    fn test_amounts_travel_as_decimal_strings() {
        let payload = evm_payload(U256::from(10u64).pow(U256::from(30u64)));
        let bytes = safe_base64_decode(&encode(&payload).unwrap()).unwrap();
        let json: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(
            json["payload"]["authorization"]["value"],
            "1000000000000000000000000000000"
        );
        assert_eq!(json["payload"]["authorization"]["validAfter"], "1740672089");
        assert_eq!(json["x402Version"], 1);
    }

    #[test]
    fn test_encode_is_deterministic() {
        let first = encode(&evm_payload(U256::from(42u64))).unwrap();
        let second = encode(&evm_payload(U256::from(42u64))).unwrap();
        assert_eq!(first, second);
        assert_eq!(encode(&svm_payload()).unwrap(), encode(&svm_payload()).unwrap());
    }

    #[test]
    fn test_key_order_follows_wire_order() {
        let bytes = safe_base64_decode(&encode(&svm_payload()).unwrap()).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert_eq!(
            text,
            r#"{"x402Version":1,"scheme":"exact","network":"solana-devnet","payload":{"transaction":"AQIDBAUG"}}"#
        );
    }

    #[test]
    fn test_svm_round_trip() {
        let payload = svm_payload();
        let decoded = decode(&encode(&payload).unwrap()).unwrap();
        assert_eq!(decoded.network(), Network::SolanaDevnet);
        assert_eq!(decoded, payload);
    }

    #[test]
    fn test_decode_rejects_non_base64() {
        let err = decode("not base64 at all!").unwrap_err();
        assert!(matches!(err, PaymentPayloadError::Encoding(_)));
    }

    #[test]
    fn test_serialization_error_is_distinct() {
        let json_err = serde_json::from_str::<Value>("{").unwrap_err();
        let err = PaymentPayloadError::Serialization(json_err);
        assert!(err.to_string().starts_with("Failed to serialize payment payload"));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_decode_rejects_non_json() {
        let err = decode(&safe_base64_encode("this is not json")).unwrap_err();
        assert!(matches!(err, PaymentPayloadError::MalformedPayload(_)));
    }

    #[test]
    fn test_decode_requires_string_network() {
        for value in [
            json!({"foo": 1}),
            json!({"network": 8453}),
            json!(["network", "base"]),
            json!("base"),
        ] {
            let err = decode(&encode_json(&value)).unwrap_err();
            assert!(
                matches!(err, PaymentPayloadError::MissingField("network")),
                "{value}: {err}"
            );
        }
    }

    #[test]
    fn test_decode_rejects_unknown_network() {
        let mut value = evm_json();
        value["network"] = json!("unknown-chain");
        let err = decode(&encode_json(&value)).unwrap_err();
        assert!(matches!(err, PaymentPayloadError::UnsupportedNetwork(n) if n == "unknown-chain"));
    }

    #[test]
    fn test_decode_reports_field_paths() {
        let mut value = evm_json();
        value["payload"]["authorization"]["value"] = json!(10000);
        value["x402Version"] = json!(2);
        let err = decode(&encode_json(&value)).unwrap_err();
        let PaymentPayloadError::Validation(schema) = err else {
            panic!("expected a validation error, got {err}");
        };
        assert!(schema.issue_at("payload.authorization.value").is_some());
        assert!(schema.issue_at("x402Version").is_some());
    }

    #[test]
    fn test_decode_checks_payload_against_network_family() {
        let mut value = evm_json();
        value["network"] = json!("solana");
        let err = decode(&encode_json(&value)).unwrap_err();
        let PaymentPayloadError::Validation(schema) = err else {
            panic!("expected a validation error, got {err}");
        };
        assert!(schema.issue_at("payload.transaction").is_some());
    }

    #[test]
    fn test_decode_accepts_foreign_encoding() {
        let header = encode_json(&json!({
            "x402Version": 1,
            "scheme": "exact",
            "network": "base-sepolia",
            "payload": {
                "signature": "0x2d6a7588d6acca505cbf0d9a4a227e0c52c6c34008c8e8986a1283259764173608a2ce6496642e377d6da8dbbf5836e9bd15092f9ecab05ded3d6293af148b571c",
                "authorization": {
                    "from": "0x857b06519e91e3a54538791bdbb0e22373e36b66",
                    "to": "0x209693bc6afc0c5328ba36faf03c514ef312287c",
                    "value": "115792089237316195423570985008687907853269984665640564039457584007913129639935",
                    "validAfter": "0",
                    "validBefore": "1740672154",
                    "nonce": "0xf3746613c2d920b5fdabc0856f2aeb2d4f88ee6037b8cc5d04a71a4462f13480"
                }
            }
        }));
        let PaymentPayload::Evm(payload) = decode(&header).unwrap() else {
            panic!("expected an EVM payload");
        };
        assert_eq!(payload.payload.authorization.value, U256::MAX);
        assert_eq!(payload.network.network(), Network::BaseSepolia);
    }
}
