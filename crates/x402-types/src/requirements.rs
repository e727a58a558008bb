//! Inputs, collaborators and errors of the payment requirements builder.
//!
//! A seller describes a paid route with a [`PaymentRequirementsInput`]: what it costs, on which
//! network, who gets paid, and what the resource looks like. Chain crates turn that into a
//! [`PaymentRequirements`](crate::proto::v1::PaymentRequirements) with their own address and
//! `extra` rules. Converting a human price into an atomic token amount is delegated to a
//! [`PriceResolver`].

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use std::fmt::Display;
use url::Url;

use crate::config::LiteralOrEnv;
use crate::facilitator::BoxError;
use crate::networks::Network;
use crate::util::money_amount::MoneyAmount;

pub const DEFAULT_MAX_TIMEOUT_SECONDS: u64 = 60;
pub const DEFAULT_METHOD: &str = "GET";

/// EIP-712 domain of a token that supports signed transfer authorizations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Eip712Domain {
    pub name: String,
    pub version: String,
}

/// A token as seen by the requirements builder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenAsset {
    pub address: String,
    pub decimals: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eip712: Option<Eip712Domain>,
}

/// The price of a route.
///
/// ```json
/// "$0.01"
/// ```
///
/// or, for a token other than the network's default stablecoin:
///
/// ```json
/// { "amount": "10000", "asset": { "address": "0x...", "decimals": 6 } }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Price {
    /// Atomic amount of an explicit token.
    TokenAmount { amount: String, asset: TokenAsset },
    /// Human amount in the network's default stablecoin.
    Money(MoneyAmount),
}

impl From<MoneyAmount> for Price {
    fn from(value: MoneyAmount) -> Self {
        Price::Money(value)
    }
}

/// Outcome of a successful price resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPrice {
    pub max_amount_required: String,
    pub asset: TokenAsset,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct PriceResolutionError(pub String);

impl PriceResolutionError {
    pub fn new(reason: impl Display) -> Self {
        Self(reason.to_string())
    }
}

/// Turns a [`Price`] into an atomic amount and an asset on a network.
pub trait PriceResolver {
    fn resolve_price(
        &self,
        price: &Price,
        network: Network,
    ) -> Result<ResolvedPrice, PriceResolutionError>;
}

impl<F> PriceResolver for F
where
    F: Fn(&Price, Network) -> Result<ResolvedPrice, PriceResolutionError>,
{
    fn resolve_price(
        &self,
        price: &Price,
        network: Network,
    ) -> Result<ResolvedPrice, PriceResolutionError> {
        self(price, network)
    }
}

/// Description of a paid route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRequirementsInput {
    pub price: Price,
    /// Network name. Validated by the builder, so unknown names surface as
    /// [`RequirementsError::UnsupportedNetwork`].
    pub network: String,
    pub pay_to: LiteralOrEnv<String>,
    pub resource: Url,
    #[serde(default = "default_method")]
    pub method: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_timeout_seconds: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discoverable: Option<bool>,
    /// Extra attributes merged into `outputSchema.input`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_schema: Option<Map<String, Value>>,
    /// Placed verbatim at `outputSchema.output`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_schema: Option<Value>,
}

fn default_method() -> String {
    DEFAULT_METHOD.to_string()
}

impl PaymentRequirementsInput {
    pub fn new(
        price: impl Into<Price>,
        network: impl Into<String>,
        pay_to: impl Into<String>,
        resource: Url,
    ) -> Self {
        Self {
            price: price.into(),
            network: network.into(),
            pay_to: LiteralOrEnv::from_literal(pay_to.into()),
            resource,
            method: default_method(),
            description: None,
            mime_type: None,
            max_timeout_seconds: None,
            discoverable: None,
            input_schema: None,
            output_schema: None,
        }
    }

    pub fn with_method(mut self, method: impl Into<String>) -> Self {
        self.method = method.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = Some(mime_type.into());
        self
    }

    pub fn with_max_timeout_seconds(mut self, seconds: u64) -> Self {
        self.max_timeout_seconds = Some(seconds);
        self
    }

    pub fn description_or_default(&self) -> String {
        self.description.clone().unwrap_or_default()
    }

    pub fn max_timeout_seconds_or_default(&self) -> u64 {
        self.max_timeout_seconds
            .unwrap_or(DEFAULT_MAX_TIMEOUT_SECONDS)
    }

    /// The `outputSchema` advertised for an HTTP resource.
    ///
    /// `input` holds the entries of [`input_schema`](Self::input_schema) plus
    /// `{type: "http", method, discoverable}`, which always take precedence: the method is
    /// uppercased and `discoverable` defaults to `true`. `output` is omitted when no output
    /// schema was given.
    pub fn http_output_schema(&self) -> Value {
        let mut input = self.input_schema.clone().unwrap_or_default();
        input.insert("type".into(), json!("http"));
        input.insert("method".into(), json!(self.method.to_uppercase()));
        input.insert(
            "discoverable".into(),
            json!(self.discoverable.unwrap_or(true)),
        );
        let mut schema = Map::new();
        schema.insert("input".into(), Value::Object(input));
        if let Some(output) = &self.output_schema {
            schema.insert("output".into(), output.clone());
        }
        Value::Object(schema)
    }
}

/// Errors that can occur while building payment requirements.
#[derive(Debug, thiserror::Error)]
pub enum RequirementsError {
    #[error("Unsupported network: {0}")]
    UnsupportedNetwork(String),
    #[error("Price resolution failed: {0}")]
    PriceResolution(#[from] PriceResolutionError),
    #[error("Invalid {field} address {address:?}: {reason}")]
    InvalidAddress {
        field: &'static str,
        address: String,
        reason: String,
    },
    #[error("Facilitator advertises no fee payer for exact payments on {0}")]
    MissingFeePayer(Network),
    #[error("A supported kinds source is required to build requirements on {0}")]
    MissingCollaborator(Network),
    #[error("Failed to fetch supported payment kinds: {0}")]
    SupportedKinds(#[source] BoxError),
}
