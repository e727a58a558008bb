//! Payment requirements for the V1 EIP-155 exact scheme.

use serde_json::{Map, Value};
use x402_types::networks::Network;
use x402_types::proto::v1;
use x402_types::requirements::{PaymentRequirementsInput, PriceResolver, RequirementsError};

#[cfg(feature = "telemetry")]
use tracing::instrument;

use crate::chain::{ChecksummedAddress, Eip155Network};
use crate::v1_eip155_exact::ExactScheme;

pub const DEFAULT_MIME_TYPE: &str = "application/json";

/// Builds the requirements a buyer must satisfy to pay for a route on an EVM network.
///
/// `payTo` and the resolved asset address are normalised to their EIP-55 checksummed form.
/// `extra` carries the asset's EIP-712 domain (`{name, version}`), which buyers need to sign
/// the ERC-3009 authorization. An asset without a domain yields requirements without `extra`.
///
/// Unset fields default to an empty description, `application/json`, and a 60 second timeout.
#[cfg_attr(
    feature = "telemetry",
    instrument(name = "x402.eip155.build_requirements", skip_all, fields(network = %input.network), err)
)]
pub fn build_evm_payment_requirements<R>(
    input: &PaymentRequirementsInput,
    resolver: &R,
) -> Result<v1::PaymentRequirements, RequirementsError>
where
    R: PriceResolver + ?Sized,
{
    let network: Network = input
        .network
        .parse()
        .map_err(|_| RequirementsError::UnsupportedNetwork(input.network.clone()))?;
    let network = Eip155Network::try_from(network)
        .map_err(|_| RequirementsError::UnsupportedNetwork(input.network.clone()))?;

    let resolved = resolver.resolve_price(&input.price, network.network())?;
    let pay_to = checksummed("payTo", &input.pay_to)?;
    let asset = checksummed("asset", &resolved.asset.address)?;

    let extra = match resolved.asset.eip712 {
        Some(domain) => {
            let mut extra = Map::new();
            extra.insert("name".into(), Value::String(domain.name));
            extra.insert("version".into(), Value::String(domain.version));
            Some(extra)
        }
        None => {
            #[cfg(feature = "telemetry")]
            tracing::warn!(%asset, %network, "asset has no EIP-712 domain, omitting extra");
            None
        }
    };

    Ok(v1::PaymentRequirements {
        scheme: ExactScheme.to_string(),
        network: network.to_string(),
        max_amount_required: resolved.max_amount_required,
        resource: input.resource.to_string(),
        description: input.description_or_default(),
        mime_type: input
            .mime_type
            .clone()
            .unwrap_or_else(|| DEFAULT_MIME_TYPE.to_string()),
        output_schema: Some(input.http_output_schema()),
        pay_to: pay_to.to_string(),
        max_timeout_seconds: input.max_timeout_seconds_or_default(),
        asset: asset.to_string(),
        extra,
    })
}

fn checksummed(field: &'static str, address: &str) -> Result<ChecksummedAddress, RequirementsError> {
    address
        .parse::<ChecksummedAddress>()
        .map_err(|e| RequirementsError::InvalidAddress {
            field,
            address: address.to_string(),
            reason: e.to_string(),
        })
}
