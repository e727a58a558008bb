//! Payment requirements for the V1 Solana exact scheme.

use serde_json::{Map, Value};
use x402_types::networks::Network;
use x402_types::proto::SupportedPaymentKindsResponse;
use x402_types::proto::v1;
use x402_types::requirements::{PaymentRequirementsInput, PriceResolver, RequirementsError};

#[cfg(feature = "telemetry")]
use tracing::instrument;

use crate::chain::SolanaNetwork;
use crate::v1_solana_exact::types::{ExactScheme, SupportedPaymentKindExtra};

/// Builds the requirements a buyer must satisfy to pay for a route on a Solana network.
///
/// Addresses are passed through as given. `extra.feePayer` comes from the first kind in
/// `supported` matching the network and the `exact` scheme; without one the build fails with
/// [`RequirementsError::MissingFeePayer`].
///
/// Unset fields default to an empty description, an empty MIME type, and a 60 second timeout.
#[cfg_attr(
    feature = "telemetry",
    instrument(name = "x402.solana.build_requirements", skip_all, fields(network = %input.network), err)
)]
pub fn build_svm_payment_requirements<R>(
    input: &PaymentRequirementsInput,
    supported: &SupportedPaymentKindsResponse,
    resolver: &R,
) -> Result<v1::PaymentRequirements, RequirementsError>
where
    R: PriceResolver + ?Sized,
{
    let network: Network = input
        .network
        .parse()
        .map_err(|_| RequirementsError::UnsupportedNetwork(input.network.clone()))?;
    let network = SolanaNetwork::try_from(network)
        .map_err(|_| RequirementsError::UnsupportedNetwork(input.network.clone()))?;

    let resolved = resolver.resolve_price(&input.price, network.network())?;
    let fee_payer = fee_payer(network, supported)
        .ok_or(RequirementsError::MissingFeePayer(network.network()))?;

    let mut extra = Map::new();
    extra.insert(
        "feePayer".into(),
        Value::String(fee_payer.fee_payer.to_string()),
    );

    Ok(v1::PaymentRequirements {
        scheme: ExactScheme.to_string(),
        network: network.to_string(),
        max_amount_required: resolved.max_amount_required,
        resource: input.resource.to_string(),
        description: input.description_or_default(),
        mime_type: input.mime_type.clone().unwrap_or_default(),
        output_schema: Some(input.http_output_schema()),
        pay_to: input.pay_to.to_string(),
        max_timeout_seconds: input.max_timeout_seconds_or_default(),
        asset: resolved.asset.address,
        extra: Some(extra),
    })
}

/// Fee payer advertised for `network`'s exact kind, if any.
pub fn fee_payer(
    network: SolanaNetwork,
    supported: &SupportedPaymentKindsResponse,
) -> Option<SupportedPaymentKindExtra> {
    let kind = supported.find(network.network().name(), ExactScheme::VALUE)?;
    let extra = kind.extra.as_ref()?;
    match serde_json::from_value::<SupportedPaymentKindExtra>(extra.clone()) {
        Ok(extra) => Some(extra),
        Err(_e) => {
            #[cfg(feature = "telemetry")]
            tracing::warn!(%network, error = %_e, "facilitator advertised an unusable fee payer");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use url::Url;
    use x402_types::proto::SupportedPaymentKind;
    use x402_types::requirements::{Price, PriceResolutionError, ResolvedPrice, TokenAsset};
    use x402_types::util::money_amount::MoneyAmount;

    const FEE_PAYER: &str = "2wKupLR9q6wXYppw8Gr2NvWxKBUqm4PPJKkQfoxHDBg4";
    const PAY_TO: &str = "EGBQqKn968sVv5cQh5Cr72pSTHfxsuzq7o7asqYB5uEV";
    const MINT: &str = "4zMMC9srt5Ri5X14GAgXhaHii3GnPAEERYPJgZJDncDU";

    fn resolver(_: &Price, _: Network) -> Result<ResolvedPrice, PriceResolutionError> {
        Ok(ResolvedPrice {
            max_amount_required: "10000".into(),
            asset: TokenAsset {
                address: MINT.into(),
                decimals: 6,
                eip712: None,
            },
        })
    }

    fn input() -> PaymentRequirementsInput {
        PaymentRequirementsInput::new(
            MoneyAmount::parse("$0.01").unwrap(),
            "solana-devnet",
            PAY_TO,
            Url::parse("https://x/y").unwrap(),
        )
    }

    fn kind(network: &str, scheme: &str, extra: Option<Value>) -> SupportedPaymentKind {
        SupportedPaymentKind {
            x402_version: 1,
            scheme: scheme.into(),
            network: network.into(),
            extra,
        }
    }

    #[test]
    fn test_fee_payer_from_first_matching_kind() {
        let supported = SupportedPaymentKindsResponse {
            kinds: vec![
                kind("base", "exact", None),
                kind("solana-devnet", "upto", Some(json!({"feePayer": PAY_TO}))),
                kind("solana-devnet", "exact", Some(json!({"feePayer": FEE_PAYER}))),
                kind("solana-devnet", "exact", Some(json!({"feePayer": PAY_TO}))),
            ],
        };
        let requirements = build_svm_payment_requirements(&input(), &supported, &resolver).unwrap();
        assert_eq!(
            requirements.extra.unwrap().get("feePayer"),
            Some(&json!(FEE_PAYER))
        );
        assert_eq!(requirements.mime_type, "");
        assert_eq!(requirements.description, "");
        assert_eq!(requirements.max_timeout_seconds, 60);
        assert_eq!(requirements.pay_to, PAY_TO);
        assert_eq!(requirements.asset, MINT);
        assert_eq!(requirements.network, "solana-devnet");
    }

    #[test]
    fn test_fee_payer_from_kind_without_version() {
        let supported: SupportedPaymentKindsResponse = serde_json::from_value(json!({
            "kinds": [
                { "network": "solana-devnet", "scheme": "exact", "extra": { "feePayer": FEE_PAYER } }
            ]
        }))
        .unwrap();
        let requirements = build_svm_payment_requirements(&input(), &supported, &resolver).unwrap();
        assert_eq!(
            requirements.extra.unwrap().get("feePayer"),
            Some(&json!(FEE_PAYER))
        );
    }

    #[test]
    fn test_missing_fee_payer() {
        let cases = [
            vec![],
            vec![kind("solana", "exact", Some(json!({"feePayer": FEE_PAYER})))],
            vec![kind("solana-devnet", "exact", None)],
            vec![kind("solana-devnet", "exact", Some(json!({"feePayer": "0xdead"})))],
        ];
        for kinds in cases {
            let supported = SupportedPaymentKindsResponse { kinds };
            let err = build_svm_payment_requirements(&input(), &supported, &resolver).unwrap_err();
            assert!(matches!(
                err,
                RequirementsError::MissingFeePayer(Network::SolanaDevnet)
            ));
        }
    }

    #[test]
    fn test_evm_network_rejected() {
        let mut input = input();
        input.network = "base".into();
        let err =
            build_svm_payment_requirements(&input, &SupportedPaymentKindsResponse::default(), &resolver)
                .unwrap_err();
        assert!(matches!(err, RequirementsError::UnsupportedNetwork(n) if n == "base"));
    }
}
