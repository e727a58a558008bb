//! Payment requirements for a paid route.
//!
//! [`build_payment_requirements`] picks the builder for the route's network family. EVM
//! requirements are built locally. Solana requirements need the facilitator's fee payer, so the
//! caller supplies a [`SupportedKindsSource`] and the dispatcher awaits it before building.
//!
//! ```rust,no_run
//! use x402_negotiate::facilitator_client::FacilitatorClient;
//! use x402_negotiate::requirements::{DefaultPriceResolver, build_payment_requirements};
//! use x402_types::requirements::PaymentRequirementsInput;
//! use x402_types::util::money_amount::MoneyAmount;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let facilitator = FacilitatorClient::try_from("https://facilitator.x402.rs")?;
//! let input = PaymentRequirementsInput::new(
//!     MoneyAmount::parse("$0.01")?,
//!     "solana-devnet",
//!     "EGBQqKn968sVv5cQh5Cr72pSTHfxsuzq7o7asqYB5uEV",
//!     "https://api.example.com/weather".parse()?,
//! );
//! let accepts = build_payment_requirements(&input, &DefaultPriceResolver, Some(&facilitator)).await?;
//! # Ok(())
//! # }
//! ```

use x402_chain_eip155::chain::{Eip155Network, Eip155TokenDeployment};
use x402_chain_eip155::v1_eip155_exact::build_evm_payment_requirements;
use x402_chain_solana::chain::{SolanaNetwork, SolanaTokenDeployment};
use x402_chain_solana::v1_solana_exact::build_svm_payment_requirements;
use x402_types::facilitator::SupportedKindsSource;
use x402_types::networks::{Network, NetworkFamily, network_by_name};
use x402_types::proto::v1;
use x402_types::requirements::{
    PaymentRequirementsInput, Price, PriceResolutionError, PriceResolver, RequirementsError,
    ResolvedPrice,
};

pub use x402_types::networks::{is_evm_network, is_svm_network};

/// Resolves money prices to USDC on the route's network.
///
/// Explicit token amounts are passed through once the amount is checked to be an atomic
/// decimal integer.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultPriceResolver;

impl PriceResolver for DefaultPriceResolver {
    fn resolve_price(
        &self,
        price: &Price,
        network: Network,
    ) -> Result<ResolvedPrice, PriceResolutionError> {
        let money = match price {
            Price::TokenAmount { amount, asset } => {
                if amount.is_empty() || !amount.bytes().all(|b| b.is_ascii_digit()) {
                    return Err(PriceResolutionError::new(format!(
                        "token amount must be a non-negative integer, got {amount:?}"
                    )));
                }
                return Ok(ResolvedPrice {
                    max_amount_required: amount.clone(),
                    asset: asset.clone(),
                });
            }
            Price::Money(money) => money.clone(),
        };
        match network.family() {
            NetworkFamily::Evm => {
                let network = Eip155Network::try_from(network).map_err(PriceResolutionError::new)?;
                let usdc = Eip155TokenDeployment::usdc(network).ok_or_else(|| {
                    PriceResolutionError::new(format!("no USDC deployment on {network}"))
                })?;
                let amount = usdc.parse(money).map_err(PriceResolutionError::new)?;
                Ok(ResolvedPrice {
                    max_amount_required: amount.to_string(),
                    asset: usdc.as_token_asset(),
                })
            }
            NetworkFamily::Svm => {
                let network = SolanaNetwork::try_from(network).map_err(PriceResolutionError::new)?;
                let usdc = SolanaTokenDeployment::usdc(network).ok_or_else(|| {
                    PriceResolutionError::new(format!("no USDC mint on {network}"))
                })?;
                let amount = usdc.parse(money).map_err(PriceResolutionError::new)?;
                Ok(ResolvedPrice {
                    max_amount_required: amount.to_string(),
                    asset: usdc.as_token_asset(),
                })
            }
        }
    }
}

/// Builds the payment requirements advertised for a route.
///
/// Fails with [`RequirementsError::MissingCollaborator`] for a Solana route when `supported` is
/// `None`, before anything is fetched. The result currently always holds one entry.
#[cfg_attr(
    feature = "telemetry",
    tracing::instrument(
        name = "x402.build_payment_requirements",
        skip_all,
        fields(network = %input.network),
        err
    )
)]
pub async fn build_payment_requirements<R>(
    input: &PaymentRequirementsInput,
    resolver: &R,
    supported: Option<&dyn SupportedKindsSource>,
) -> Result<Vec<v1::PaymentRequirements>, RequirementsError>
where
    R: PriceResolver + Sync + ?Sized,
{
    let network = network_by_name(&input.network)
        .ok_or_else(|| RequirementsError::UnsupportedNetwork(input.network.clone()))?;
    let requirements = match network.family() {
        NetworkFamily::Evm => build_evm_payment_requirements(input, resolver)?,
        NetworkFamily::Svm => {
            let source = supported.ok_or(RequirementsError::MissingCollaborator(network))?;
            let kinds = source
                .supported_kinds()
                .await
                .map_err(RequirementsError::SupportedKinds)?;
            build_svm_payment_requirements(input, &kinds, resolver)?
        }
    };
    Ok(vec![requirements])
}
