use serde::{Deserialize, Deserializer, Serialize, Serializer};
use solana_pubkey::Pubkey;
use std::fmt::{Debug, Display, Formatter};
use std::str::FromStr;
use x402_types::family_network;
use x402_types::networks::NetworkFamily;
use x402_types::requirements::TokenAsset;
use x402_types::util::money_amount::{MoneyAmount, MoneyAmountParseError};

family_network!(
    /// A network of the Solana (SVM) family.
    SolanaNetwork,
    NetworkFamily::Svm
);

/// Information about an SPL token deployment on a Solana network.
///
/// # Example
///
/// ```rust
/// use x402_chain_solana::chain::{Address, SolanaNetwork, SolanaTokenDeployment};
/// use x402_types::networks::Network;
/// use std::str::FromStr;
///
/// let usdc = SolanaTokenDeployment::new(
///     SolanaNetwork::try_from(Network::Solana).unwrap(),
///     Address::from_str("EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v").unwrap(),
///     6,
/// );
///
/// assert_eq!(usdc.parse("10.50").unwrap(), 10_500_000); // 10.50 * 10^6
/// ```
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct SolanaTokenDeployment {
    pub network: SolanaNetwork,
    /// The SPL token mint address.
    pub address: Address,
    pub decimals: u8,
}

impl SolanaTokenDeployment {
    pub fn new(network: SolanaNetwork, address: Address, decimals: u8) -> Self {
        Self {
            network,
            address,
            decimals,
        }
    }

    /// Scales a human-readable amount into token units.
    ///
    /// SPL amounts are `u64`, so anything that overflows is [`MoneyAmountParseError::OutOfRange`].
    pub fn parse<V>(&self, v: V) -> Result<u64, MoneyAmountParseError>
    where
        V: TryInto<MoneyAmount>,
        MoneyAmountParseError: From<<V as TryInto<MoneyAmount>>::Error>,
    {
        let money_amount = v.try_into()?;
        let scale = money_amount.scale();
        let token_scale = self.decimals as u32;
        if scale > token_scale {
            return Err(MoneyAmountParseError::WrongPrecision {
                money: scale,
                token: token_scale,
            });
        }
        let scale_diff = token_scale - scale;
        let multiplier = 10u64
            .checked_pow(scale_diff)
            .ok_or(MoneyAmountParseError::OutOfRange)?;
        let digits = u64::try_from(money_amount.mantissa())
            .map_err(|_| MoneyAmountParseError::OutOfRange)?;
        digits
            .checked_mul(multiplier)
            .ok_or(MoneyAmountParseError::OutOfRange)
    }

    pub fn as_token_asset(&self) -> TokenAsset {
        TokenAsset {
            address: self.address.to_string(),
            decimals: self.decimals,
            eip712: None,
        }
    }
}

/// A Solana public key address.
///
/// This is a wrapper around [`Pubkey`] that provides serialization as a
/// base58-encoded string, suitable for use in x402 protocol messages.
///
/// # Example
///
/// ```
/// use x402_chain_solana::chain::Address;
/// use std::str::FromStr;
///
/// let addr = Address::from_str("EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v").unwrap();
/// assert_eq!(addr.to_string(), "EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v");
/// ```
#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub struct Address(Pubkey);

impl Address {
    pub const fn new(pubkey: Pubkey) -> Self {
        Self(pubkey)
    }
}

impl From<Pubkey> for Address {
    fn from(pubkey: Pubkey) -> Self {
        Self(pubkey)
    }
}

impl Serialize for Address {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

impl Display for Address {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Address {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let pubkey =
            Pubkey::from_str(s).map_err(|_| format!("Failed to decode Solana address: {s}"))?;
        Ok(Self(pubkey))
    }
}
