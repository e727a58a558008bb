//! Wire format types for EVM chain interactions.
//!
//! This module provides types that handle serialization and deserialization
//! of EVM-specific values in the x402 protocol wire format.

use alloy_primitives::{Address, AddressError, U256, hex};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt::{Display, Formatter};
use std::ops::Mul;
use std::str::FromStr;
use x402_types::family_network;
use x402_types::networks::NetworkFamily;
use x402_types::requirements::{Eip712Domain, TokenAsset};
use x402_types::util::money_amount::{MoneyAmount, MoneyAmountParseError};

family_network!(
    /// A network of the EVM family.
    Eip155Network,
    NetworkFamily::Evm
);

/// An Ethereum address that serializes with EIP-55 checksum encoding.
///
/// Parsing requires the `0x` prefix. All-lowercase and all-uppercase input is accepted as is;
/// mixed-case input must carry a valid EIP-55 checksum.
///
/// # Example
///
/// ```
/// use x402_chain_eip155::chain::ChecksummedAddress;
///
/// let addr: ChecksummedAddress = "0xd8da6bf26964af9d7eed9e03e53415d37aa96045".parse().unwrap();
/// assert_eq!(addr.to_string(), "0xd8dA6BF26964aF9D7eEd9e03E53415D37aA96045");
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ChecksummedAddress(pub Address);

#[derive(Debug, thiserror::Error)]
pub enum ChecksummedAddressError {
    #[error("missing 0x prefix")]
    MissingPrefix,
    #[error(transparent)]
    Hex(#[from] hex::FromHexError),
    #[error("invalid EIP-55 checksum")]
    Checksum(#[source] AddressError),
}

impl FromStr for ChecksummedAddress {
    type Err = ChecksummedAddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s
            .strip_prefix("0x")
            .ok_or(ChecksummedAddressError::MissingPrefix)?;
        let address = Address::from_str(s)?;
        let has_lower = digits.chars().any(|c| c.is_ascii_lowercase());
        let has_upper = digits.chars().any(|c| c.is_ascii_uppercase());
        if has_lower && has_upper {
            Address::parse_checksummed(s, None).map_err(ChecksummedAddressError::Checksum)?;
        }
        Ok(Self(address))
    }
}

impl Display for ChecksummedAddress {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.to_checksum(None))
    }
}

impl Serialize for ChecksummedAddress {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0.to_checksum(None))
    }
}

impl<'de> Deserialize<'de> for ChecksummedAddress {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

impl From<ChecksummedAddress> for Address {
    fn from(value: ChecksummedAddress) -> Self {
        value.0
    }
}

impl From<Address> for ChecksummedAddress {
    fn from(address: Address) -> Self {
        Self(address)
    }
}

/// `U256` as a base-10 string.
///
/// `alloy` writes `U256` as `0x`-hex; x402 peers exchange amounts as decimal strings so that
/// JavaScript clients can hand them to `BigInt` directly. Only plain digit strings are accepted.
pub mod decimal_u256 {
    use alloy_primitives::U256;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &U256, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<U256, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(serde::de::Error::custom(format!(
                "expected a non-negative decimal integer string, got {s:?}"
            )));
        }
        U256::from_str_radix(&s, 10).map_err(serde::de::Error::custom)
    }
}

/// A token deployed on an EVM network.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Eip155TokenDeployment {
    pub network: Eip155Network,
    pub address: Address,
    /// Number of decimal places (6 for USDC, 18 for most ERC-20s).
    pub decimals: u8,
    /// EIP-712 domain for ERC-3009 signatures, when the token defines one.
    pub eip712: Option<Eip712Domain>,
}

impl Eip155TokenDeployment {
    /// Scales a human-readable amount into token units.
    ///
    /// Accepts formats like `"10.50"`, `"$10.50"`, `"1,000"`. Fails with
    /// [`MoneyAmountParseError::WrongPrecision`] if the input has more decimal places than
    /// the token.
    pub fn parse<V>(&self, v: V) -> Result<U256, MoneyAmountParseError>
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
        let multiplier = U256::from(10).pow(U256::from(scale_diff));
        let digits = money_amount.mantissa();
        Ok(U256::from(digits).mul(multiplier))
    }

    pub fn as_token_asset(&self) -> TokenAsset {
        TokenAsset {
            address: ChecksummedAddress(self.address).to_string(),
            decimals: self.decimals,
            eip712: self.eip712.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use x402_types::networks::Network;

    fn create_test_deployment(decimals: u8) -> Eip155TokenDeployment {
        Eip155TokenDeployment {
            network: Eip155Network::try_from(Network::Base).unwrap(),
            address: Address::ZERO,
            decimals,
            eip712: Some(Eip712Domain {
                name: "TestToken".into(),
                version: "2".into(),
            }),
        }
    }

    #[test]
    fn test_parse_whole_number() {
        let deployment = create_test_deployment(6);
        assert_eq!(deployment.parse("100").unwrap(), U256::from(100_000_000u64));
    }

    #[test]
    fn test_parse_with_decimals() {
        let deployment = create_test_deployment(6);
        assert_eq!(deployment.parse("1.50").unwrap(), U256::from(1_500_000u64));
    }

    #[test]
    fn test_parse_zero_decimals() {
        let deployment = create_test_deployment(0);
        assert_eq!(deployment.parse("42").unwrap(), U256::from(42u64));
    }

    #[test]
    fn test_parse_precision_too_high() {
        let deployment = create_test_deployment(2);
        let err = deployment.parse("1.234").unwrap_err();
        assert_eq!(
            err,
            MoneyAmountParseError::WrongPrecision { money: 3, token: 2 }
        );
    }

    #[test]
    fn test_parse_smallest_amount() {
        let deployment = create_test_deployment(6);
        assert_eq!(deployment.parse("0.000001").unwrap(), U256::from(1u64));
    }

    #[test]
    fn test_parse_with_currency_symbol_and_commas() {
        let deployment = create_test_deployment(6);
        assert_eq!(deployment.parse("$10.50").unwrap(), U256::from(10_500_000u64));
        assert_eq!(
            deployment.parse("1,000").unwrap(),
            U256::from(1_000_000_000u64)
        );
    }

    #[test]
    fn test_parse_very_large_amount_with_high_decimals() {
        let deployment = create_test_deployment(18);
        let expected = U256::from(999_999_999u64) * U256::from(10).pow(U256::from(18));
        assert_eq!(deployment.parse("999999999").unwrap(), expected);
    }

    #[test]
    fn test_checksummed_address_parsing() {
        let lower: ChecksummedAddress = "0x833589fcd6edb6e08f4c7c32d4f71b54bda02913"
            .parse()
            .unwrap();
        assert_eq!(
            lower.to_string(),
            "0x833589fCD6eDb6E08f4c7C32D4f71b54bdA02913"
        );
        assert!(
            "0x833589fCD6eDb6E08f4c7C32D4f71b54bdA02913"
                .parse::<ChecksummedAddress>()
                .is_ok()
        );
        assert!(matches!(
            "0x833589FCD6eDb6E08f4c7C32D4f71b54bdA02913".parse::<ChecksummedAddress>(),
            Err(ChecksummedAddressError::Checksum(_))
        ));
        assert!(matches!(
            "833589fcd6edb6e08f4c7c32d4f71b54bda02913".parse::<ChecksummedAddress>(),
            Err(ChecksummedAddressError::MissingPrefix)
        ));
        assert!(matches!(
            "0x1234".parse::<ChecksummedAddress>(),
            Err(ChecksummedAddressError::Hex(_))
        ));
    }

    #[test]
    fn test_decimal_u256_wire_form() {
        #[derive(Serialize, Deserialize)]
        struct Amount(#[serde(with = "decimal_u256")] U256);

        let max = U256::MAX;
        let json = serde_json::to_string(&Amount(max)).unwrap();
        assert_eq!(
            json,
            "\"115792089237316195423570985008687907853269984665640564039457584007913129639935\""
        );
        assert_eq!(serde_json::from_str::<Amount>(&json).unwrap().0, max);
        assert!(serde_json::from_str::<Amount>("\"0x10\"").is_err());
        assert!(serde_json::from_str::<Amount>("\"-1\"").is_err());
        assert!(serde_json::from_str::<Amount>("\"\"").is_err());
        assert!(serde_json::from_str::<Amount>("16").is_err());
    }
}
