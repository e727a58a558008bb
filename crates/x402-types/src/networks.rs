//! Registry of known blockchain networks and their families.
//!
//! Every network the x402 V1 protocol talks about belongs to exactly one of two
//! disjoint families:
//!
//! - **EVM** ([`NetworkFamily::Evm`]): account-based chains with Ethereum-style addresses
//!   and EIP-712 typed-data signing.
//! - **SVM** ([`NetworkFamily::Svm`]): Solana-style chains with base58 addresses and
//!   a fee-payer model.
//!
//! Family membership is always looked up in [`KNOWN_NETWORKS`], never inferred from the
//! shape of a network name.
//!
//! # Examples
//!
//! ```
//! use x402_types::networks::{Network, NetworkFamily, is_evm_network, is_svm_network};
//!
//! let base: Network = "base".parse().unwrap();
//! assert_eq!(base.family(), NetworkFamily::Evm);
//!
//! assert!(is_svm_network("solana-devnet"));
//! assert!(!is_evm_network("unknown-chain"));
//! assert!(!is_svm_network("unknown-chain"));
//! ```

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashMap;
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use std::sync::LazyLock;

/// The two network families understood by the protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NetworkFamily {
    /// Account/signature based chains (EIP-155).
    Evm,
    /// Instruction based chains (Solana virtual machine).
    Svm,
}

impl Display for NetworkFamily {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            NetworkFamily::Evm => f.write_str("evm"),
            NetworkFamily::Svm => f.write_str("svm"),
        }
    }
}

/// A known blockchain network, identified on the wire by its name (e.g. `"base-sepolia"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Network {
    Base,
    BaseSepolia,
    Polygon,
    PolygonAmoy,
    Avalanche,
    AvalancheFuji,
    Sei,
    SeiTestnet,
    Xdc,
    XrplEvm,
    Peaq,
    Iotex,
    Celo,
    CeloSepolia,
    Solana,
    SolanaDevnet,
}

/// A known network definition: the wire name and the family it belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkInfo {
    pub network: Network,
    /// Human-readable network name used on the wire (e.g. "base-sepolia", "solana")
    pub name: &'static str,
    pub family: NetworkFamily,
}

/// A static array of well-known blockchain networks, EVM networks first, then Solana networks.
///
/// The array populates [`NAME_TO_NETWORK`], which backs every name lookup in this crate.
pub static KNOWN_NETWORKS: &[NetworkInfo] = &[
    // EVM Networks
    // Base
    NetworkInfo {
        network: Network::Base,
        name: "base",
        family: NetworkFamily::Evm,
    },
    NetworkInfo {
        network: Network::BaseSepolia,
        name: "base-sepolia",
        family: NetworkFamily::Evm,
    },
    // Polygon
    NetworkInfo {
        network: Network::Polygon,
        name: "polygon",
        family: NetworkFamily::Evm,
    },
    NetworkInfo {
        network: Network::PolygonAmoy,
        name: "polygon-amoy",
        family: NetworkFamily::Evm,
    },
    // Avalanche
    NetworkInfo {
        network: Network::Avalanche,
        name: "avalanche",
        family: NetworkFamily::Evm,
    },
    NetworkInfo {
        network: Network::AvalancheFuji,
        name: "avalanche-fuji",
        family: NetworkFamily::Evm,
    },
    // Sei
    NetworkInfo {
        network: Network::Sei,
        name: "sei",
        family: NetworkFamily::Evm,
    },
    NetworkInfo {
        network: Network::SeiTestnet,
        name: "sei-testnet",
        family: NetworkFamily::Evm,
    },
    // XDC
    NetworkInfo {
        network: Network::Xdc,
        name: "xdc",
        family: NetworkFamily::Evm,
    },
    // XRPL EVM
    NetworkInfo {
        network: Network::XrplEvm,
        name: "xrpl-evm",
        family: NetworkFamily::Evm,
    },
    // Peaq
    NetworkInfo {
        network: Network::Peaq,
        name: "peaq",
        family: NetworkFamily::Evm,
    },
    // IoTeX
    NetworkInfo {
        network: Network::Iotex,
        name: "iotex",
        family: NetworkFamily::Evm,
    },
    // Celo Networks
    NetworkInfo {
        network: Network::Celo,
        name: "celo",
        family: NetworkFamily::Evm,
    },
    NetworkInfo {
        network: Network::CeloSepolia,
        name: "celo-sepolia",
        family: NetworkFamily::Evm,
    },
    // Solana Networks
    NetworkInfo {
        network: Network::Solana,
        name: "solana",
        family: NetworkFamily::Svm,
    },
    NetworkInfo {
        network: Network::SolanaDevnet,
        name: "solana-devnet",
        family: NetworkFamily::Svm,
    },
];

/// Lazy-initialized hashmap for network name to [`NetworkInfo`] lookups.
///
/// The lookup is case-sensitive: `"Base"` is not a known network.
pub static NAME_TO_NETWORK: LazyLock<HashMap<&'static str, &'static NetworkInfo>> =
    LazyLock::new(|| KNOWN_NETWORKS.iter().map(|n| (n.name, n)).collect());

/// Retrieves a [`Network`] by its wire name.
///
/// Returns `None` if the name is not in the known networks registry.
///
/// ```
/// use x402_types::networks::{Network, network_by_name};
///
/// assert_eq!(network_by_name("polygon-amoy"), Some(Network::PolygonAmoy));
/// assert!(network_by_name("unknown-network").is_none());
/// ```
pub fn network_by_name(name: &str) -> Option<Network> {
    NAME_TO_NETWORK.get(name).map(|info| info.network)
}

/// Returns `true` if `name` is a known EVM network. Never fails.
pub fn is_evm_network(name: &str) -> bool {
    network_by_name(name).is_some_and(|n| n.family() == NetworkFamily::Evm)
}

/// Returns `true` if `name` is a known SVM network. Never fails.
pub fn is_svm_network(name: &str) -> bool {
    network_by_name(name).is_some_and(|n| n.family() == NetworkFamily::Svm)
}

impl Network {
    /// All known networks, in registry order.
    pub fn all() -> impl Iterator<Item = Network> {
        KNOWN_NETWORKS.iter().map(|info| info.network)
    }

    fn info(&self) -> &'static NetworkInfo {
        KNOWN_NETWORKS
            .iter()
            .find(|info| info.network == *self)
            .expect("every Network variant is registered in KNOWN_NETWORKS")
    }

    /// The wire name of the network.
    pub fn name(&self) -> &'static str {
        self.info().name
    }

    pub fn family(&self) -> NetworkFamily {
        self.info().family
    }

    pub fn is_evm(&self) -> bool {
        self.family() == NetworkFamily::Evm
    }

    pub fn is_svm(&self) -> bool {
        self.family() == NetworkFamily::Svm
    }
}

/// Error returned when a network name is not in the registry.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unsupported network: {0}")]
pub struct UnknownNetwork(pub String);

impl FromStr for Network {
    type Err = UnknownNetwork;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        network_by_name(s).ok_or_else(|| UnknownNetwork(s.to_string()))
    }
}

impl Display for Network {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for Network {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for Network {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Error returned when a network is used where a network of another family is expected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Network {network} is not an {expected} network")]
pub struct NetworkFamilyMismatch {
    pub network: Network,
    pub expected: NetworkFamily,
}

/// Declares a network newtype restricted to a single [`NetworkFamily`].
///
/// The generated type can only be constructed from a network of the given family,
/// so a typed payload can never carry a network of the wrong family.
#[macro_export]
macro_rules! family_network {
    ($(#[$meta:meta])* $struct_name:ident, $family:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub struct $struct_name($crate::networks::Network);

        impl $struct_name {
            pub const FAMILY: $crate::networks::NetworkFamily = $family;

            pub fn network(&self) -> $crate::networks::Network {
                self.0
            }
        }

        impl TryFrom<$crate::networks::Network> for $struct_name {
            type Error = $crate::networks::NetworkFamilyMismatch;

            fn try_from(network: $crate::networks::Network) -> Result<Self, Self::Error> {
                if network.family() == Self::FAMILY {
                    Ok(Self(network))
                } else {
                    Err($crate::networks::NetworkFamilyMismatch {
                        network,
                        expected: Self::FAMILY,
                    })
                }
            }
        }

        impl From<$struct_name> for $crate::networks::Network {
            fn from(value: $struct_name) -> Self {
                value.0
            }
        }

        impl std::fmt::Display for $struct_name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                std::fmt::Display::fmt(&self.0, f)
            }
        }

        impl serde::Serialize for $struct_name {
            fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serde::Serialize::serialize(&self.0, serializer)
            }
        }

        impl<'de> serde::Deserialize<'de> for $struct_name {
            fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let network =
                    <$crate::networks::Network as serde::Deserialize>::deserialize(deserializer)?;
                Self::try_from(network).map_err(serde::de::Error::custom)
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_network_by_name() {
        assert_eq!(network_by_name("base"), Some(Network::Base));
        assert_eq!(network_by_name("base-sepolia"), Some(Network::BaseSepolia));
        assert_eq!(network_by_name("celo-sepolia"), Some(Network::CeloSepolia));
        assert_eq!(network_by_name("solana"), Some(Network::Solana));
        assert!(network_by_name("unknown").is_none());
        assert!(network_by_name("Base").is_none());
    }

    #[test]
    fn test_predicates_partition_known_networks() {
        for network in Network::all() {
            let evm = is_evm_network(network.name());
            let svm = is_svm_network(network.name());
            assert!(evm ^ svm, "{network} must be in exactly one family");
        }
        assert_eq!(Network::all().count(), KNOWN_NETWORKS.len());
    }

    #[test]
    fn test_predicates_reject_unknown_names() {
        for name in ["", "unknown-chain", "eip155:8453", "0x1", "SOLANA"] {
            assert!(!is_evm_network(name));
            assert!(!is_svm_network(name));
        }
    }

    #[test]
    fn test_name_round_trip() {
        for network in Network::all() {
            assert_eq!(network.name().parse::<Network>(), Ok(network));
            let json = serde_json::to_string(&network).unwrap();
            assert_eq!(json, format!("\"{}\"", network.name()));
        }
    }

    #[test]
    fn test_families() {
        assert!(Network::Iotex.is_evm());
        assert!(Network::XrplEvm.is_evm());
        assert!(Network::SolanaDevnet.is_svm());
        assert_eq!(
            "unknown-chain".parse::<Network>(),
            Err(UnknownNetwork("unknown-chain".to_string()))
        );
    }

    family_network!(TestSvmNetwork, NetworkFamily::Svm);

    #[test]
    fn test_family_network_rejects_other_family() {
        assert!(TestSvmNetwork::try_from(Network::Solana).is_ok());
        let err = TestSvmNetwork::try_from(Network::Base).unwrap_err();
        assert_eq!(err.expected, NetworkFamily::Svm);
        assert!(serde_json::from_str::<TestSvmNetwork>("\"base\"").is_err());
        let parsed: TestSvmNetwork = serde_json::from_str("\"solana-devnet\"").unwrap();
        assert_eq!(parsed.network(), Network::SolanaDevnet);
    }
}
