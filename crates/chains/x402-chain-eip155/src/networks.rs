//! USDC deployments on the known EVM networks.
//!
//! These are the default assets a money price (`"$0.01"`) resolves to. The EIP-712 domain is
//! what the token contract reports for `transferWithAuthorization`; XRPL EVM's USDC has none.

use alloy_primitives::{Address, address};
use x402_types::networks::Network;
use x402_types::requirements::Eip712Domain;

use crate::chain::{Eip155Network, Eip155TokenDeployment};

struct UsdcEntry {
    network: Network,
    address: Address,
    eip712_name: Option<&'static str>,
}

const USDC_DECIMALS: u8 = 6;
const USDC_EIP712_VERSION: &str = "2";

static USDC: &[UsdcEntry] = &[
    UsdcEntry {
        network: Network::Base,
        address: address!("0x833589fCD6eDb6E08f4c7C32D4f71b54bdA02913"),
        eip712_name: Some("USD Coin"),
    },
    UsdcEntry {
        network: Network::BaseSepolia,
        address: address!("0x036CbD53842c5426634e7929541eC2318f3dCF7e"),
        eip712_name: Some("USDC"),
    },
    UsdcEntry {
        network: Network::Polygon,
        address: address!("0x3c499c542cEF5E3811e1192ce70d8cC03d5c3359"),
        eip712_name: Some("USDC"),
    },
    UsdcEntry {
        network: Network::PolygonAmoy,
        address: address!("0x41E94Eb019C0762f9Bfcf9Fb1E58725BfB0e7582"),
        eip712_name: Some("USDC"),
    },
    UsdcEntry {
        network: Network::Avalanche,
        address: address!("0xB97EF9Ef8734C71904D8002F8b6Bc66Dd9c48a6E"),
        eip712_name: Some("USD Coin"),
    },
    UsdcEntry {
        network: Network::AvalancheFuji,
        address: address!("0x5425890298aed601595a70AB815c96711a31Bc65"),
        eip712_name: Some("USD Coin"),
    },
    UsdcEntry {
        network: Network::Sei,
        address: address!("0xe15fC38F6D8c56aF07bbCBe3BAf5708A2Bf42392"),
        eip712_name: Some("USDC"),
    },
    UsdcEntry {
        network: Network::SeiTestnet,
        address: address!("0x4fCF1784B31630811181f670Aea7A7bEF803eaED"),
        eip712_name: Some("USDC"),
    },
    UsdcEntry {
        network: Network::Xdc,
        address: address!("0xfA2958CB79b0491CC627c1557F441eF849Ca8eb1"),
        eip712_name: Some("USDC"),
    },
    UsdcEntry {
        network: Network::XrplEvm,
        address: address!("0xDaF4556169c4F3f2231d8ab7BC8772Ddb7D4c84C"),
        eip712_name: None,
    },
    UsdcEntry {
        network: Network::Peaq,
        address: address!("0xbbA60da06c2c5424f03f7434542280FCAd453d10"),
        eip712_name: Some("USDC"),
    },
    UsdcEntry {
        network: Network::Iotex,
        address: address!("0xcdf79194c6c285077a58da47641d4dbe51f63542"),
        eip712_name: Some("Bridged USDC"),
    },
    UsdcEntry {
        network: Network::Celo,
        address: address!("0xcebA9300f2b948710d2653dD7B07f33A8B32118C"),
        eip712_name: Some("USDC"),
    },
    UsdcEntry {
        network: Network::CeloSepolia,
        address: address!("0x01C5C0122039549AD1493B8220cABEdD739BC44E"),
        eip712_name: Some("USDC"),
    },
];

impl Eip155TokenDeployment {
    /// USDC on `network`, if there is a known deployment.
    pub fn usdc(network: Eip155Network) -> Option<Self> {
        USDC.iter()
            .find(|entry| entry.network == network.network())
            .map(|entry| Eip155TokenDeployment {
                network,
                address: entry.address,
                decimals: USDC_DECIMALS,
                eip712: entry.eip712_name.map(|name| Eip712Domain {
                    name: name.to_string(),
                    version: USDC_EIP712_VERSION.to_string(),
                }),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_evm_network_has_usdc() {
        for network in Network::all().filter(Network::is_evm) {
            let network = Eip155Network::try_from(network).unwrap();
            let usdc = Eip155TokenDeployment::usdc(network)
                .unwrap_or_else(|| panic!("no USDC on {network}"));
            assert_eq!(usdc.decimals, 6);
        }
    }

    #[test]
    fn test_eip712_domains() {
        let base = Eip155TokenDeployment::usdc(Network::Base.try_into().unwrap()).unwrap();
        assert_eq!(
            base.eip712,
            Some(Eip712Domain {
                name: "USD Coin".into(),
                version: "2".into()
            })
        );
        let sepolia = Eip155TokenDeployment::usdc(Network::BaseSepolia.try_into().unwrap()).unwrap();
        assert_eq!(sepolia.eip712.unwrap().name, "USDC");
        let xrpl = Eip155TokenDeployment::usdc(Network::XrplEvm.try_into().unwrap()).unwrap();
        assert!(xrpl.eip712.is_none());
    }
}
