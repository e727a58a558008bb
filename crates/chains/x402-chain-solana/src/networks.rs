//! USDC mints on the known Solana networks.

use solana_pubkey::pubkey;
use x402_types::networks::Network;

use crate::chain::{SolanaNetwork, SolanaTokenDeployment};

impl SolanaTokenDeployment {
    /// USDC on `network`, if there is a known mint.
    pub fn usdc(network: SolanaNetwork) -> Option<Self> {
        let mint = match network.network() {
            Network::Solana => pubkey!("EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v"),
            Network::SolanaDevnet => pubkey!("4zMMC9srt5Ri5X14GAgXhaHii3GnPAEERYPJgZJDncDU"),
            _ => return None,
        };
        Some(SolanaTokenDeployment::new(network, mint.into(), 6))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_usdc_mints() {
        for network in Network::all().filter(Network::is_svm) {
            let usdc = SolanaTokenDeployment::usdc(network.try_into().unwrap()).unwrap();
            assert_eq!(usdc.decimals, 6);
        }
        let mainnet = SolanaTokenDeployment::usdc(Network::Solana.try_into().unwrap()).unwrap();
        assert_eq!(
            mainnet.address.to_string(),
            "EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v"
        );
    }
}
