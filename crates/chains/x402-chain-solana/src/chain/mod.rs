//! Solana chain primitives for x402.
//!
//! - [`SolanaNetwork`] - A [`Network`](x402_types::networks::Network) of the SVM family
//! - [`Address`] - Base58 public key
//! - [`SolanaTokenDeployment`] - SPL mint and decimals

pub mod types;
pub use types::*;
