//! EVM chain primitives for x402.
//!
//! - [`Eip155Network`] - A [`Network`](x402_types::networks::Network) of the EVM family
//! - [`ChecksummedAddress`] - EIP-55 address with strict parsing
//! - [`decimal_u256`] - `U256` as a decimal string on the wire
//! - [`Eip155TokenDeployment`] - Token address, decimals and EIP-712 domain

pub mod types;
pub use types::*;
