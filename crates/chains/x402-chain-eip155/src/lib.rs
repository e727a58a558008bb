//! EIP-155 (EVM) chain support for x402 payment negotiation.
//!
//! - [`chain`] - Network newtype, checksummed addresses, decimal `U256`, token deployments
//! - [`networks`] - Default USDC deployments
//! - [`v1_eip155_exact`] - `exact` payload types and the requirements builder
//!
//! # Feature Flags
//!
//! - `telemetry` - Tracing spans and events around requirements building

pub mod chain;
pub mod networks;
pub mod v1_eip155_exact;
