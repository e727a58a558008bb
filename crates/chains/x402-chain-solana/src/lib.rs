//! Solana chain support for x402 payment negotiation.
//!
//! - [`chain`] - Network newtype, base58 addresses, SPL token deployments
//! - [`networks`] - Default USDC mints
//! - [`v1_solana_exact`] - `exact` payload types, fee payer discovery and the requirements builder
//!
//! # Feature Flags
//!
//! - `telemetry` - Tracing spans and events around requirements building

pub mod chain;
pub mod networks;
pub mod v1_solana_exact;
