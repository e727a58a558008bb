//! V1 Solana "exact" payment scheme.
//!
//! Buyers pay with a partially signed SPL transfer transaction that the facilitator co-signs
//! as fee payer. The fee payer is advertised by the facilitator in its `/supported` kinds, so
//! building requirements for this scheme needs that list.

pub mod server;
pub use server::*;

pub mod types;
pub use types::*;
