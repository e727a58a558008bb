//! V1 EIP-155 "exact" payment scheme.
//!
//! Buyers pay with an ERC-3009 `transferWithAuthorization` signed over the token's EIP-712
//! domain. This module defines the payload wire types with their schema and builds the
//! matching payment requirements.

pub mod server;
pub use server::*;

pub mod types;
pub use types::*;
