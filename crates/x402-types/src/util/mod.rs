//! Utility types and functions for x402.
//!
//! - [`b64`] - Base64 encoding/decoding for header values
//! - [`lit_str`] - Compile-time string literal types
//! - [`money_amount`] - Human-readable currency amount parsing

pub mod b64;
pub mod lit_str;
pub mod money_amount;

pub use b64::*;
