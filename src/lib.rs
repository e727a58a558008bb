//! x402 payment negotiation.
//!
//! The two pieces of the x402 protocol where independently written clients and servers have to
//! agree byte for byte:
//!
//! - [`codec`] - the `X-PAYMENT` header: base64 of the payment payload's JSON, with large EVM
//!   integers as decimal strings, and strict validation on decode.
//! - [`requirements`] - the `PaymentRequirements` a seller advertises in its 402 response,
//!   following the rules of each network family (EIP-55 addresses and EIP-712 domains on EVM, the
//!   facilitator's fee payer on Solana).
//!
//! [`facilitator_client`] fetches a remote facilitator's supported payment kinds for the Solana
//! builder.

pub mod codec;
pub mod config;
pub mod facilitator_client;
pub mod requirements;
pub mod telemetry;

pub use codec::{PaymentPayload, PaymentPayloadError, decode, encode};
pub use requirements::{
    DefaultPriceResolver, build_payment_requirements, is_evm_network, is_svm_network,
};
