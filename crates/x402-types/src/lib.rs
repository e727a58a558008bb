#![cfg_attr(docsrs, feature(doc_auto_cfg))]

//! Core types for x402 payment negotiation.
//!
//! A server answers an unpaid request with HTTP 402 and a list of
//! [`PaymentRequirements`](proto::v1::PaymentRequirements). The client signs a matching
//! [`PaymentPayload`](proto::v1::PaymentPayload), encodes it and retries with it in a header.
//! This crate holds the chain-agnostic half of that exchange; EVM and Solana specifics live
//! in the `x402-chain-eip155` and `x402-chain-solana` crates.
//!
//! # Modules
//!
//! - [`networks`] - Registry of known networks and their family (EVM or SVM)
//! - [`proto`] - V1 wire format types
//! - [`schema`] - Payload validation with field-path diagnostics
//! - [`requirements`] - Builder inputs, price resolution and builder errors
//! - [`facilitator`] - Source of a facilitator's supported payment kinds
//! - [`config`] - Environment variable resolution for route documents
//! - [`timestamp`] - Unix timestamps in their string wire form
//! - [`util`] - Helper types (base64, string literals, money amounts)

pub mod config;
pub mod facilitator;
pub mod networks;
pub mod proto;
pub mod requirements;
pub mod schema;
pub mod timestamp;
pub mod util;
