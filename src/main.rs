//! x402 payment negotiation CLI.
//!
//! - `encode --file payload.json` prints the `X-PAYMENT` header value for a payment payload
//! - `decode <HEADER>` validates a header value and prints the payload as JSON
//! - `requirements --route route.json` prints the 402 response body for a route
//!
//! Environment:
//! - `.env` values loaded at startup
//! - `FACILITATOR_URL`, `FACILITATOR_TIMEOUT_MS` configure the facilitator asked for Solana fee payers
//! - `RUST_LOG` controls log verbosity

use clap::Parser;
use dotenvy::dotenv;
use serde_json::Value;
use std::process;
use x402_negotiate::config::{CliArgs, Command, load_json, load_route};
use x402_negotiate::requirements::{DefaultPriceResolver, build_payment_requirements};
use x402_negotiate::{PaymentPayload, decode, encode};
use x402_types::facilitator::SupportedKindsSource;
use x402_types::proto::v1::PaymentRequired;

#[cfg(feature = "telemetry")]
use x402_negotiate::telemetry::Telemetry;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("{e}");
        process::exit(1)
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();

    #[cfg(feature = "telemetry")]
    let _telemetry = Telemetry::new()
        .with_name(env!("CARGO_PKG_NAME"))
        .with_version(env!("CARGO_PKG_VERSION"))
        .register();

    let args = CliArgs::parse();
    match args.command {
        Command::Encode { file } => {
            let json: Value = load_json(&file)?;
            let payload = PaymentPayload::from_json(&json)?;
            println!("{}", encode(&payload)?);
        }
        Command::Decode { header } => {
            let payload = decode(&header)?;
            tracing::info!(network = %payload.network(), "payment payload is valid");
            println!("{}", serde_json::to_string_pretty(&payload)?);
        }
        Command::Requirements { route, facilitator } => {
            let input = load_route(&route)?;
            let client = facilitator.client()?;
            let source = client.as_ref().map(|c| c as &dyn SupportedKindsSource);
            let accepts = build_payment_requirements(&input, &DefaultPriceResolver, source).await?;
            let body = PaymentRequired::new(accepts);
            println!("{}", serde_json::to_string_pretty(&body)?);
        }
    }
    Ok(())
}
