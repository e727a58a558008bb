//! Command line configuration for the `x402-negotiate` binary.

use clap::{Parser, Subcommand};
use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use x402_types::requirements::PaymentRequirementsInput;

use crate::facilitator_client::{FacilitatorClient, FacilitatorClientError};

/// CLI arguments for x402 payment negotiation.
#[derive(Parser, Debug)]
#[command(name = "x402-negotiate")]
#[command(about = "Encode, decode and price x402 payments", version)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Validate a JSON payment payload and print its `X-PAYMENT` header value
    Encode {
        /// Path to the payment payload JSON document
        #[arg(long, short)]
        file: PathBuf,
    },
    /// Decode and validate an `X-PAYMENT` header value
    Decode {
        /// Base64 header value
        header: String,
    },
    /// Print the 402 response body for a route description
    Requirements {
        /// Path to the route JSON document
        #[arg(long, short)]
        route: PathBuf,
        #[command(flatten)]
        facilitator: FacilitatorArgs,
    },
}

/// Where to ask for the fee payer of Solana routes.
#[derive(clap::Args, Debug, Clone, Default)]
pub struct FacilitatorArgs {
    /// Base URL of the facilitator
    #[arg(long, env = "FACILITATOR_URL")]
    pub facilitator_url: Option<String>,
    /// Request timeout in milliseconds
    #[arg(long, env = "FACILITATOR_TIMEOUT_MS")]
    pub timeout_ms: Option<u64>,
}

impl FacilitatorArgs {
    /// Builds a client when a facilitator URL is configured.
    pub fn client(&self) -> Result<Option<FacilitatorClient>, FacilitatorClientError> {
        let Some(url) = self.facilitator_url.as_deref() else {
            return Ok(None);
        };
        let client = FacilitatorClient::try_from(url)?;
        let client = match self.timeout_ms {
            Some(ms) => client.with_timeout(Duration::from_millis(ms)),
            None => client,
        };
        Ok(Some(client))
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read {0}: {1}")]
    FileRead(PathBuf, std::io::Error),
    #[error("Failed to parse {0}: {1}")]
    JsonParse(PathBuf, serde_json::Error),
}

/// Reads a JSON document from `path`.
pub fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let content =
        fs::read_to_string(path).map_err(|e| ConfigError::FileRead(path.to_path_buf(), e))?;
    serde_json::from_str(&content).map_err(|e| ConfigError::JsonParse(path.to_path_buf(), e))
}

/// Reads a route description. `payTo` may reference the environment as `$VAR` or `${VAR}`.
pub fn load_route(path: &Path) -> Result<PaymentRequirementsInput, ConfigError> {
    load_json(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use x402_types::requirements::Price;

    fn write_temp(name: &str, content: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("x402-negotiate-{}-{name}", std::process::id()));
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_parse_subcommands() {
        let args = CliArgs::try_parse_from(["x402-negotiate", "decode", "eyJ9"]).unwrap();
        assert!(matches!(args.command, Command::Decode { header } if header == "eyJ9"));

        let args = CliArgs::try_parse_from([
            "x402-negotiate",
            "requirements",
            "--route",
            "route.json",
            "--facilitator-url",
            "https://facilitator.example",
            "--timeout-ms",
            "1500",
        ])
        .unwrap();
        let Command::Requirements { route, facilitator } = args.command else {
            panic!("expected the requirements command");
        };
        assert_eq!(route, PathBuf::from("route.json"));
        let client = facilitator.client().unwrap().unwrap();
        assert_eq!(client.timeout(), Some(Duration::from_millis(1500)));
        assert_eq!(
            client.supported_url().as_str(),
            "https://facilitator.example/supported"
        );

        assert!(CliArgs::try_parse_from(["x402-negotiate", "encode"]).is_err());
    }

    #[test]
    fn test_no_facilitator_configured() {
        assert!(FacilitatorArgs::default().client().unwrap().is_none());
    }

    #[test]
    fn test_load_route() {
        let path = write_temp(
            "route.json",
            r#"{
                "price": "$0.01",
                "network": "base-sepolia",
                "payTo": "0x209693Bc6afc0C5328bA36FaF03C514EF312287C",
                "resource": "https://api.example.com/weather",
                "description": "Weather report",
                "inputSchema": { "queryParams": { "city": "string" } }
            }"#,
        );
        let route = load_route(&path).unwrap();
        fs::remove_file(&path).unwrap();
        assert!(matches!(route.price, Price::Money(_)));
        assert_eq!(route.method, "GET");
        assert_eq!(route.description.as_deref(), Some("Weather report"));
        assert_eq!(
            route.http_output_schema()["input"]["queryParams"]["city"],
            "string"
        );
    }

    #[test]
    fn test_load_errors() {
        let missing = std::env::temp_dir().join("x402-negotiate-does-not-exist.json");
        assert!(matches!(
            load_route(&missing),
            Err(ConfigError::FileRead(..))
        ));
        let path = write_temp("broken.json", "{\"price\":");
        let err = load_route(&path).unwrap_err();
        fs::remove_file(&path).unwrap();
        assert!(matches!(err, ConfigError::JsonParse(..)));
    }
}
