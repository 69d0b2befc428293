//! Example: De-identifying a JSON payload against a live vault
//!
//! Credentials come from the usual configuration sources (config file,
//! `.env`, `VAULTDETECT_*` variables).
//!
//! # Setup
//!
//! 1. Export credentials:
//!    `export VAULTDETECT_VAULT_URI=ebfc9bee4242 VAULTDETECT_VAULT_ID=...
//!    VAULTDETECT_API_TOKEN=...`
//!
//! 2. Run this example:
//!    `cargo run --example deidentify_payload -- DEIDENTIFY '{"name":"John Doe"}'`

use anyhow::{anyhow, Context};
use serde_json::{json, Value};
use vaultdetect_infra::{config, init_tracing, DetectConnector, LogFormat};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let format = std::env::var("VAULTDETECT_LOG_FORMAT")
        .ok()
        .and_then(|raw| raw.parse().ok())
        .unwrap_or(LogFormat::Pretty);
    init_tracing(format);

    let mut args = std::env::args().skip(1);
    let operation = args.next().unwrap_or_else(|| "DEIDENTIFY".to_string());
    let payload = args.next().unwrap_or_else(|| r#"{"name":"John Doe","email":"john@example.com"}"#.to_string());

    let config = config::load().context("loading configuration")?;
    if config.authentication().is_none() {
        return Err(anyhow!(
            "vault credentials missing: set VAULTDETECT_VAULT_URI, VAULTDETECT_VAULT_ID and VAULTDETECT_API_TOKEN"
        ));
    }

    let connector = DetectConnector::from_config(&config)?;
    let result = connector
        .execute_variables(json!({ "operation": operation, "payload": payload }))
        .await
        .map_err(|err| anyhow!("{}: {}", err.code(), err))?;

    println!("{}", serde_json::to_string_pretty(&Value::Object(result))?);
    Ok(())
}
