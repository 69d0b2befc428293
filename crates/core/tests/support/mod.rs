//! Shared test helpers for `vaultdetect-core` integration tests.
//!
//! The scripted transport replays canned responses in order and records
//! every request, so dispatcher tests can assert on traffic without HTTP.

#![allow(dead_code)]

pub mod transport;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde_json::{json, Value};
use vaultdetect_domain::{Operation, OperationRequest};

pub use transport::ScriptedTransport;

pub const BASE_URL: &str = "http://detect.test";
pub const VAULT_ID: &str = "vault-123";
pub const API_TOKEN: &str = "test-token";

/// Request with a short poll cadence suitable for tests.
pub fn request(operation: Operation, payload: Value) -> OperationRequest {
    OperationRequest {
        operation,
        base_url: BASE_URL.to_string(),
        vault_id: VAULT_ID.to_string(),
        api_token: API_TOKEN.to_string(),
        payload,
        token_type: "vault_token".to_string(),
        entity_types: None,
        poll_interval_ms: 10,
        max_poll_attempts: 3,
    }
}

/// Base64 of the compact JSON rendering of `value`.
pub fn encoded(value: &Value) -> String {
    STANDARD.encode(value.to_string())
}

pub fn run_started(run_id: &str) -> String {
    json!({ "run_id": run_id }).to_string()
}

pub fn run_status(status: &str) -> String {
    json!({ "status": status }).to_string()
}

pub fn run_succeeded(processed: &Value) -> String {
    json!({
        "status": "SUCCESS",
        "output_type": "BASE64",
        "output": [{ "processed_file": encoded(processed), "processed_file_type": "json" }]
    })
    .to_string()
}
