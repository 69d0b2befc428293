//! Invocation input types

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::operation::Operation;

/// Decoded processed file returned to the caller.
pub type ProcessedResult = Map<String, Value>;

/// Fully resolved input for one dispatch.
///
/// Built once per invocation and never mutated; the dispatcher is a pure
/// function of this value plus the transport.
#[derive(Clone, PartialEq)]
pub struct OperationRequest {
    pub operation: Operation,
    /// Normalized base URL without trailing slash
    pub base_url: String,
    pub vault_id: String,
    pub api_token: String,
    /// Must be a JSON object or a string holding one
    pub payload: Value,
    pub token_type: String,
    pub entity_types: Option<Vec<String>>,
    pub poll_interval_ms: u64,
    pub max_poll_attempts: u32,
}

impl OperationRequest {
    /// Entity list to send, or `None` when the field must be omitted.
    pub fn requested_entity_types(&self) -> Option<Vec<String>> {
        self.entity_types.as_ref().filter(|types| !types.is_empty()).cloned()
    }
}

impl fmt::Debug for OperationRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OperationRequest")
            .field("operation", &self.operation)
            .field("base_url", &self.base_url)
            .field("vault_id", &self.vault_id)
            .field("api_token", &"<redacted>")
            .field("token_type", &self.token_type)
            .field("entity_types", &self.entity_types)
            .field("poll_interval_ms", &self.poll_interval_ms)
            .field("max_poll_attempts", &self.max_poll_attempts)
            .finish_non_exhaustive()
    }
}

/// Vault credentials, already validated by the host.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Authentication {
    /// Vault subdomain (e.g. `ebfc9bee4242`) or a full URL override
    pub vault_uri: String,
    pub vault_id: String,
    #[serde(skip_serializing)]
    pub api_token: String,
}

impl fmt::Debug for Authentication {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Authentication")
            .field("vault_uri", &self.vault_uri)
            .field("vault_id", &self.vault_id)
            .field("api_token", &"<redacted>")
            .finish()
    }
}

/// Loosely typed variables as a host runtime binds them.
///
/// Optional fields fall back to configured defaults when the request is
/// resolved.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectorInput {
    pub authentication: Authentication,
    pub operation: Operation,
    #[serde(default)]
    pub payload: Value,
    #[serde(default)]
    pub token_type: Option<String>,
    #[serde(default)]
    pub entity_types: Option<Vec<String>>,
    #[serde(default)]
    pub sandbox: Option<bool>,
    #[serde(default)]
    pub poll_interval_ms: Option<u64>,
    #[serde(default)]
    pub max_poll_attempts: Option<u32>,
}
