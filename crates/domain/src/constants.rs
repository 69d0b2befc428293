//! Detect API constants
//!
//! Centralized location for endpoint paths, defaults and wire literals.

// Polling defaults
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 1500;
pub const DEFAULT_MAX_POLL_ATTEMPTS: u32 = 40;

// Request defaults
pub const DEFAULT_TOKEN_TYPE: &str = "vault_token";
pub const STATIC_TOKEN_TYPE: &str = "static_token";
pub const DATA_FORMAT_JSON: &str = "json";

// Vault hosts
pub const PRODUCTION_VAULT_DOMAIN: &str = "vault.skyflowapis.com";
pub const SANDBOX_VAULT_DOMAIN: &str = "vault.skyflowapis-preview.com";

// Endpoint paths, relative to the normalized base URL
pub const DEIDENTIFY_STRUCTURED_TEXT_PATH: &str = "/v1/detect/deidentify/file/structured_text";
pub const RUNS_PATH: &str = "/v1/detect/runs";
pub const REIDENTIFY_FILE_PATH: &str = "/v1/detect/reidentify/file";

// HTTP
pub const AUTHORIZATION_HEADER: &str = "Authorization";
pub const BEARER_PREFIX: &str = "Bearer ";
pub const CONTENT_TYPE_HEADER: &str = "Content-Type";
pub const CONTENT_TYPE_JSON: &str = "application/json";
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 20;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 60;
