//! Configuration management

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_CONNECT_TIMEOUT_SECS, DEFAULT_MAX_POLL_ATTEMPTS, DEFAULT_POLL_INTERVAL_MS,
    DEFAULT_REQUEST_TIMEOUT_SECS, DEFAULT_TOKEN_TYPE,
};
use crate::types::Authentication;

/// Connector configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub connection: ConnectionConfig,
    #[serde(default)]
    pub polling: PollingConfig,
    #[serde(default)]
    pub http: HttpConfig,
}

/// Vault connection settings
///
/// Credentials are optional here because hosts usually bind them per
/// invocation; when all three are present they serve as a fallback.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionConfig {
    #[serde(default)]
    pub vault_uri: Option<String>,
    #[serde(default)]
    pub vault_id: Option<String>,
    #[serde(default, skip_serializing)]
    pub api_token: Option<String>,
    #[serde(default)]
    pub sandbox: bool,
}

/// Poll loop settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PollingConfig {
    #[serde(default = "default_poll_interval_ms")]
    pub interval_ms: u64,
    #[serde(default = "default_max_poll_attempts")]
    pub max_attempts: u32,
}

/// HTTP transport settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpConfig {
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    #[serde(default)]
    pub user_agent: Option<String>,
}

/// Values applied to connector input fields the host left unset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestDefaults {
    pub sandbox: bool,
    pub token_type: String,
    pub poll_interval_ms: u64,
    pub max_poll_attempts: u32,
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self { interval_ms: DEFAULT_POLL_INTERVAL_MS, max_attempts: DEFAULT_MAX_POLL_ATTEMPTS }
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            connect_timeout_secs: DEFAULT_CONNECT_TIMEOUT_SECS,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            user_agent: None,
        }
    }
}

impl Default for RequestDefaults {
    fn default() -> Self {
        Self {
            sandbox: false,
            token_type: DEFAULT_TOKEN_TYPE.to_string(),
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
            max_poll_attempts: DEFAULT_MAX_POLL_ATTEMPTS,
        }
    }
}

impl Config {
    /// Defaults for per-invocation input derived from this configuration.
    pub fn request_defaults(&self) -> RequestDefaults {
        RequestDefaults {
            sandbox: self.connection.sandbox,
            poll_interval_ms: self.polling.interval_ms,
            max_poll_attempts: self.polling.max_attempts,
            ..RequestDefaults::default()
        }
    }

    /// Configured credentials, when all three fields are present.
    pub fn authentication(&self) -> Option<Authentication> {
        let connection = &self.connection;
        Some(Authentication {
            vault_uri: connection.vault_uri.clone()?,
            vault_id: connection.vault_id.clone()?,
            api_token: connection.api_token.clone()?,
        })
    }
}

const fn default_poll_interval_ms() -> u64 {
    DEFAULT_POLL_INTERVAL_MS
}

const fn default_max_poll_attempts() -> u32 {
    DEFAULT_MAX_POLL_ATTEMPTS
}

const fn default_connect_timeout_secs() -> u64 {
    DEFAULT_CONNECT_TIMEOUT_SECS
}

const fn default_request_timeout_secs() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SECS
}
