//! Configuration loader
//!
//! Loads connector configuration from files and environment variables.
//!
//! ## Loading Strategy
//! 1. Reads a `.env` file into the process environment, if one exists
//! 2. Probes multiple paths for a config file (JSON or TOML); built-in
//!    defaults apply when none is found
//! 3. Applies environment variable overrides on top
//!
//! ## Environment Variables
//! - `VAULTDETECT_VAULT_URI`: Vault subdomain or full base URL
//! - `VAULTDETECT_VAULT_ID`: Vault identifier
//! - `VAULTDETECT_API_TOKEN`: Bearer token
//! - `VAULTDETECT_SANDBOX`: Use the preview domain (true/false)
//! - `VAULTDETECT_POLL_INTERVAL_MS`: Wait between run status polls
//! - `VAULTDETECT_MAX_POLL_ATTEMPTS`: Poll budget per run
//! - `VAULTDETECT_CONNECT_TIMEOUT_SECS`: HTTP connect timeout
//! - `VAULTDETECT_REQUEST_TIMEOUT_SECS`: HTTP request timeout
//!
//! ## File Locations
//! The loader probes the following paths (in order):
//! 1. `./vaultdetect.json` or `./vaultdetect.toml` (current working directory)
//! 2. `./config.json` or `./config.toml` (current working directory)
//! 3. The same names in the parent and grandparent directories
//! 4. Relative to executable location

use std::path::{Path, PathBuf};
use std::str::FromStr;

use vaultdetect_domain::{Config, DetectError, Result};

const FILE_STEMS: [&str; 2] = ["vaultdetect", "config"];
const FILE_EXTENSIONS: [&str; 2] = ["json", "toml"];

/// Load configuration with automatic fallback strategy
///
/// # Errors
/// Returns `DetectError::Config` if a config file exists but cannot be read
/// or parsed, or if an environment override has an invalid value.
pub fn load() -> Result<Config> {
    if let Ok(path) = dotenvy::dotenv() {
        tracing::debug!(path = %path.display(), "Loaded .env file");
    }

    let mut config = match probe_config_paths() {
        Some(path) => load_from_file(Some(path))?,
        None => {
            tracing::debug!("No config file found, using defaults");
            Config::default()
        }
    };

    apply_env_overrides(&mut config)?;
    Ok(config)
}

/// Load configuration from environment variables over built-in defaults
///
/// # Errors
/// Returns `DetectError::Config` if a variable has an invalid value.
pub fn load_from_env() -> Result<Config> {
    let mut config = Config::default();
    apply_env_overrides(&mut config)?;
    tracing::info!("Configuration loaded from environment variables");
    Ok(config)
}

/// Overlay any `VAULTDETECT_*` variables that are set onto `config`.
///
/// # Errors
/// Returns `DetectError::Config` if a numeric variable does not parse.
pub fn apply_env_overrides(config: &mut Config) -> Result<()> {
    let connection = &mut config.connection;
    if let Some(value) = env_opt("VAULTDETECT_VAULT_URI") {
        connection.vault_uri = Some(value);
    }
    if let Some(value) = env_opt("VAULTDETECT_VAULT_ID") {
        connection.vault_id = Some(value);
    }
    if let Some(value) = env_opt("VAULTDETECT_API_TOKEN") {
        connection.api_token = Some(value);
    }
    connection.sandbox = env_bool("VAULTDETECT_SANDBOX", connection.sandbox);

    if let Some(value) = env_parse("VAULTDETECT_POLL_INTERVAL_MS")? {
        config.polling.interval_ms = value;
    }
    if let Some(value) = env_parse("VAULTDETECT_MAX_POLL_ATTEMPTS")? {
        config.polling.max_attempts = value;
    }
    if let Some(value) = env_parse("VAULTDETECT_CONNECT_TIMEOUT_SECS")? {
        config.http.connect_timeout_secs = value;
    }
    if let Some(value) = env_parse("VAULTDETECT_REQUEST_TIMEOUT_SECS")? {
        config.http.request_timeout_secs = value;
    }

    Ok(())
}

/// Load configuration from a file
///
/// If `path` is `None`, probes multiple locations for config files.
/// Supports both JSON and TOML formats (detected by file extension).
///
/// # Errors
/// Returns `DetectError::Config` if:
/// - File not found (when path is specified)
/// - No config file found (when path is `None`)
/// - File format is invalid
pub fn load_from_file(path: Option<PathBuf>) -> Result<Config> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(DetectError::Config(format!("Config file not found: {}", p.display())));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            DetectError::Config("No config file found in any of the standard locations".to_string())
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| DetectError::Config(format!("Failed to read config file: {e}")))?;

    parse_config(&contents, &config_path)
}

/// Parse configuration from string content, by file extension.
fn parse_config(contents: &str, path: &Path) -> Result<Config> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| DetectError::Config(format!("Invalid TOML format: {e}"))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| DetectError::Config(format!("Invalid JSON format: {e}"))),
        _ => Err(DetectError::Config(format!("Unsupported config format: {extension}"))),
    }
}

/// Probe multiple paths for configuration files
///
/// # Returns
/// The first config file found, or `None` if no file exists.
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut candidates = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        candidates.extend(candidates_in(&cwd));
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            candidates.extend(candidates_in(exe_dir));
        }
    }

    candidates.into_iter().find(|path| path.exists())
}

fn candidates_in(dir: &Path) -> Vec<PathBuf> {
    let mut paths = Vec::new();
    for base in [dir.to_path_buf(), dir.join(".."), dir.join("../..")] {
        for stem in FILE_STEMS {
            for extension in FILE_EXTENSIONS {
                paths.push(base.join(format!("{stem}.{extension}")));
            }
        }
    }
    paths
}

/// Non-empty environment variable, if set.
fn env_opt(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|value| !value.trim().is_empty())
}

fn env_parse<T>(key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    env_opt(key)
        .map(|raw| {
            raw.trim()
                .parse::<T>()
                .map_err(|e| DetectError::Config(format!("Invalid value for {key}: {e}")))
        })
        .transpose()
}

/// Parse boolean from environment variable
///
/// Accepts: `1`/`0`, `true`/`false`, `yes`/`no`, `on`/`off` (case-insensitive)
fn env_bool(key: &str, default: bool) -> bool {
    std::env::var(key)
        .ok()
        .map(|s| matches!(s.to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"))
        .unwrap_or(default)
}
