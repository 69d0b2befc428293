//! # VaultDetect Infrastructure
//!
//! Infrastructure implementations of core ports.
//!
//! This crate contains:
//! - The reqwest-backed Detect transport
//! - Configuration loading (files, environment, `.env`)
//! - Logging setup
//! - The host-facing [`DetectConnector`]
//!
//! ## Architecture
//! - Implements traits defined in `vaultdetect-core`
//! - Contains all "impure" code (network, filesystem, environment)

pub mod config;
pub mod connector;
pub mod errors;
pub mod http;
pub mod observability;

// Re-export commonly used items
pub use connector::DetectConnector;
pub use errors::InfraError;
pub use http::{HttpClient, HttpClientBuilder};
pub use observability::{init_tracing, LogFormat};
