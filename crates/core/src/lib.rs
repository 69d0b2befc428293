//! # VaultDetect Core
//!
//! Connector logic with no HTTP client of its own.
//!
//! This crate contains:
//! - The payload envelope codec
//! - Vault URL normalization and input binding
//! - The transport port and the operation dispatcher with its poll loop
//!
//! ## Architecture Principles
//! - Only depends on `vaultdetect-domain`
//! - All network access goes through [`DetectTransport`]

pub mod binding;
pub mod codec;
pub mod detect;
pub mod vault_url;

pub use binding::resolve_request;
pub use codec::{decode_processed_file, encode_payload};
pub use detect::{
    DetectService, DetectTransport, HttpMethod, OperationPlan, PollSchedule, TransportRequest,
    TransportResponse,
};
pub use vault_url::normalize_base_url;
