//! # VaultDetect Domain
//!
//! Data model for the Detect de-identification connector.
//!
//! This crate contains:
//! - Invocation input types (`OperationRequest`, `ConnectorInput`)
//! - Wire DTOs for the Detect REST API
//! - The error taxonomy and Result definition
//! - Configuration structures and constants
//!
//! ## Architecture
//! - No dependencies on other VaultDetect crates
//! - Only serde and thiserror
//! - Pure data, no I/O

pub mod config;
pub mod constants;
pub mod errors;
pub mod macros;
pub mod types;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
