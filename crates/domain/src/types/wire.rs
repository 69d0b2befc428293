//! Request and response bodies for the Detect REST API
//!
//! Field names follow the service: snake_case on the wire. Run status output
//! items are also accepted in camelCase, which some Detect deployments emit.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::constants::DATA_FORMAT_JSON;

/// Base64 file envelope shared by every request shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileEnvelope {
    pub base64: String,
    pub data_format: String,
}

impl FileEnvelope {
    /// Wrap an already-encoded JSON document.
    pub fn json(base64: impl Into<String>) -> Self {
        Self { base64: base64.into(), data_format: DATA_FORMAT_JSON.to_string() }
    }
}

/// `token_type` object of the structured-text request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenTypeSpec {
    pub default: String,
}

/// Body for `POST /v1/detect/deidentify/file/structured_text`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeidentifyStructuredTextRequest {
    pub file: FileEnvelope,
    pub vault_id: String,
    pub token_type: TokenTypeSpec,
    /// Omitted entirely when the caller wants every supported entity type.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity_types: Option<Vec<String>>,
}

/// Body for `POST /v1/detect/reidentify/file`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReidentifyFileRequest {
    pub file: FileEnvelope,
    pub vault_id: String,
}

/// Response of the structured-text start call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RunStartResponse {
    #[serde(default)]
    pub run_id: Option<String>,
}

/// Response of `GET /v1/detect/runs/{run_id}`.
///
/// Run diagnostics (`size`, `duration`, counts) are kept as raw JSON; nothing
/// reads them and their shape must never fail a finished run.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RunStatusResponse {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default, alias = "outputType")]
    pub output_type: Option<String>,
    #[serde(default)]
    pub output: Option<Vec<ProcessedOutput>>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub size: Option<Value>,
    #[serde(default, alias = "wordCharacterCount")]
    pub word_character_count: Option<Value>,
    #[serde(default)]
    pub duration: Option<Value>,
    #[serde(default)]
    pub pages: Option<Value>,
    #[serde(default)]
    pub slides: Option<Value>,
}

impl RunStatusResponse {
    /// Processed file of the first output element, if any.
    pub fn first_processed_file(&self) -> Option<&str> {
        self.output.as_deref()?.first()?.processed_file.as_deref()
    }
}

/// One processed artifact in a run or re-identify response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ProcessedOutput {
    #[serde(default, alias = "processedFile")]
    pub processed_file: Option<String>,
    #[serde(default, alias = "processedFileType")]
    pub processed_file_type: Option<String>,
    #[serde(default, alias = "processedFileExtension")]
    pub processed_file_extension: Option<String>,
}

/// Response of `POST /v1/detect/reidentify/file`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ReidentifyResponse {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default, alias = "outputType")]
    pub output_type: Option<String>,
    #[serde(default)]
    pub output: Option<ProcessedOutput>,
}

impl ReidentifyResponse {
    /// Processed file carried in the synchronous envelope, if any.
    pub fn processed_file(&self) -> Option<&str> {
        self.output.as_ref()?.processed_file.as_deref()
    }
}
