//! Error types used throughout the connector
//!
//! Every failure carries a stable machine-readable code (see
//! [`DetectError::code`]) and a human-readable message that embeds the most
//! relevant remote diagnostic (HTTP status and body, or run status and body).

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Which outbound call a transport failure belongs to.
///
/// The stage decides the error code reported for non-2xx responses,
/// undeliverable requests and unparsable bodies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransportStage {
    /// `POST /v1/detect/deidentify/file/structured_text`
    DeidentifyStart,
    /// `GET /v1/detect/runs/{run_id}`
    Poll,
    /// `POST /v1/detect/reidentify/file`
    Reidentify,
}

impl TransportStage {
    /// Stable error code for failures at this stage.
    pub const fn code(self) -> &'static str {
        match self {
            Self::DeidentifyStart => "DEIDENTIFY_START_FAILED",
            Self::Poll => "POLL_FAILED",
            Self::Reidentify => "REIDENTIFY_FAILED",
        }
    }
}

/// Coarse error taxonomy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Caller-supplied data or a malformed remote envelope
    Input,
    /// Non-2xx status or undeliverable request
    Transport,
    /// The remote run reported `FAILED` or `ERROR`
    RemoteState,
    /// Poll attempts exhausted while the run was still going
    Timeout,
    /// Polling stopped by the caller's cancellation token
    Cancelled,
    /// Configuration could not be loaded or the client could not be built
    Config,
}

/// Main error type for Detect operations
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "detail")]
pub enum DetectError {
    #[error("Payload is required")]
    EmptyPayload,

    #[error("Payload must be a JSON object; got: {0}")]
    BadPayload(String),

    #[error("Detect response did not include run_id")]
    MissingRunId,

    #[error("Missing processed_file in Detect response")]
    MissingProcessedFile,

    #[error("Failed to decode processed_file: {0}")]
    Decode(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Detect request failed: HTTP {status} - {body}")]
    Http { stage: TransportStage, status: u16, body: String },

    #[error("Detect request could not be delivered: {message}")]
    Network { stage: TransportStage, message: String },

    #[error("Detect response could not be parsed: {message}")]
    InvalidResponse { stage: TransportStage, message: String },

    #[error("Detect run status: {status} - {body}")]
    RunFailed { status: String, body: String },

    #[error("Detect run did not complete after {attempts} attempts")]
    PollTimeout { attempts: u32 },

    #[error("Detect run polling cancelled after {attempts} attempts")]
    Cancelled { attempts: u32 },

    #[error("Configuration error: {0}")]
    Config(String),
}

impl DetectError {
    /// Stable machine-readable error code.
    pub const fn code(&self) -> &'static str {
        match self {
            Self::EmptyPayload => "EMPTY_PAYLOAD",
            Self::BadPayload(_) => "BAD_PAYLOAD",
            Self::MissingRunId => "MISSING_RUN_ID",
            Self::MissingProcessedFile => "MISSING_PROCESSED_FILE",
            Self::Decode(_) => "DECODE_FAILED",
            Self::InvalidInput(_) => "INVALID_INPUT",
            Self::Http { stage, .. }
            | Self::Network { stage, .. }
            | Self::InvalidResponse { stage, .. } => stage.code(),
            Self::RunFailed { .. } => "RUN_FAILED",
            Self::PollTimeout { .. } => "POLL_TIMEOUT",
            Self::Cancelled { .. } => "CANCELLED",
            Self::Config(_) => "CONFIG",
        }
    }

    /// Taxonomy bucket for this error.
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::EmptyPayload
            | Self::BadPayload(_)
            | Self::MissingRunId
            | Self::MissingProcessedFile
            | Self::Decode(_)
            | Self::InvalidInput(_) => ErrorKind::Input,
            Self::Http { .. } | Self::Network { .. } | Self::InvalidResponse { .. } => {
                ErrorKind::Transport
            }
            Self::RunFailed { .. } => ErrorKind::RemoteState,
            Self::PollTimeout { .. } => ErrorKind::Timeout,
            Self::Cancelled { .. } => ErrorKind::Cancelled,
            Self::Config(_) => ErrorKind::Config,
        }
    }

    /// No failure is retried outside the poll loop's own schedule.
    pub const fn is_retryable(&self) -> bool {
        false
    }

    /// Flatten into the `{code, message}` pair a host runtime reports.
    pub fn to_report(&self) -> ErrorReport {
        ErrorReport { code: self.code().to_string(), message: self.to_string() }
    }
}

/// Serializable `{code, message}` view of a [`DetectError`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorReport {
    pub code: String,
    pub message: String,
}

/// Result type alias for Detect operations
pub type Result<T> = std::result::Result<T, DetectError>;
