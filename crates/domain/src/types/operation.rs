//! Operation selector and remote run vocabulary

use serde::{Deserialize, Serialize};

use crate::impl_wire_enum_conversions;

/// Which Detect flow to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Operation {
    /// Start an asynchronous structured-text run and poll it to completion
    Deidentify,
    /// Single synchronous request/response
    Reidentify,
}

impl_wire_enum_conversions!(Operation {
    Deidentify => "DEIDENTIFY",
    Reidentify => "REIDENTIFY",
});

impl TryFrom<String> for Operation {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Operation> for String {
    fn from(value: Operation) -> Self {
        value.to_string()
    }
}

/// Status vocabulary reported by `GET /v1/detect/runs/{run_id}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RemoteRunStatus {
    Success,
    Failed,
    Error,
    /// Anything outside the terminal vocabulary, including an empty or
    /// missing status.
    InProgress,
}

impl_wire_enum_conversions!(RemoteRunStatus {
    Success => "SUCCESS",
    Failed => "FAILED",
    Error => "ERROR",
    InProgress => "IN_PROGRESS",
});

impl RemoteRunStatus {
    /// Classify a raw status string. Unknown values mean "still running".
    pub fn classify(raw: Option<&str>) -> Self {
        raw.and_then(|status| status.parse().ok()).unwrap_or(Self::InProgress)
    }

    /// `FAILED` and `ERROR` both end the run unsuccessfully.
    pub const fn is_failure(self) -> bool {
        matches!(self, Self::Failed | Self::Error)
    }
}
