//! Run handle and poll loop states

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::{DetectError, Result};

/// Identifier of a server-side deidentify run.
///
/// Only a successful start call produces one; a blank identifier is rejected
/// instead of producing a degenerate handle.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RunHandle {
    run_id: String,
}

impl RunHandle {
    /// Build a handle from the `run_id` field of a start response.
    ///
    /// # Errors
    /// Returns [`DetectError::MissingRunId`] when the id is absent or blank.
    pub fn from_start_response(run_id: Option<String>) -> Result<Self> {
        match run_id {
            Some(run_id) if !run_id.trim().is_empty() => Ok(Self { run_id }),
            _ => Err(DetectError::MissingRunId),
        }
    }

    pub fn run_id(&self) -> &str {
        &self.run_id
    }
}

impl fmt::Display for RunHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.run_id)
    }
}

/// Poll loop state. Everything except `Running` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RunState {
    Running,
    Succeeded,
    Failed,
    TimedOut,
    Cancelled,
}

impl RunState {
    pub const fn is_terminal(self) -> bool {
        !matches!(self, Self::Running)
    }
}
