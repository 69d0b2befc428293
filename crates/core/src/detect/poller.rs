//! Run status poll loop
//!
//! Drives a started run from `Running` to a terminal [`RunState`]. Every
//! attempt issues one status request; non-terminal responses are followed by
//! a fixed wait, including after the final attempt. A poll request that
//! fails or returns non-2xx ends the loop immediately.

use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use vaultdetect_domain::{
    DetectError, OperationRequest, ProcessedResult, RemoteRunStatus, Result, RunHandle,
    RunState, RunStatusResponse, TransportStage,
};

use super::plan::run_status_url;
use super::ports::{DetectTransport, TransportRequest};
use super::transport::{parse_body, send_checked};
use crate::codec;

/// Poll cadence for one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollSchedule {
    pub interval: Duration,
    pub max_attempts: u32,
}

impl PollSchedule {
    /// # Errors
    /// Returns [`DetectError::InvalidInput`] when either value is zero.
    pub fn new(interval_ms: u64, max_attempts: u32) -> Result<Self> {
        if interval_ms == 0 {
            return Err(DetectError::InvalidInput("poll interval must be positive".into()));
        }
        if max_attempts == 0 {
            return Err(DetectError::InvalidInput("max poll attempts must be positive".into()));
        }
        Ok(Self { interval: Duration::from_millis(interval_ms), max_attempts })
    }

    pub fn from_request(request: &OperationRequest) -> Result<Self> {
        Self::new(request.poll_interval_ms, request.max_poll_attempts)
    }
}

/// Polls one vault's run status endpoint.
pub struct RunPoller<'a> {
    transport: &'a dyn DetectTransport,
    base_url: &'a str,
    vault_id: &'a str,
    api_token: &'a str,
    schedule: PollSchedule,
}

impl<'a> RunPoller<'a> {
    pub fn new(
        transport: &'a dyn DetectTransport,
        request: &'a OperationRequest,
        schedule: PollSchedule,
    ) -> Self {
        Self {
            transport,
            base_url: &request.base_url,
            vault_id: &request.vault_id,
            api_token: &request.api_token,
            schedule,
        }
    }

    /// Poll until the run reaches a terminal state.
    ///
    /// # Errors
    /// - [`DetectError::RunFailed`] when the service reports FAILED or ERROR
    /// - [`DetectError::PollTimeout`] after `max_attempts` non-terminal polls
    /// - [`DetectError::Cancelled`] when `cancel` fires during a wait
    /// - any POLL_FAILED error from the status request itself
    /// - codec errors from decoding the processed file
    pub async fn poll_until_complete(
        &self,
        handle: &RunHandle,
        cancel: &CancellationToken,
    ) -> Result<ProcessedResult> {
        let url = run_status_url(self.base_url, handle, self.vault_id);
        let mut attempts = 0;

        while attempts < self.schedule.max_attempts {
            attempts += 1;

            let request = TransportRequest::get(url.clone(), self.api_token);
            let body = send_checked(self.transport, request, TransportStage::Poll).await?;
            let response: RunStatusResponse = parse_body(&body, TransportStage::Poll)?;
            let raw_status = response.status.as_deref().unwrap_or_default();

            match RemoteRunStatus::classify(response.status.as_deref()) {
                RemoteRunStatus::Success => {
                    info!(run_id = %handle, attempts, state = ?RunState::Succeeded, "Detect run completed");
                    return codec::decode_processed_file(response.first_processed_file());
                }
                status if status.is_failure() => {
                    warn!(run_id = %handle, attempts, status = raw_status, state = ?RunState::Failed, "Detect run failed");
                    return Err(DetectError::RunFailed { status: raw_status.to_string(), body });
                }
                _ => {
                    debug!(run_id = %handle, attempt = attempts, status = raw_status, state = ?RunState::Running, "Detect run still in progress");
                }
            }

            tokio::select! {
                () = cancel.cancelled() => {
                    info!(run_id = %handle, attempts, state = ?RunState::Cancelled, "Detect poll cancelled");
                    return Err(DetectError::Cancelled { attempts });
                }
                () = tokio::time::sleep(self.schedule.interval) => {}
            }
        }

        warn!(run_id = %handle, attempts, state = ?RunState::TimedOut, "Detect run did not complete");
        Err(DetectError::PollTimeout { attempts: self.schedule.max_attempts })
    }
}
