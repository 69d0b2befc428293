//! Detect operation dispatcher

use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::{info, instrument};
use vaultdetect_domain::{
    DeidentifyStructuredTextRequest, OperationRequest, ProcessedResult, ReidentifyFileRequest,
    ReidentifyResponse, Result, RunHandle, RunStartResponse, TransportStage,
};

use super::plan::{deidentify_url, reidentify_url, OperationPlan};
use super::poller::{PollSchedule, RunPoller};
use super::ports::{DetectTransport, TransportRequest};
use super::transport::{parse_body, send_checked};
use crate::codec;

/// Runs one DEIDENTIFY or REIDENTIFY invocation against a transport.
///
/// Holds no per-invocation state, so one service can serve concurrent
/// invocations.
#[derive(Clone)]
pub struct DetectService {
    transport: Arc<dyn DetectTransport>,
}

impl DetectService {
    pub fn new(transport: Arc<dyn DetectTransport>) -> Self {
        Self { transport }
    }

    /// Execute the request to completion.
    ///
    /// The payload is encoded before any network traffic, so payload errors
    /// never reach the transport.
    pub async fn execute(&self, request: &OperationRequest) -> Result<ProcessedResult> {
        self.execute_with_cancellation(request, &CancellationToken::new()).await
    }

    /// Execute the request, abandoning a deidentify poll loop when `cancel`
    /// fires.
    #[instrument(
        name = "detect.execute",
        skip_all,
        fields(operation = %request.operation, vault_id = %request.vault_id)
    )]
    pub async fn execute_with_cancellation(
        &self,
        request: &OperationRequest,
        cancel: &CancellationToken,
    ) -> Result<ProcessedResult> {
        let encoded = codec::encode_payload(&request.payload)?;

        match OperationPlan::for_request(request, encoded) {
            OperationPlan::Deidentify(body) => {
                let schedule = PollSchedule::from_request(request)?;
                let handle = self.start_deidentify(request, &body).await?;
                RunPoller::new(self.transport.as_ref(), request, schedule)
                    .poll_until_complete(&handle, cancel)
                    .await
            }
            OperationPlan::Reidentify(body) => self.reidentify(request, &body).await,
        }
    }

    async fn start_deidentify(
        &self,
        request: &OperationRequest,
        body: &DeidentifyStructuredTextRequest,
    ) -> Result<RunHandle> {
        let stage = TransportStage::DeidentifyStart;
        let http_request =
            TransportRequest::post_json(deidentify_url(&request.base_url), &request.api_token, body)?;

        let response_body = send_checked(self.transport.as_ref(), http_request, stage).await?;
        let response: RunStartResponse = parse_body(&response_body, stage)?;
        let handle = RunHandle::from_start_response(response.run_id)?;

        info!(run_id = %handle, "Detect run started");
        Ok(handle)
    }

    async fn reidentify(
        &self,
        request: &OperationRequest,
        body: &ReidentifyFileRequest,
    ) -> Result<ProcessedResult> {
        let stage = TransportStage::Reidentify;
        let http_request =
            TransportRequest::post_json(reidentify_url(&request.base_url), &request.api_token, body)?;

        let response_body = send_checked(self.transport.as_ref(), http_request, stage).await?;
        let response: ReidentifyResponse = parse_body(&response_body, stage)?;
        codec::decode_processed_file(response.processed_file())
    }
}
