use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use vaultdetect_core::{DetectTransport, TransportRequest, TransportResponse};
use vaultdetect_domain::{DetectError, Result as DomainResult, TransportStage};

/// In-memory `DetectTransport` replaying a fixed script.
///
/// Each call pops the next scripted outcome. Running past the end of the
/// script yields a network error so over-polling shows up as a failure.
#[derive(Default, Clone)]
pub struct ScriptedTransport {
    script: Arc<Mutex<VecDeque<DomainResult<TransportResponse>>>>,
    sent: Arc<Mutex<Vec<(TransportRequest, TransportStage)>>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a response with the given status and body.
    pub fn respond(self, status: u16, body: impl Into<String>) -> Self {
        self.script.lock().unwrap().push_back(Ok(TransportResponse::new(status, body)));
        self
    }

    /// Queue a failure that never produced a response.
    pub fn fail_with(self, message: &str) -> Self {
        let message = message.to_string();
        self.script.lock().unwrap().push_back(Err(DetectError::Network {
            // Stage is rewritten on delivery
            stage: TransportStage::Poll,
            message,
        }));
        self
    }

    pub fn requests(&self) -> Vec<TransportRequest> {
        self.sent.lock().unwrap().iter().map(|(request, _)| request.clone()).collect()
    }

    pub fn stages(&self) -> Vec<TransportStage> {
        self.sent.lock().unwrap().iter().map(|(_, stage)| *stage).collect()
    }

    pub fn call_count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }

    pub fn remaining(&self) -> usize {
        self.script.lock().unwrap().len()
    }
}

#[async_trait]
impl DetectTransport for ScriptedTransport {
    async fn send(
        &self,
        request: TransportRequest,
        stage: TransportStage,
    ) -> DomainResult<TransportResponse> {
        self.sent.lock().unwrap().push((request, stage));

        match self.script.lock().unwrap().pop_front() {
            Some(Ok(response)) => Ok(response),
            Some(Err(DetectError::Network { message, .. })) => {
                Err(DetectError::Network { stage, message })
            }
            Some(Err(other)) => Err(other),
            None => Err(DetectError::Network { stage, message: "script exhausted".into() }),
        }
    }
}
