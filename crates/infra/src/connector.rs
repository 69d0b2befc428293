//! Host-facing connector entry point
//!
//! Wires the reqwest transport, configured defaults and the core dispatcher
//! together. A host binds its loosely typed variables, calls one of the
//! `execute*` methods, and gets back the decoded processed file.

use std::sync::Arc;

use serde_json::{json, Value};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use vaultdetect_core::{resolve_request, DetectService, DetectTransport};
use vaultdetect_domain::{
    Authentication, Config, ConnectorInput, DetectError, ProcessedResult, RequestDefaults,
    Result,
};

use crate::http::HttpClient;

/// Detect connector bound to one configuration.
///
/// Cheap to clone; clones share the HTTP connection pool.
#[derive(Clone)]
pub struct DetectConnector {
    service: DetectService,
    defaults: RequestDefaults,
    fallback_auth: Option<Authentication>,
}

impl DetectConnector {
    /// Build a connector backed by a reqwest client configured from `config`.
    ///
    /// # Errors
    /// Returns `DetectError::Config` if the HTTP client cannot be built.
    pub fn from_config(config: &Config) -> Result<Self> {
        let client = HttpClient::from_config(&config.http)?;
        Ok(Self::with_transport(Arc::new(client), config))
    }

    /// Build a connector over any transport.
    pub fn with_transport(transport: Arc<dyn DetectTransport>, config: &Config) -> Self {
        Self {
            service: DetectService::new(transport),
            defaults: config.request_defaults(),
            fallback_auth: config.authentication(),
        }
    }

    pub async fn execute(&self, input: ConnectorInput) -> Result<ProcessedResult> {
        self.execute_with_cancellation(input, &CancellationToken::new()).await
    }

    pub async fn execute_with_cancellation(
        &self,
        input: ConnectorInput,
        cancel: &CancellationToken,
    ) -> Result<ProcessedResult> {
        let request = resolve_request(input, &self.defaults)?;
        let operation = request.operation;

        match self.service.execute_with_cancellation(&request, cancel).await {
            Ok(result) => {
                info!(%operation, keys = result.len(), "Detect operation completed");
                Ok(result)
            }
            Err(err) => {
                warn!(%operation, code = err.code(), error = %err, "Detect operation failed");
                Err(err)
            }
        }
    }

    /// Bind raw camelCase variables and execute.
    ///
    /// When the variables carry no `authentication` object, configured
    /// credentials are used instead.
    ///
    /// # Errors
    /// Returns `DetectError::InvalidInput` if the variables do not bind, plus
    /// every error [`execute`](Self::execute) can return.
    pub async fn execute_variables(&self, variables: Value) -> Result<ProcessedResult> {
        let input = self.bind(variables)?;
        self.execute(input).await
    }

    fn bind(&self, mut variables: Value) -> Result<ConnectorInput> {
        if let (Some(object), Some(auth)) = (variables.as_object_mut(), &self.fallback_auth) {
            object.entry("authentication").or_insert_with(|| {
                json!({
                    "vaultUri": auth.vault_uri,
                    "vaultId": auth.vault_id,
                    "apiToken": auth.api_token,
                })
            });
        }

        serde_json::from_value(variables)
            .map_err(|err| DetectError::InvalidInput(format!("invalid connector input: {err}")))
    }
}
