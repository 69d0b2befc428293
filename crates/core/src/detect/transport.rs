//! Status gate and body parsing shared by every stage

use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use vaultdetect_domain::{DetectError, Result, TransportStage};

use super::ports::{DetectTransport, TransportRequest};

/// Send a request and return its body if the status is 2xx.
///
/// # Errors
/// - [`DetectError::Http`] carrying status and body for any non-2xx response
/// - whatever the transport reports when no response arrived
pub async fn send_checked(
    transport: &dyn DetectTransport,
    request: TransportRequest,
    stage: TransportStage,
) -> Result<String> {
    let method = request.method;
    let url = request.url.clone();

    let response = transport.send(request, stage).await?;
    if !response.is_success() {
        warn!(%method, %url, status = response.status, stage = stage.code(), "Detect request rejected");
        return Err(DetectError::Http { stage, status: response.status, body: response.body });
    }

    debug!(%method, %url, status = response.status, "Detect request succeeded");
    Ok(response.body)
}

/// Parse a 2xx body into its response DTO.
///
/// # Errors
/// Returns [`DetectError::InvalidResponse`] tagged with `stage`.
pub fn parse_body<T: DeserializeOwned>(body: &str, stage: TransportStage) -> Result<T> {
    serde_json::from_str(body)
        .map_err(|err| DetectError::InvalidResponse { stage, message: err.to_string() })
}
