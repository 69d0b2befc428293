//! Resolve host-bound input into an [`OperationRequest`]

use vaultdetect_domain::{ConnectorInput, DetectError, OperationRequest, RequestDefaults, Result};

use crate::vault_url::normalize_base_url;

/// Apply defaults to unset fields and normalize the vault URL.
///
/// A blank `tokenType` counts as unset.
///
/// # Errors
/// Returns [`DetectError::InvalidInput`] for a zero poll interval or zero
/// max attempts, or blank vault credentials.
pub fn resolve_request(input: ConnectorInput, defaults: &RequestDefaults) -> Result<OperationRequest> {
    let ConnectorInput {
        authentication,
        operation,
        payload,
        token_type,
        entity_types,
        sandbox,
        poll_interval_ms,
        max_poll_attempts,
    } = input;

    require_non_blank("vaultUri", &authentication.vault_uri)?;
    require_non_blank("vaultId", &authentication.vault_id)?;
    require_non_blank("apiToken", &authentication.api_token)?;

    let poll_interval_ms = poll_interval_ms.unwrap_or(defaults.poll_interval_ms);
    if poll_interval_ms == 0 {
        return Err(DetectError::InvalidInput("pollIntervalMs must be positive".into()));
    }
    let max_poll_attempts = max_poll_attempts.unwrap_or(defaults.max_poll_attempts);
    if max_poll_attempts == 0 {
        return Err(DetectError::InvalidInput("maxPollAttempts must be positive".into()));
    }

    let token_type = token_type
        .filter(|value| !value.trim().is_empty())
        .unwrap_or_else(|| defaults.token_type.clone());

    Ok(OperationRequest {
        operation,
        base_url: normalize_base_url(&authentication.vault_uri, sandbox.unwrap_or(defaults.sandbox)),
        vault_id: authentication.vault_id,
        api_token: authentication.api_token,
        payload,
        token_type,
        entity_types,
        poll_interval_ms,
        max_poll_attempts,
    })
}

fn require_non_blank(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(DetectError::InvalidInput(format!("authentication.{field} is required")));
    }
    Ok(())
}
