//! Per-operation request plans

use vaultdetect_domain::constants::{
    DEIDENTIFY_STRUCTURED_TEXT_PATH, REIDENTIFY_FILE_PATH, RUNS_PATH,
};
use vaultdetect_domain::{
    DeidentifyStructuredTextRequest, FileEnvelope, Operation, OperationRequest,
    ReidentifyFileRequest, RunHandle, TokenTypeSpec,
};

/// What a single invocation will send, decided from the operation.
#[derive(Debug, Clone, PartialEq)]
pub enum OperationPlan {
    /// Start an async run, then poll it
    Deidentify(DeidentifyStructuredTextRequest),
    /// One synchronous call
    Reidentify(ReidentifyFileRequest),
}

impl OperationPlan {
    /// Build the plan for `request` around an already-encoded payload.
    pub fn for_request(request: &OperationRequest, encoded_payload: String) -> Self {
        let file = FileEnvelope::json(encoded_payload);
        match request.operation {
            Operation::Deidentify => Self::Deidentify(DeidentifyStructuredTextRequest {
                file,
                vault_id: request.vault_id.clone(),
                token_type: TokenTypeSpec { default: request.token_type.clone() },
                entity_types: request.requested_entity_types(),
            }),
            Operation::Reidentify => Self::Reidentify(ReidentifyFileRequest {
                file,
                vault_id: request.vault_id.clone(),
            }),
        }
    }

    pub const fn operation(&self) -> Operation {
        match self {
            Self::Deidentify(_) => Operation::Deidentify,
            Self::Reidentify(_) => Operation::Reidentify,
        }
    }
}

pub fn deidentify_url(base_url: &str) -> String {
    format!("{base_url}{DEIDENTIFY_STRUCTURED_TEXT_PATH}")
}

pub fn reidentify_url(base_url: &str) -> String {
    format!("{base_url}{REIDENTIFY_FILE_PATH}")
}

/// Run status URL with the run id and vault id percent-encoded.
pub fn run_status_url(base_url: &str, handle: &RunHandle, vault_id: &str) -> String {
    format!(
        "{base_url}{RUNS_PATH}/{}?vault_id={}",
        urlencoding::encode(handle.run_id()),
        urlencoding::encode(vault_id)
    )
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn request(operation: Operation, entity_types: Option<Vec<String>>) -> OperationRequest {
        OperationRequest {
            operation,
            base_url: "http://localhost:9000".into(),
            vault_id: "vault-123".into(),
            api_token: "tok".into(),
            payload: json!({ "name": "John" }),
            token_type: "vault_token".into(),
            entity_types,
            poll_interval_ms: 10,
            max_poll_attempts: 3,
        }
    }

    #[test]
    fn deidentify_body_shape() {
        let plan = OperationPlan::for_request(
            &request(Operation::Deidentify, Some(vec!["EMAIL".into(), "NAME".into()])),
            "e30=".into(),
        );
        let OperationPlan::Deidentify(body) = plan else { panic!("expected deidentify plan") };

        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({
                "file": { "base64": "e30=", "data_format": "json" },
                "vault_id": "vault-123",
                "token_type": { "default": "vault_token" },
                "entity_types": ["EMAIL", "NAME"]
            })
        );
    }

    #[test]
    fn empty_entity_types_are_omitted() {
        let plan =
            OperationPlan::for_request(&request(Operation::Deidentify, Some(vec![])), "e30=".into());
        let OperationPlan::Deidentify(body) = plan else { panic!("expected deidentify plan") };
        let value = serde_json::to_value(&body).unwrap();
        assert!(value.get("entity_types").is_none());
    }

    #[test]
    fn reidentify_body_has_no_token_type() {
        let plan = OperationPlan::for_request(&request(Operation::Reidentify, None), "e30=".into());
        assert_eq!(plan.operation(), Operation::Reidentify);
        let OperationPlan::Reidentify(body) = plan else { panic!("expected reidentify plan") };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({ "file": { "base64": "e30=", "data_format": "json" }, "vault_id": "vault-123" })
        );
    }

    #[test]
    fn run_status_url_encodes_identifiers() {
        let handle = RunHandle::from_start_response(Some("run 1/2".into())).unwrap();
        assert_eq!(
            run_status_url("http://host", &handle, "vault&id"),
            "http://host/v1/detect/runs/run%201%2F2?vault_id=vault%26id"
        );
    }

    #[test]
    fn endpoint_urls() {
        assert_eq!(
            deidentify_url("http://host"),
            "http://host/v1/detect/deidentify/file/structured_text"
        );
        assert_eq!(reidentify_url("http://host"), "http://host/v1/detect/reidentify/file");
    }
}
