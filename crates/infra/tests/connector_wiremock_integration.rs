//! End-to-end connector tests against a mock Detect API
//!
//! Exercises binding, the reqwest transport, the dispatcher and the poll
//! loop together.

use std::net::TcpListener;
use std::time::Duration;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde_json::{json, Value};
use tokio_util::sync::CancellationToken;
use vaultdetect_domain::constants::STATIC_TOKEN_TYPE;
use vaultdetect_domain::{Config, ConnectorInput, DetectError};
use vaultdetect_infra::DetectConnector;
use wiremock::matchers::{body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const DEIDENTIFY_PATH: &str = "/v1/detect/deidentify/file/structured_text";
const REIDENTIFY_PATH: &str = "/v1/detect/reidentify/file";

fn connector() -> DetectConnector {
    DetectConnector::from_config(&Config::default()).expect("connector")
}

fn encoded(value: &Value) -> String {
    STANDARD.encode(value.to_string())
}

fn input(server: &MockServer, extra: Value) -> ConnectorInput {
    input_for(&server.uri(), extra)
}

fn input_for(vault_uri: &str, extra: Value) -> ConnectorInput {
    let mut variables = json!({
        "authentication": {
            "vaultUri": vault_uri,
            "vaultId": "vault-123",
            "apiToken": "test-token"
        },
        "operation": "DEIDENTIFY",
        "payload": { "name": "John Doe", "age": 30 },
        "pollIntervalMs": 100,
        "maxPollAttempts": 5
    });
    if let (Some(target), Some(extra)) = (variables.as_object_mut(), extra.as_object()) {
        target.extend(extra.clone());
    }
    serde_json::from_value(variables).expect("connector input")
}

async fn mount_start(server: &MockServer, run_id: &str) {
    Mock::given(method("POST"))
        .and(path(DEIDENTIFY_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "run_id": run_id })))
        .expect(1)
        .mount(server)
        .await;
}

async fn mount_run_status(server: &MockServer, run_id: &str, body: Value, expected_calls: u64) {
    Mock::given(method("GET"))
        .and(path(format!("/v1/detect/runs/{run_id}")))
        .and(query_param("vault_id", "vault-123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .expect(expected_calls)
        .mount(server)
        .await;
}

fn succeeded(output: &Value) -> Value {
    json!({
        "status": "SUCCESS",
        "outputType": "UNKNOWN",
        "output": [{
            "processedFile": encoded(output),
            "processedFileType": "reidentified_file",
            "processedFileExtension": "json"
        }]
    })
}

#[tokio::test]
async fn deidentify_starts_and_polls_run() {
    let server = MockServer::start().await;
    let tokenized = json!({ "name": "[NAME_1]", "age": "[AGE_1]" });
    mount_start(&server, "test-run-123").await;
    mount_run_status(&server, "test-run-123", succeeded(&tokenized), 1).await;

    let result = connector().execute(input(&server, json!({}))).await.unwrap();

    assert_eq!(Value::Object(result), tokenized);
}

#[tokio::test]
async fn deidentify_sends_envelope_and_static_token_type() {
    let server = MockServer::start().await;
    let payload = json!({ "name": "John Doe", "age": 30 });

    Mock::given(method("POST"))
        .and(path(DEIDENTIFY_PATH))
        .and(body_partial_json(json!({
            "file": { "base64": encoded(&payload), "data_format": "json" },
            "vault_id": "vault-123",
            "token_type": { "default": STATIC_TOKEN_TYPE }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "run_id": "test-run-static" })))
        .expect(1)
        .mount(&server)
        .await;
    mount_run_status(&server, "test-run-static", succeeded(&json!({ "ok": true })), 1).await;

    connector()
        .execute(input(&server, json!({ "tokenType": STATIC_TOKEN_TYPE })))
        .await
        .unwrap();
}

#[tokio::test]
async fn deidentify_sends_entity_types_in_order() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(DEIDENTIFY_PATH))
        .and(body_partial_json(json!({ "entity_types": ["EMAIL", "PHONE_NUMBER"] })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "run_id": "test-run-entities" })))
        .expect(1)
        .mount(&server)
        .await;
    mount_run_status(&server, "test-run-entities", succeeded(&json!({})), 1).await;

    connector()
        .execute(input(&server, json!({ "entityTypes": ["EMAIL", "PHONE_NUMBER"] })))
        .await
        .unwrap();
}

#[tokio::test]
async fn every_call_carries_bearer_token() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(DEIDENTIFY_PATH))
        .and(header("Authorization", "Bearer secret-token-value"))
        .and(header("Content-Type", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "run_id": "test-run-secret" })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/detect/runs/test-run-secret"))
        .and(header("Authorization", "Bearer secret-token-value"))
        .respond_with(ResponseTemplate::new(200).set_body_json(succeeded(&json!({ "name": "[NAME_1]" }))))
        .expect(1)
        .mount(&server)
        .await;

    let mut bound = input(&server, json!({}));
    bound.authentication.api_token = "secret-token-value".into();
    connector().execute(bound).await.unwrap();
}

#[tokio::test]
async fn reidentify_is_one_post() {
    let server = MockServer::start().await;
    let original = json!({ "name": "John Doe", "age": 30 });

    Mock::given(method("POST"))
        .and(path(REIDENTIFY_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "SUCCESS",
            "output": { "processed_file": encoded(&original) }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let bound = input(
        &server,
        json!({ "operation": "REIDENTIFY", "payload": { "name": "[NAME_1]", "age": "[AGE_1]" } }),
    );
    let result = connector().execute(bound).await.unwrap();

    assert_eq!(Value::Object(result), original);
    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    let body: Value = serde_json::from_slice(&requests[0].body).unwrap();
    assert!(body.get("token_type").is_none());
}

#[tokio::test]
async fn polling_times_out_after_budget() {
    let server = MockServer::start().await;
    mount_start(&server, "test-run-timeout").await;
    mount_run_status(&server, "test-run-timeout", json!({ "status": "PENDING" }), 3).await;

    let err = connector()
        .execute(input(&server, json!({ "pollIntervalMs": 10, "maxPollAttempts": 3 })))
        .await
        .unwrap_err();

    assert_eq!(err, DetectError::PollTimeout { attempts: 3 });
    assert!(err.to_string().contains("did not complete after"));
}

#[tokio::test]
async fn failed_run_status_is_reported() {
    let server = MockServer::start().await;
    mount_start(&server, "test-run-failed").await;
    mount_run_status(&server, "test-run-failed", json!({ "status": "FAILED" }), 1).await;

    let err = connector().execute(input(&server, json!({}))).await.unwrap_err();

    assert_eq!(err.code(), "RUN_FAILED");
    assert!(err.to_string().contains("FAILED"));
}

#[tokio::test]
async fn rejected_start_never_polls() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(DEIDENTIFY_PATH))
        .respond_with(ResponseTemplate::new(401).set_body_string("invalid token"))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let err = connector().execute(input(&server, json!({}))).await.unwrap_err();

    assert_eq!(err.code(), "DEIDENTIFY_START_FAILED");
    assert_eq!(err.to_string(), "Detect request failed: HTTP 401 - invalid token");
}

#[tokio::test]
async fn rejected_poll_is_poll_failed() {
    let server = MockServer::start().await;
    mount_start(&server, "test-run-503").await;
    Mock::given(method("GET"))
        .and(path("/v1/detect/runs/test-run-503"))
        .respond_with(ResponseTemplate::new(503).set_body_string("try later"))
        .expect(1)
        .mount(&server)
        .await;

    let err = connector().execute(input(&server, json!({}))).await.unwrap_err();

    assert_eq!(err.code(), "POLL_FAILED");
    assert!(err.to_string().contains("503"));
}

#[tokio::test]
async fn unreachable_vault_is_network_failure() {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener); // release the port so that requests fail with ECONNREFUSED

    let bound = input_for(&format!("http://{addr}"), json!({ "operation": "REIDENTIFY" }));

    let err = connector().execute(bound).await.unwrap_err();

    assert!(matches!(err, DetectError::Network { .. }));
    assert_eq!(err.code(), "REIDENTIFY_FAILED");
}

#[tokio::test]
async fn raw_variables_bind_like_a_host_would() {
    let server = MockServer::start().await;
    let tokenized = json!({ "name": "[NAME_1]" });
    mount_start(&server, "test-run-vars").await;
    mount_run_status(&server, "test-run-vars", succeeded(&tokenized), 1).await;

    let mut config = Config::default();
    config.connection.vault_uri = Some(server.uri());
    config.connection.vault_id = Some("vault-123".into());
    config.connection.api_token = Some("config-token".into());
    config.polling.interval_ms = 10;

    let connector = DetectConnector::from_config(&config).unwrap();
    let result = connector
        .execute_variables(json!({
            "operation": "DEIDENTIFY",
            "payload": "{\"name\":\"John Doe\"}"
        }))
        .await
        .unwrap();

    assert_eq!(Value::Object(result), tokenized);
}

#[tokio::test]
async fn cancellation_stops_polling() {
    let server = MockServer::start().await;
    mount_start(&server, "test-run-cancel").await;
    Mock::given(method("GET"))
        .and(path("/v1/detect/runs/test-run-cancel"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "IN_PROGRESS" })))
        .expect(1)
        .mount(&server)
        .await;

    let cancel = CancellationToken::new();
    let trigger = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(200)).await;
        trigger.cancel();
    });

    let bound = input(&server, json!({ "pollIntervalMs": 30_000, "maxPollAttempts": 10 }));
    let err = connector().execute_with_cancellation(bound, &cancel).await.unwrap_err();

    assert_eq!(err, DetectError::Cancelled { attempts: 1 });
}
