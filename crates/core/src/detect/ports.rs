//! Transport port for the Detect REST API

use std::fmt;

use async_trait::async_trait;
use serde::Serialize;
use vaultdetect_domain::constants::{
    AUTHORIZATION_HEADER, BEARER_PREFIX, CONTENT_TYPE_HEADER, CONTENT_TYPE_JSON,
};
use vaultdetect_domain::{DetectError, Result, TransportStage};

/// HTTP verbs used by the connector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Get => f.write_str("GET"),
            Self::Post => f.write_str("POST"),
        }
    }
}

/// One outbound call, fully addressed and authenticated.
#[derive(Clone, PartialEq, Eq)]
pub struct TransportRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl TransportRequest {
    /// GET with bearer auth and JSON content type.
    pub fn get(url: impl Into<String>, api_token: &str) -> Self {
        Self { method: HttpMethod::Get, url: url.into(), headers: auth_headers(api_token), body: None }
    }

    /// POST with a JSON-serialized body.
    ///
    /// # Errors
    /// Returns [`DetectError::InvalidInput`] if the body cannot be serialized.
    pub fn post_json<T: Serialize>(url: impl Into<String>, api_token: &str, body: &T) -> Result<Self> {
        let body = serde_json::to_string(body)
            .map_err(|err| DetectError::InvalidInput(format!("unserializable request body: {err}")))?;
        Ok(Self {
            method: HttpMethod::Post,
            url: url.into(),
            headers: auth_headers(api_token),
            body: Some(body),
        })
    }

    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

impl fmt::Debug for TransportRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let headers: Vec<(&str, &str)> = self
            .headers
            .iter()
            .map(|(key, value)| {
                if key.eq_ignore_ascii_case(AUTHORIZATION_HEADER) {
                    (key.as_str(), "<redacted>")
                } else {
                    (key.as_str(), value.as_str())
                }
            })
            .collect();

        f.debug_struct("TransportRequest")
            .field("method", &self.method)
            .field("url", &self.url)
            .field("headers", &headers)
            .field("body_len", &self.body.as_ref().map(String::len))
            .finish()
    }
}

/// Raw HTTP response: status plus body text, whatever the status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

impl TransportResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self { status, body: body.into() }
    }

    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }
}

/// Sends requests to the Detect API.
///
/// Implementations return `Ok` for every HTTP response regardless of status
/// and perform no retries. `Err` is reserved for requests that produced no
/// response at all, reported as [`DetectError::Network`] tagged with `stage`.
#[async_trait]
pub trait DetectTransport: Send + Sync {
    async fn send(&self, request: TransportRequest, stage: TransportStage) -> Result<TransportResponse>;
}

fn auth_headers(api_token: &str) -> Vec<(String, String)> {
    vec![
        (AUTHORIZATION_HEADER.to_string(), format!("{BEARER_PREFIX}{api_token}")),
        (CONTENT_TYPE_HEADER.to_string(), CONTENT_TYPE_JSON.to_string()),
    ]
}
