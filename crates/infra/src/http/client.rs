use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client as ReqwestClient, Method, RequestBuilder, Response};
use tracing::debug;
use vaultdetect_core::{DetectTransport, HttpMethod, TransportRequest, TransportResponse};
use vaultdetect_domain::constants::{DEFAULT_CONNECT_TIMEOUT_SECS, DEFAULT_REQUEST_TIMEOUT_SECS};
use vaultdetect_domain::{DetectError, HttpConfig, Result, TransportStage};

use crate::errors::InfraError;

/// Default `User-Agent` sent with every Detect call.
pub const DEFAULT_USER_AGENT: &str = concat!("vaultdetect/", env!("CARGO_PKG_VERSION"));

/// HTTP client for the Detect API.
///
/// Sends each request exactly once. Retrying is the caller's decision, and
/// the poll loop already provides the only repetition the connector needs.
#[derive(Clone)]
pub struct HttpClient {
    client: ReqwestClient,
}

impl HttpClient {
    /// Start building a new HTTP client.
    pub fn builder() -> HttpClientBuilder {
        HttpClientBuilder::default()
    }

    /// Convenience constructor with default configuration.
    pub fn new() -> Result<Self> {
        Self::builder().build()
    }

    /// Client configured from the `http` config section.
    pub fn from_config(config: &HttpConfig) -> Result<Self> {
        let mut builder = Self::builder()
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .timeout(Duration::from_secs(config.request_timeout_secs));

        if let Some(agent) = &config.user_agent {
            builder = builder.user_agent(agent.clone());
        }

        builder.build()
    }

    /// Create a request builder using the underlying reqwest client.
    pub fn request<U>(&self, method: Method, url: U) -> RequestBuilder
    where
        U: reqwest::IntoUrl,
    {
        self.client.request(method, url)
    }

    /// Execute the provided request builder once.
    ///
    /// Any HTTP response is returned as-is; only transport failures are
    /// errors, tagged with `stage`.
    pub async fn execute(&self, builder: RequestBuilder, stage: TransportStage) -> Result<Response> {
        let request = builder.build().map_err(|err| DetectError::from(InfraError::http(err, stage)))?;

        let method = request.method().clone();
        let url = request.url().clone();
        debug!(%method, %url, stage = stage.code(), "sending HTTP request");

        match self.client.execute(request).await {
            Ok(response) => {
                let status = response.status();
                debug!(%method, %url, %status, "received HTTP response");
                Ok(response)
            }
            Err(err) => {
                debug!(%method, %url, error = %err, "HTTP request failed");
                Err(InfraError::http(err, stage).into())
            }
        }
    }
}

#[async_trait]
impl DetectTransport for HttpClient {
    async fn send(&self, request: TransportRequest, stage: TransportStage) -> Result<TransportResponse> {
        let method = match request.method {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
        };

        let mut builder = self.request(method, request.url.as_str());
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = self.execute(builder, stage).await?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(|err| DetectError::from(InfraError::http(err, stage)))?;

        Ok(TransportResponse { status, body })
    }
}

/// Builder for [`HttpClient`].
#[derive(Debug)]
pub struct HttpClientBuilder {
    connect_timeout: Duration,
    timeout: Duration,
    user_agent: String,
    default_headers: Option<reqwest::header::HeaderMap>,
}

impl Default for HttpClientBuilder {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
            timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            default_headers: None,
        }
    }
}

impl HttpClientBuilder {
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Total time allowed for one request, including reading the body.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = agent.into();
        self
    }

    pub fn default_headers(mut self, headers: reqwest::header::HeaderMap) -> Self {
        self.default_headers = Some(headers);
        self
    }

    pub fn build(self) -> Result<HttpClient> {
        let mut builder = ReqwestClient::builder()
            .connect_timeout(self.connect_timeout)
            .timeout(self.timeout)
            .user_agent(self.user_agent)
            .no_proxy();

        if let Some(headers) = self.default_headers {
            builder = builder.default_headers(headers);
        }

        let client = builder
            .build()
            .map_err(|err| DetectError::Config(format!("failed to build HTTP client: {err}")))?;

        Ok(HttpClient { client })
    }
}
