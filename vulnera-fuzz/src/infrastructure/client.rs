//! Service-under-test clients

use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

use crate::domain::value_objects::{FuzzCase, HttpMethod};

/// A concrete request built from one (endpoint, case) pair
#[derive(Debug, Clone, PartialEq)]
pub struct FuzzRequest {
    pub method: HttpMethod,
    /// Path with placeholders already substituted
    pub path: String,
    pub query: Vec<(String, String)>,
    /// JSON body, only for verbs other than GET/DELETE
    pub body: Option<FuzzCase>,
}

/// A completed response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// Transport-level failure reaching the service under test
#[derive(Debug, Clone, thiserror::Error)]
pub enum TransportError {
    #[error("{0}")]
    Request(String),

    #[error("request timed out after {seconds}s")]
    Timeout { seconds: u64 },
}

/// Trait for issuing requests against the service under test
#[async_trait]
pub trait ServiceClient: Send + Sync {
    /// Execute one request and return the status code and body text
    async fn execute(&self, request: &FuzzRequest) -> Result<RawResponse, TransportError>;
}

/// Real HTTP client against a running server
pub struct HttpServiceClient {
    client: reqwest::Client,
    base_url: String,
}

impl HttpServiceClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("vulnera-fuzzgate/", env!("CARGO_PKG_VERSION")))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            client,
            base_url: base_url.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url_for(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    fn reqwest_method(method: HttpMethod) -> reqwest::Method {
        match method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Delete => reqwest::Method::DELETE,
            HttpMethod::Patch => reqwest::Method::PATCH,
        }
    }
}

#[async_trait]
impl ServiceClient for HttpServiceClient {
    async fn execute(&self, request: &FuzzRequest) -> Result<RawResponse, TransportError> {
        let url = self.url_for(&request.path);
        debug!(method = %request.method, url = %url, "Dispatching fuzz request");

        let mut builder = self
            .client
            .request(Self::reqwest_method(request.method), &url);

        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(|e| {
            if e.is_timeout() {
                TransportError::Request(format!("request timed out: {}", e))
            } else {
                TransportError::Request(e.to_string())
            }
        })?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| TransportError::Request(format!("failed to read response body: {}", e)))?;

        Ok(RawResponse { status, body })
    }
}

/// In-process client that hands each request to a handler function.
///
/// Useful for exercising services that can be invoked without a socket.
pub struct HandlerClient<F> {
    handler: F,
}

impl<F> HandlerClient<F>
where
    F: Fn(&FuzzRequest) -> Result<RawResponse, TransportError> + Send + Sync,
{
    pub fn new(handler: F) -> Self {
        Self { handler }
    }
}

#[async_trait]
impl<F> ServiceClient for HandlerClient<F>
where
    F: Fn(&FuzzRequest) -> Result<RawResponse, TransportError> + Send + Sync,
{
    async fn execute(&self, request: &FuzzRequest) -> Result<RawResponse, TransportError> {
        (self.handler)(request)
    }
}
