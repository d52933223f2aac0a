//! # Transport
//!
//! The transport executes exactly one HTTP request and normalizes every failure
//! into an [`ApiError`]. It never touches shared state: credentials are attached by
//! [`ResourceClient`](crate::ResourceClient) before the request gets here.
//!
//! [`HttpTransport`] is the production implementation on top of `reqwest`.
//! Tests plug in [`MockTransport`](crate::mock::MockTransport) instead.

use crate::error::ApiError;
use crate::request::{HttpMethod, HttpRequest};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, trace};

/// Fixed timeout applied to every request.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Executes a single request and returns the decoded JSON body.
///
/// An empty success body is returned as `Value::Null`.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn execute(&self, request: HttpRequest) -> Result<Value, ApiError>;
}

/// Executes `request` and interprets the body as `T`.
pub async fn request<T: DeserializeOwned>(
    transport: &dyn Transport,
    request: HttpRequest,
) -> Result<T, ApiError> {
    let body = transport.execute(request).await?;
    decode(body)
}

/// Interprets an already-fetched body as `T`, normalizing shape mismatches to `Decode`.
pub fn decode<T: DeserializeOwned>(body: Value) -> Result<T, ApiError> {
    serde_json::from_value(body)
        .map_err(|e| ApiError::decode(format!("Unexpected response body: {e}")))
}

/// `reqwest`-backed transport bound to one API base URL.
#[derive(Clone)]
pub struct HttpTransport {
    client: Client,
    base_url: String,
}

impl HttpTransport {
    /// Builds a transport with the fixed [`REQUEST_TIMEOUT`] and JSON default headers.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ApiError> {
        Self::with_timeout(base_url, REQUEST_TIMEOUT)
    }

    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ApiError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .build()
            .map_err(|e| ApiError::transport(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_owned(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn method(method: HttpMethod) -> Method {
        match method {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
            HttpMethod::Patch => Method::PATCH,
            HttpMethod::Put => Method::PUT,
            HttpMethod::Delete => Method::DELETE,
        }
    }

    /// The URL is stripped from the message; paths may carry credentials.
    fn normalize(e: reqwest::Error) -> ApiError {
        let e = e.without_url();
        if e.is_timeout() {
            ApiError::timeout(format!("Request timed out: {e}"))
        } else {
            ApiError::transport(format!("Network error: {e}"))
        }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn execute(&self, request: HttpRequest) -> Result<Value, ApiError> {
        let url = format!("{}{}", self.base_url, request.path);
        let logged_url = format!("{}{}", self.base_url, request.redacted_path());
        debug!(method = %request.method, url = %logged_url, "Sending request");

        let mut builder = self.client.request(Self::method(request.method), &url);
        for (name, value) in &request.headers {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| ApiError::transport(format!("Invalid header name {name}: {e}")))?;
            let value = HeaderValue::from_str(value)
                .map_err(|e| ApiError::transport(format!("Invalid header value: {e}")))?;
            builder = builder.header(name, value);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(Self::normalize)?;
        let status = response.status();
        let text = response.text().await.map_err(Self::normalize)?;
        trace!(status = status.as_u16(), bytes = text.len(), "Received response");

        if status.is_success() {
            if text.trim().is_empty() {
                return Ok(Value::Null);
            }
            return serde_json::from_str(&text)
                .map_err(|e| ApiError::decode(format!("Response is not valid JSON: {e}")));
        }

        let payload = if text.trim().is_empty() {
            None
        } else {
            Some(serde_json::from_str(&text).unwrap_or(Value::String(text)))
        };
        Err(ApiError::status(
            status.as_u16(),
            status.canonical_reason().unwrap_or_default(),
            payload,
        ))
    }
}
