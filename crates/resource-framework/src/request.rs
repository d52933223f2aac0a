//! # Requests
//!
//! Per-call options ([`RequestOptions`]) accepted by every
//! [`ResourceClient`](crate::ResourceClient) operation, and the fully resolved
//! [`HttpRequest`] handed to a [`Transport`](crate::Transport).
//!
//! Anything logged about a request goes through [`redact_path`] first.

use crate::url::QueryParams;
use serde_json::Value;
use std::fmt;
use tokio_util::sync::CancellationToken;

/// Options accepted by every resource operation.
///
/// All fields are optional; `RequestOptions::default()` is a plain request
/// against the resource's base path.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    /// Appended verbatim after the resource base path (e.g. `/login`).
    pub sub_endpoint: Option<String>,
    /// Encoded into the query string, see [`QueryParams`].
    pub params: Option<QueryParams>,
    /// Attach the current session credential to this call.
    pub requires_auth: Option<bool>,
    /// Resolve the call early with [`ClientError::Cancelled`](crate::ClientError::Cancelled)
    /// once this token is cancelled.
    pub cancel: Option<CancellationToken>,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sub_endpoint(mut self, sub_endpoint: impl Into<String>) -> Self {
        self.sub_endpoint = Some(sub_endpoint.into());
        self
    }

    pub fn params(mut self, params: QueryParams) -> Self {
        self.params = Some(params);
        self
    }

    pub fn requires_auth(mut self, requires_auth: bool) -> Self {
        self.requires_auth = Some(requires_auth);
        self
    }

    pub fn cancel_with(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }
}

/// The HTTP verbs the resource layer issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Patch,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Patch => "PATCH",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Route segments whose next segment carries a secret (`/users/token/{token}`).
const SECRET_SEGMENTS: &[&str] = &["token"];

/// Mask written in place of a secret path segment.
pub const REDACTED: &str = "***";

/// `path` with every segment that follows a secret segment name replaced by
/// [`REDACTED`]. The query string is kept as is. Use this for anything logged.
pub fn redact_path(path: &str) -> String {
    let (route, query) = match path.split_once('?') {
        Some((route, query)) => (route, Some(query)),
        None => (path, None),
    };

    let mut masked = Vec::new();
    let mut hide_next = false;
    for segment in route.split('/') {
        if hide_next && !segment.is_empty() {
            masked.push(REDACTED);
            hide_next = false;
        } else {
            masked.push(segment);
            hide_next = SECRET_SEGMENTS.contains(&segment);
        }
    }

    let mut redacted = masked.join("/");
    if let Some(query) = query {
        redacted.push('?');
        redacted.push_str(query);
    }
    redacted
}

/// A request ready for a transport: method, path (with query), headers and JSON body.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub path: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl HttpRequest {
    pub fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// The path with secret segments masked, see [`redact_path`].
    pub fn redacted_path(&self) -> String {
        redact_path(&self.path)
    }

    /// The path without its query string.
    pub fn route(&self) -> &str {
        self.path.split_once('?').map_or(self.path.as_str(), |(route, _)| route)
    }

    /// Decoded query parameters, in the order they appear on the path.
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        self.path
            .split_once('?')
            .map(|(_, query)| {
                url::form_urlencoded::parse(query.as_bytes())
                    .into_owned()
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn query_param(&self, key: &str) -> Option<String> {
        self.query_pairs()
            .into_iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }
}
