//! # Framework Errors
//!
//! This module defines the common error types used throughout the resource framework.
//! By centralizing error definitions, every resource client reports failures in
//! the same shape, whatever went wrong underneath.
//!
//! - [`ApiError`] is the normalized value produced by a [`Transport`](crate::Transport).
//!   Network failures, timeouts, non-2xx responses and undecodable bodies all
//!   land here, so callers never need to distinguish transport classes.
//! - [`ClientError`] is what [`ResourceClient`](crate::ResourceClient) operations return.
//!   It wraps an [`ApiError`] and adds the failures that originate on the client
//!   side of the seam (labeling, unsupported interactions, cancellation).

use crate::interaction::InteractionKind;
use serde_json::Value;
use std::fmt;

/// Broad classification of a normalized [`ApiError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorKind {
    /// The request never produced a response (DNS, refused connection, TLS, ...).
    Transport,
    /// The request exceeded the transport timeout.
    Timeout,
    /// The server answered with a non-success status.
    Status,
    /// The server answered successfully but the body did not match the expected shape.
    Decode,
}

impl fmt::Display for ApiErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Transport => "transport",
            Self::Timeout => "timeout",
            Self::Status => "status",
            Self::Decode => "decode",
        };
        f.write_str(name)
    }
}

/// The single error shape every transport failure is normalized into.
///
/// `message` is always human readable. `status` and `payload` are only
/// present when the server actually answered.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{message}")]
pub struct ApiError {
    pub kind: ApiErrorKind,
    pub message: String,
    pub status: Option<u16>,
    pub payload: Option<Value>,
}

impl ApiError {
    pub fn transport(message: impl Into<String>) -> Self {
        Self {
            kind: ApiErrorKind::Transport,
            message: message.into(),
            status: None,
            payload: None,
        }
    }

    pub fn timeout(message: impl Into<String>) -> Self {
        Self {
            kind: ApiErrorKind::Timeout,
            message: message.into(),
            status: None,
            payload: None,
        }
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self {
            kind: ApiErrorKind::Decode,
            message: message.into(),
            status: None,
            payload: None,
        }
    }

    /// Builds a status error from the response code and whatever body the server sent.
    ///
    /// The server message is taken from a `message` field when present. NestJS-style
    /// validation errors send an array there, in which case the first entry is used.
    pub fn status(status: u16, reason: &str, payload: Option<Value>) -> Self {
        let server_message = payload.as_ref().and_then(|body| match body.get("message") {
            Some(Value::String(message)) => Some(message.clone()),
            Some(Value::Array(messages)) => messages
                .first()
                .and_then(Value::as_str)
                .map(str::to_owned),
            _ => None,
        });

        let message = server_message.unwrap_or_else(|| {
            if reason.is_empty() {
                format!("Request failed with status {status}")
            } else {
                format!("Request failed with status {status} {reason}")
            }
        });

        Self {
            kind: ApiErrorKind::Status,
            message,
            status: Some(status),
            payload,
        }
    }

    /// True when the server rejected the credential (401/403).
    pub fn is_unauthorized(&self) -> bool {
        matches!(self.status, Some(401) | Some(403))
    }
}

/// Errors returned by resource client operations.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error(transparent)]
    Api(#[from] ApiError),

    /// An error relabeled by a resource's `handle_service_error` hook.
    /// The original error is preserved unchanged as the source.
    #[error("ERROR in operation {operation} of {resource}: {source}")]
    Service {
        operation: &'static str,
        resource: &'static str,
        #[source]
        source: Box<ClientError>,
    },

    #[error("{resource} does not support the `{kind}` interaction")]
    UnsupportedInteraction {
        resource: &'static str,
        kind: InteractionKind,
    },

    #[error("Request cancelled")]
    Cancelled,

    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl ClientError {
    /// Wraps `self` with an operation/resource label.
    pub fn labeled(self, operation: &'static str, resource: &'static str) -> Self {
        Self::Service {
            operation,
            resource,
            source: Box::new(self),
        }
    }

    /// Returns the underlying normalized transport error, looking through labels.
    pub fn api_error(&self) -> Option<&ApiError> {
        match self {
            Self::Api(e) => Some(e),
            Self::Service { source, .. } => source.api_error(),
            _ => None,
        }
    }

    /// Strips any labels added by `handle_service_error`.
    pub fn root(&self) -> &ClientError {
        match self {
            Self::Service { source, .. } => source.root(),
            other => other,
        }
    }
}
