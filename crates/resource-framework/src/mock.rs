//! # Mock Transport & Testing Guide
//!
//! [`MockTransport`] implements the same [`Transport`] trait as the production
//! [`HttpTransport`](crate::HttpTransport) but answers entirely in memory. It lets you
//! queue expected requests with canned responses, record everything the client sent,
//! and assert on it afterwards, without opening a socket.
//!
//! ## When to use the mock vs a real HTTP server
//!
//! | Feature | MockTransport | HttpTransport + mock server |
//! |---------|---------------|-----------------------------|
//! | **Speed** | Instant (in-memory) | Fast (loopback socket) |
//! | **Determinism** | 100% Deterministic | Subject to the network stack |
//! | **Use Case** | Client logic (URLs, auth, labels) | Wire behavior (statuses, timeouts) |
//! | **Error Injection** | Easy (`return_err`) | Needs a status + body per case |
//!
//! ## Pattern 1: Expectations
//!
//! ```rust
//! use resource_framework::mock::MockTransport;
//! use resource_framework::{HttpMethod, HttpRequest, Transport};
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() {
//!     let mock = MockTransport::new();
//!     mock.expect(HttpMethod::Get, "/games").return_ok(json!({ "data": [] }));
//!
//!     let body = mock.execute(HttpRequest::new(HttpMethod::Get, "/games?page=1")).await.unwrap();
//!     assert_eq!(body, json!({ "data": [] }));
//!
//!     mock.verify(); // all expectations consumed
//!     assert_eq!(mock.requests()[0].query_param("page").as_deref(), Some("1"));
//! }
//! ```
//!
//! ## Pattern 2: Responder
//!
//! When requests arrive concurrently, FIFO expectations are the wrong tool. A
//! responder computes the answer from the request itself, e.g. an echo backend:
//!
//! ```rust
//! use resource_framework::mock::MockTransport;
//! use resource_framework::{HttpMethod, HttpRequest, Transport};
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() {
//!     let mock = MockTransport::new()
//!         .respond_with(|request| Ok(json!({ "search": request.query_param("search") })));
//!
//!     let request = HttpRequest::new(HttpMethod::Get, "/games?search=a");
//!     let body = mock.execute(request).await.unwrap();
//!     assert_eq!(body, json!({ "search": "a" }));
//! }
//! ```

use crate::error::ApiError;
use crate::request::{HttpMethod, HttpRequest};
use crate::transport::Transport;
use async_trait::async_trait;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

type Responder = dyn Fn(&HttpRequest) -> Result<Value, ApiError> + Send + Sync;
type Latency = dyn Fn(&HttpRequest) -> Duration + Send + Sync;

/// An expected request and the response to hand back for it.
struct Expectation {
    method: HttpMethod,
    route: String,
    response: Result<Value, ApiError>,
}

#[derive(Default)]
struct MockState {
    expectations: Mutex<VecDeque<Expectation>>,
    requests: Mutex<Vec<HttpRequest>>,
    responder: Option<Arc<Responder>>,
    latency: Option<Arc<Latency>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// In-memory transport with expectation tracking for fluent testing.
///
/// Cloning yields another handle onto the same expectations and request log, so a
/// test can keep one handle while the client under test owns another.
#[derive(Clone, Default)]
pub struct MockTransport {
    state: Arc<MockState>,
}

impl MockTransport {
    /// Creates a mock with no expectations and no responder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Answers requests that have no queued expectation.
    ///
    /// Must be called before the mock is cloned or shared.
    pub fn respond_with(
        mut self,
        responder: impl Fn(&HttpRequest) -> Result<Value, ApiError> + Send + Sync + 'static,
    ) -> Self {
        self.state_mut().responder = Some(Arc::new(responder));
        self
    }

    /// Delays each response by the duration computed from the request.
    ///
    /// Must be called before the mock is cloned or shared.
    pub fn with_latency(
        mut self,
        latency: impl Fn(&HttpRequest) -> Duration + Send + Sync + 'static,
    ) -> Self {
        self.state_mut().latency = Some(Arc::new(latency));
        self
    }

    fn state_mut(&mut self) -> &mut MockState {
        Arc::get_mut(&mut self.state)
            .unwrap_or_else(|| panic!("MockTransport must be configured before it is shared"))
    }

    /// Expects a request with `method` on `route` (path without query string).
    pub fn expect(&self, method: HttpMethod, route: impl Into<String>) -> ExpectationBuilder {
        ExpectationBuilder {
            method,
            route: route.into(),
            state: self.state.clone(),
        }
    }

    /// Every request received so far, in arrival order.
    pub fn requests(&self) -> Vec<HttpRequest> {
        lock(&self.state.requests).clone()
    }

    pub fn last_request(&self) -> Option<HttpRequest> {
        lock(&self.state.requests).last().cloned()
    }

    pub fn request_count(&self) -> usize {
        lock(&self.state.requests).len()
    }

    /// Verifies that all expectations were met.
    pub fn verify(&self) {
        let remaining = lock(&self.state.expectations).len();
        if remaining > 0 {
            panic!("Not all expectations were met. {remaining} remaining");
        }
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn execute(&self, request: HttpRequest) -> Result<Value, ApiError> {
        lock(&self.state.requests).push(request.clone());

        if let Some(latency) = &self.state.latency {
            tokio::time::sleep(latency(&request)).await;
        }

        let expectation = lock(&self.state.expectations).pop_front();
        match (expectation, &self.state.responder) {
            (Some(expected), _) => {
                if expected.method != request.method || expected.route != request.route() {
                    panic!(
                        "Unexpected request: expected {} {}, got {} {}",
                        expected.method,
                        expected.route,
                        request.method,
                        request.path
                    );
                }
                expected.response
            }
            (None, Some(responder)) => responder(&request),
            (None, None) => panic!("Unexpected request: {} {}", request.method, request.path),
        }
    }
}

/// Builder for a queued expectation.
pub struct ExpectationBuilder {
    method: HttpMethod,
    route: String,
    state: Arc<MockState>,
}

impl ExpectationBuilder {
    /// Sets the expectation to return a successful body.
    pub fn return_ok(self, body: Value) {
        self.push(Ok(body));
    }

    /// Sets the expectation to return an error.
    pub fn return_err(self, error: ApiError) {
        self.push(Err(error));
    }

    fn push(self, response: Result<Value, ApiError>) {
        lock(&self.state.expectations).push_back(Expectation {
            method: self.method,
            route: self.route,
            response,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn expectations_are_consumed_in_order() {
        let mock = MockTransport::new();
        mock.expect(HttpMethod::Post, "/users/login").return_ok(json!({ "access_token": "t" }));
        mock.expect(HttpMethod::Get, "/users/token/t")
            .return_err(ApiError::status(401, "Unauthorized", None));

        let first = mock
            .execute(HttpRequest::new(HttpMethod::Post, "/users/login"))
            .await
            .unwrap();
        assert_eq!(first["access_token"], "t");

        let second = mock
            .execute(HttpRequest::new(HttpMethod::Get, "/users/token/t"))
            .await
            .unwrap_err();
        assert_eq!(second.status, Some(401));

        mock.verify();
        assert_eq!(mock.request_count(), 2);
    }

    #[tokio::test]
    #[should_panic(expected = "Not all expectations were met")]
    async fn verify_fails_on_leftovers() {
        let mock = MockTransport::new();
        mock.expect(HttpMethod::Get, "/games").return_ok(Value::Null);
        mock.verify();
    }

    #[tokio::test]
    async fn expectations_take_priority_over_responder() {
        let mock = MockTransport::new().respond_with(|_| Ok(json!("fallback")));
        mock.expect(HttpMethod::Get, "/roles").return_ok(json!("queued"));

        let queued = mock.execute(HttpRequest::new(HttpMethod::Get, "/roles")).await.unwrap();
        let fallback = mock.execute(HttpRequest::new(HttpMethod::Get, "/roles")).await.unwrap();
        assert_eq!(queued, json!("queued"));
        assert_eq!(fallback, json!("fallback"));
    }
}
