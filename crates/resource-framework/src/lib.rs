//! # Resource Framework
//!
//! This crate provides the foundational building blocks for talking to a REST API
//! through type-safe, per-resource clients. It implements a **Resource-Oriented
//! Architecture (ROA)** client: every remote resource exposes the same small set of
//! operations, and the plumbing behind them is written once.
//!
//! ## Architecture Overview
//!
//! The framework separates concerns into three layers:
//!
//! 1. **Entity Layer** ([`ResourceEntity`], [`Interactive`]) - what a resource is:
//!    its base path, its list and creation shapes, its supported interactions.
//! 2. **Client Layer** ([`ResourceClient`]) - URL building ([`UrlBuilder`]),
//!    credential injection ([`CredentialSource`]), cancellation and error labeling,
//!    all funneled through one `execute_request` seam.
//! 3. **Transport Layer** ([`Transport`], [`HttpTransport`]) - one HTTP call with a
//!    fixed timeout, every failure normalized into [`ApiError`].
//!
//! ## Core Abstractions
//!
//! ```rust
//! use resource_framework::mock::MockTransport;
//! use resource_framework::{
//!     HttpMethod, InteractionKind, Interactive, PaginatedResult, RequestOptions, ResourceClient,
//!     ResourceConfig, ResourceEntity, SharedCredential,
//! };
//! use serde::{Deserialize, Serialize};
//! use serde_json::json;
//! use std::sync::Arc;
//!
//! // 1. Define the Entity
//! #[derive(Clone, Debug, Deserialize)]
//! struct Snippet { id: u64, pid: String, title: String }
//!
//! #[derive(Debug, Serialize)]
//! struct SnippetCreate { title: String }
//!
//! impl ResourceEntity for Snippet {
//!     type Listing = PaginatedResult<Snippet>;
//!     type Create = SnippetCreate;
//!     const RESOURCE: &'static str = "snippets";
//!     const BASE_PATH: &'static str = "/snippets";
//!     fn pid(&self) -> &str { &self.pid }
//! }
//!
//! impl Interactive for Snippet {
//!     const INTERACTIONS: &'static [InteractionKind] =
//!         &[InteractionKind::Views, InteractionKind::Forks];
//! }
//!
//! // 2. Use the Client
//! #[tokio::main]
//! async fn main() {
//!     let transport = MockTransport::new();
//!     transport.expect(HttpMethod::Get, "/snippets").return_ok(json!({
//!         "data": [{ "id": 1, "pid": "s1", "title": "Dash" }]
//!     }));
//!     transport.expect(HttpMethod::Patch, "/snippets/s1/interact").return_ok(json!(null));
//!
//!     let client = ResourceClient::<Snippet>::new(
//!         ResourceConfig::for_entity::<Snippet>(),
//!         Arc::new(transport.clone()),
//!         Arc::new(SharedCredential::new()),
//!     );
//!
//!     let page = client.find(RequestOptions::new()).await.unwrap();
//!     client.add_interaction(&page.data[0].pid, InteractionKind::Views).await.unwrap();
//!     transport.verify();
//! }
//! ```
//!
//! ## Error Handling
//!
//! - [`ApiError`] is the single normalized shape a transport produces.
//! - [`ClientError`] wraps it and adds client-side failures.
//! - [`ResourceEntity::handle_service_error`] is the per-resource hook; by default it
//!   rethrows unchanged, overrides typically call [`ClientError::labeled`].
//!
//! ## Concurrency Model
//!
//! - Every operation is `async` and suspends only at the transport call.
//! - Concurrent calls are independent; no ordering is promised between them.
//! - Use [`RequestOptions::cancel`] or a [`RequestGeneration`] to drop stale results.
//!
//! ## Testing
//!
//! [`mock::MockTransport`] answers requests in memory with queued expectations or a
//! responder closure. See the [`mock`] module for usage patterns.

pub mod cancel;
pub mod client;
pub mod client_trait;
pub mod credentials;
pub mod entity;
pub mod error;
pub mod interaction;
pub mod mock;
pub mod request;
pub mod tracing;
pub mod transport;
pub mod url;

// Re-export core types for convenience
pub use cancel::{RequestGeneration, Ticket};
pub use client::{ResourceClient, ResourceConfig};
pub use client_trait::{InteractiveService, ServiceClient};
pub use credentials::{Anonymous, CredentialSource, SharedCredential};
pub use entity::{PaginatedResult, PaginationMeta, ResourceEntity};
pub use error::{ApiError, ApiErrorKind, ClientError};
pub use interaction::{InteractionKind, InteractionRequest, Interactive};
pub use request::{redact_path, HttpMethod, HttpRequest, RequestOptions};
pub use transport::{HttpTransport, Transport, REQUEST_TIMEOUT};
pub use url::{ParamValue, QueryParams, UrlBuilder};
pub use tokio_util::sync::CancellationToken;
