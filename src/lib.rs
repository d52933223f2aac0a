//! # GameHub Client
//!
//! The data-access layer of the GameHub community platform: typed services for every
//! REST resource plus the authentication session the UI observes.
//!
//! ## Core Components
//!
//! - **[model]**: Wire shapes ([`User`](model::User), [`Game`](model::Game),
//!   [`Snippet`](model::Snippet), ...) implementing
//!   [`ResourceEntity`](resource_framework::ResourceEntity).
//! - **[clients]**: One service per resource (e.g. [`GameService`](clients::GameService))
//!   built on the generic [`ResourceClient`](resource_framework::ResourceClient).
//! - **[session]**: [`AuthSession`](session::AuthSession), the credential lifecycle as
//!   observable state.
//! - **[lifecycle]**: [`ClientConfig`](lifecycle::ClientConfig) and the
//!   [`ServiceRegistry`](lifecycle::ServiceRegistry) that wires everything together.
//!
//! ## Testing
//!
//! [`ServiceRegistry::with_transport`](lifecycle::ServiceRegistry::with_transport) accepts
//! [`resource_framework::mock::MockTransport`], so the whole client runs without a server.

pub mod clients;
pub mod lifecycle;
pub mod model;
pub mod session;
