//! # Client Lifecycle
//!
//! Configuration loading and the wiring of services into one
//! [`ServiceRegistry`].
//!
//! ## Startup
//!
//! ```rust,ignore
//! setup_tracing();
//! let config = ClientConfig::load()?;          // file + GAMEHUB_* overrides
//! let registry = ServiceRegistry::new(&config)?;
//! registry.session.init().await;               // restore a persisted login
//! ```
//!
//! [`ServiceRegistry::with_transport`] wires the same graph over any
//! [`Transport`](resource_framework::Transport), which is how the tests run the
//! whole client against an in-memory mock.

pub mod config;
pub mod registry;

pub use config::*;
pub use registry::*;
