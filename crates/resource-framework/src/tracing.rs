//! # Observability & Tracing
//!
//! [`setup_tracing`] initializes structured logging with the `tracing` crate.
//!
//! Every request runs inside a `request` span carrying `resource`, `operation`,
//! `method` and `path`, so a single log line already says which call it belongs to:
//!
//! ```text
//! DEBUG request{resource="games" operation="find" method=GET path="/games?page=1"}: Request ok
//! WARN  request{resource="users" operation="find" method=GET path="/users/token/***"}:
//!     Request failed error=Unauthorized
//! ```
//!
//! The segment after `token` in a path is masked in every log line.
//!
//! ```bash
//! RUST_LOG=info cargo run      # Session transitions only
//! RUST_LOG=debug cargo run     # Every request and payload
//! ```
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false) // resource/operation fields already say where a line comes from
        .compact()
        .init();
}
