//! # Authentication Session
//!
//! [`AuthSession`] owns the credential lifecycle: it persists the access token,
//! resolves the current user from it and clears both on logout. Its state is
//! published on a `tokio::sync::watch` channel, so any number of UI observers see
//! every transition.
//!
//! ## States
//!
//! ```text
//!                 login / init
//! Unauthenticated ────────────▶ Loading ──resolved──▶ Authenticated
//!        ▲                        │                        │
//!        └──resolution failed─────┘                        │
//!        └───────────────────logout (synchronous)──────────┘
//! ```
//!
//! ## Logout always wins
//!
//! Every login and init takes a [`Ticket`] from a [`RequestGeneration`]; logout
//! invalidates it. Writes to the session happen inside the watch channel's
//! `send_if_modified` closure after re-checking the ticket, so a user resolution that
//! finishes after a logout is dropped instead of re-authenticating the session.

pub mod credential;

pub use credential::*;

use crate::clients::UserService;
use crate::model::{LoginRequest, User};
use chrono::Utc;
use resource_framework::{ClientError, RequestGeneration, SharedCredential, Ticket};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, info, instrument, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Unauthenticated,
    Loading,
    Authenticated,
}

/// Snapshot of the session as observers see it.
///
/// `user` is only ever `Some` while `token` is `Some`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    pub token: Option<String>,
    pub user: Option<User>,
    pub is_loading_user: bool,
}

impl Session {
    fn loading(token: String) -> Self {
        Self {
            token: Some(token),
            user: None,
            is_loading_user: true,
        }
    }

    pub fn state(&self) -> SessionState {
        if self.is_loading_user {
            SessionState::Loading
        } else if self.user.is_some() {
            SessionState::Authenticated
        } else {
            SessionState::Unauthenticated
        }
    }
}

pub struct AuthSession {
    users: UserService,
    credential: SharedCredential,
    store: Arc<dyn CredentialStore>,
    policy: CredentialPolicy,
    generation: RequestGeneration,
    state: watch::Sender<Session>,
}

impl AuthSession {
    /// `credential` must be the slot the services read their bearer token from.
    pub fn new(
        users: UserService,
        credential: SharedCredential,
        store: Arc<dyn CredentialStore>,
        policy: CredentialPolicy,
    ) -> Self {
        let (state, _) = watch::channel(Session::default());
        Self {
            users,
            credential,
            store,
            policy,
            generation: RequestGeneration::new(),
            state,
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<Session> {
        self.state.subscribe()
    }

    pub fn session(&self) -> Session {
        self.state.borrow().clone()
    }

    pub fn state(&self) -> SessionState {
        self.state.borrow().state()
    }

    pub fn current_user(&self) -> Option<User> {
        self.state.borrow().user.clone()
    }

    pub fn token(&self) -> Option<String> {
        self.state.borrow().token.clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.state() == SessionState::Authenticated
    }

    /// Restores a persisted credential, if any, and resolves its user.
    ///
    /// Expired credentials are cleared without a network call. Never fails: every
    /// problem degrades to `Unauthenticated`.
    #[instrument(skip(self))]
    pub async fn init(&self) -> SessionState {
        let persisted = match self.store.load() {
            Ok(persisted) => persisted,
            Err(e) => {
                warn!(error = %e, "Could not read persisted credential");
                None
            }
        };

        let Some(credential) = persisted else {
            debug!("No persisted credential");
            return self.state();
        };

        if credential.is_expired_at(Utc::now()) {
            info!(expired_at = %credential.expires_at, "Persisted credential expired");
            self.logout();
            return SessionState::Unauthenticated;
        }

        let ticket = self.generation.next();
        let token = credential.token;
        let started = self.apply(ticket, |session| {
            self.credential.set(token.clone());
            *session = Session::loading(token.clone());
        });
        if !started {
            return self.state();
        }

        self.resolve_user(ticket, token).await
    }

    /// Logs in with email and password and returns the issued access token.
    ///
    /// On success the credential is persisted (overwriting any previous one) and the
    /// user is resolved. If resolution fails the session ends `Unauthenticated` but
    /// the call still returns the token. On failure nothing changes.
    #[instrument(skip(self, password))]
    pub async fn login(&self, email: &str, password: &str) -> Result<String, ClientError> {
        let request = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        let token = match self.users.login(&request).await {
            Ok(response) => response.access_token,
            Err(e) => {
                warn!(error = %e, "Login failed");
                return Err(e);
            }
        };

        let ticket = self.generation.next();
        let credential = Credential::issue(token.clone(), &self.policy, Utc::now());
        let started = self.apply(ticket, |session| {
            if let Err(e) = self.store.save(&credential) {
                warn!(error = %e, "Could not persist credential");
            }
            self.credential.set(token.clone());
            *session = Session::loading(token.clone());
        });

        if started {
            self.resolve_user(ticket, token.clone()).await;
        }
        Ok(token)
    }

    /// Clears the credential and the user immediately.
    ///
    /// Any user resolution still in flight is discarded when it completes.
    #[instrument(skip(self))]
    pub fn logout(&self) {
        self.state.send_modify(|session| {
            self.generation.invalidate();
            self.discard_credential();
            *session = Session::default();
        });
        info!("Session cleared");
    }

    async fn resolve_user(&self, ticket: Ticket, token: String) -> SessionState {
        let result = self.users.find_by_token(&token).await;

        let applied = match result {
            Ok(user) => {
                let pid = user.pid.clone();
                let applied = self.apply(ticket, |session| {
                    *session = Session {
                        token: Some(token),
                        user: Some(user),
                        is_loading_user: false,
                    };
                });
                if applied {
                    info!(user = %pid, "Session authenticated");
                }
                applied
            }
            Err(e) => {
                warn!(error = %e, "Could not resolve user from credential");
                self.apply(ticket, |session| {
                    self.discard_credential();
                    *session = Session::default();
                })
            }
        };

        if !applied {
            debug!("Discarded user resolution from a previous session");
        }
        self.state()
    }

    /// Runs `update` under the channel's write lock if `ticket` is still current.
    fn apply(&self, ticket: Ticket, update: impl FnOnce(&mut Session)) -> bool {
        self.state.send_if_modified(|session| {
            if !self.generation.is_current(ticket) {
                return false;
            }
            update(session);
            true
        })
    }

    fn discard_credential(&self) {
        self.credential.clear();
        if let Err(e) = self.store.clear() {
            warn!(error = %e, "Could not clear persisted credential");
        }
    }
}
