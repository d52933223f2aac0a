//! # Credential Sources
//!
//! A [`ResourceClient`](crate::ResourceClient) never owns the session credential. It
//! reads it through a [`CredentialSource`] at the moment a request that requires
//! auth is built. [`SharedCredential`] is the process-wide slot the auth session
//! writes and every resource client reads.

use std::sync::{Arc, PoisonError, RwLock};

/// Supplies the bearer token for authenticated requests, if any.
pub trait CredentialSource: Send + Sync {
    fn credential(&self) -> Option<String>;
}

/// A source that never has a credential.
#[derive(Debug, Clone, Copy, Default)]
pub struct Anonymous;

impl CredentialSource for Anonymous {
    fn credential(&self) -> Option<String> {
        None
    }
}

/// Cloneable handle to the single in-memory credential slot.
#[derive(Debug, Clone, Default)]
pub struct SharedCredential {
    token: Arc<RwLock<Option<String>>>,
}

impl SharedCredential {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the current token.
    pub fn set(&self, token: impl Into<String>) {
        *self.token.write().unwrap_or_else(PoisonError::into_inner) = Some(token.into());
    }

    pub fn clear(&self) {
        *self.token.write().unwrap_or_else(PoisonError::into_inner) = None;
    }

    pub fn get(&self) -> Option<String> {
        self.token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn is_set(&self) -> bool {
        self.token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }
}

impl CredentialSource for SharedCredential {
    fn credential(&self) -> Option<String> {
        self.get()
    }
}
