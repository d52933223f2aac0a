//! Persisted form of the access token and the stores that keep it.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

/// Cookie `SameSite` attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SameSite {
    Strict,
    Lax,
    None,
}

/// An access token together with its expiry and transport-security attributes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    pub token: String,
    pub expires_at: DateTime<Utc>,
    pub secure: bool,
    pub same_site: SameSite,
    pub path: String,
}

impl Credential {
    /// Issues a credential for `token` under `policy`, starting at `now`.
    pub fn issue(token: impl Into<String>, policy: &CredentialPolicy, now: DateTime<Utc>) -> Self {
        Self {
            token: token.into(),
            expires_at: now
                .checked_add_signed(policy.ttl)
                .unwrap_or(DateTime::<Utc>::MAX_UTC),
            secure: policy.secure,
            same_site: SameSite::Strict,
            path: "/".to_string(),
        }
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

/// How long issued credentials live and whether they are marked secure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CredentialPolicy {
    pub ttl: Duration,
    pub secure: bool,
}

impl Default for CredentialPolicy {
    fn default() -> Self {
        Self {
            ttl: Duration::hours(1),
            secure: false,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Credential store I/O failed at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Credential file is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// Where the session keeps its credential between runs.
pub trait CredentialStore: Send + Sync {
    fn load(&self) -> Result<Option<Credential>, StoreError>;
    fn save(&self, credential: &Credential) -> Result<(), StoreError>;
    fn clear(&self) -> Result<(), StoreError>;
}

/// Process-local store. Clones share the slot.
#[derive(Debug, Clone, Default)]
pub struct MemoryCredentialStore {
    slot: Arc<Mutex<Option<Credential>>>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that already holds `credential`.
    pub fn with(credential: Credential) -> Self {
        Self {
            slot: Arc::new(Mutex::new(Some(credential))),
        }
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn load(&self) -> Result<Option<Credential>, StoreError> {
        Ok(self.slot.lock().unwrap_or_else(PoisonError::into_inner).clone())
    }

    fn save(&self, credential: &Credential) -> Result<(), StoreError> {
        *self.slot.lock().unwrap_or_else(PoisonError::into_inner) = Some(credential.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), StoreError> {
        *self.slot.lock().unwrap_or_else(PoisonError::into_inner) = None;
        Ok(())
    }
}

/// JSON file store, one credential per file.
#[derive(Debug, Clone)]
pub struct FileCredentialStore {
    path: PathBuf,
}

impl FileCredentialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl CredentialStore for FileCredentialStore {
    fn load(&self) -> Result<Option<Credential>, StoreError> {
        match std::fs::read_to_string(&self.path) {
            Ok(contents) => Ok(Some(serde_json::from_str(&contents)?)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(self.io_error(e)),
        }
    }

    fn save(&self, credential: &Credential) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }
        let contents = serde_json::to_string_pretty(credential)?;
        std::fs::write(&self.path, contents).map_err(|e| self.io_error(e))
    }

    fn clear(&self) -> Result<(), StoreError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(self.io_error(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn issued_at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn issue_applies_policy_and_cookie_attributes() {
        let policy = CredentialPolicy {
            ttl: Duration::hours(1),
            secure: true,
        };
        let credential = Credential::issue("tok", &policy, issued_at());

        assert_eq!(credential.expires_at, issued_at() + Duration::hours(1));
        assert!(credential.secure);
        assert_eq!(credential.same_site, SameSite::Strict);
        assert_eq!(credential.path, "/");
    }

    #[test]
    fn expiry_is_inclusive() {
        let credential = Credential::issue("tok", &CredentialPolicy::default(), issued_at());
        assert!(!credential.is_expired_at(issued_at() + Duration::minutes(59)));
        assert!(credential.is_expired_at(issued_at() + Duration::hours(1)));
    }

    #[test]
    fn file_store_round_trips_and_clears() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileCredentialStore::new(dir.path().join("nested").join("credential.json"));
        assert!(store.load().unwrap().is_none());

        let credential = Credential::issue("tok", &CredentialPolicy::default(), issued_at());
        store.save(&credential).unwrap();
        assert_eq!(store.load().unwrap(), Some(credential));

        store.clear().unwrap();
        assert!(store.load().unwrap().is_none());
        store.clear().unwrap();
    }

    #[test]
    fn file_store_reports_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("credential.json");
        std::fs::write(&path, "not json").unwrap();

        let err = FileCredentialStore::new(&path).load().unwrap_err();
        assert!(matches!(err, StoreError::Corrupt(_)));
    }

    #[test]
    fn memory_store_clones_share_slot() {
        let store = MemoryCredentialStore::new();
        let handle = store.clone();
        store
            .save(&Credential::issue("tok", &CredentialPolicy::default(), issued_at()))
            .unwrap();
        assert_eq!(handle.load().unwrap().unwrap().token, "tok");
    }
}
