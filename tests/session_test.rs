use async_trait::async_trait;
use chrono::{Duration, Utc};
use gamehub_client::lifecycle::{ClientConfig, ServiceRegistry};
use gamehub_client::session::{
    Credential, CredentialPolicy, CredentialStore, FileCredentialStore, MemoryCredentialStore,
    SessionState,
};
use resource_framework::mock::MockTransport;
use resource_framework::{ApiError, HttpMethod, HttpRequest, Transport};
use serde_json::{json, Value};
use std::io::Write;
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

/// Holds user resolution (`/users/token/...`) until the gate is opened.
struct GatedTransport {
    inner: MockTransport,
    gate: Arc<Notify>,
}

#[async_trait]
impl Transport for GatedTransport {
    async fn execute(&self, request: HttpRequest) -> Result<Value, ApiError> {
        if request.route().starts_with("/users/token/") {
            self.gate.notified().await;
        }
        self.inner.execute(request).await
    }
}

/// Collects formatted log output.
#[derive(Clone, Default)]
struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

fn user_json() -> Value {
    json!({ "id": 1, "pid": "u1", "username": "ada", "email": "ada@gamehub.dev" })
}

fn registry(transport: &MockTransport, store: &MemoryCredentialStore) -> ServiceRegistry {
    ServiceRegistry::with_transport(
        Arc::new(transport.clone()),
        Arc::new(store.clone()),
        &ClientConfig::default(),
    )
}

fn gated_registry(
    transport: &MockTransport,
    store: &MemoryCredentialStore,
) -> (ServiceRegistry, Arc<Notify>) {
    let gate = Arc::new(Notify::new());
    let gated = GatedTransport {
        inner: transport.clone(),
        gate: gate.clone(),
    };
    let registry = ServiceRegistry::with_transport(
        Arc::new(gated),
        Arc::new(store.clone()),
        &ClientConfig::default(),
    );
    (registry, gate)
}

fn expect_login(transport: &MockTransport, token: &str) {
    transport
        .expect(HttpMethod::Post, "/users/login")
        .return_ok(json!({ "access_token": token }));
    transport
        .expect(HttpMethod::Get, format!("/users/token/{token}"))
        .return_ok(user_json());
}

#[tokio::test]
async fn test_login_goes_through_loading_and_persists() {
    let transport = MockTransport::new();
    expect_login(&transport, "tok-1");
    let store = MemoryCredentialStore::new();
    let (registry, gate) = gated_registry(&transport, &store);
    let session = registry.session.clone();
    let mut updates = session.subscribe();
    assert_eq!(updates.borrow().state(), SessionState::Unauthenticated);

    let login = tokio::spawn({
        let session = session.clone();
        async move { session.login("ada@gamehub.dev", "secret").await }
    });

    updates
        .wait_for(|s| s.state() == SessionState::Loading)
        .await
        .unwrap();
    assert_eq!(session.token().as_deref(), Some("tok-1"));
    assert!(session.current_user().is_none());
    assert_eq!(store.load().unwrap().unwrap().token, "tok-1");

    gate.notify_one();
    let token = login.await.unwrap().unwrap();

    assert_eq!(token, "tok-1");
    assert_eq!(session.state(), SessionState::Authenticated);
    assert_eq!(session.current_user().unwrap().pid, "u1");
    assert_eq!(registry.credential().get().as_deref(), Some("tok-1"));
    assert_eq!(
        transport.last_request().unwrap().header("Authorization"),
        Some("Bearer tok-1")
    );
    transport.verify();
}

#[tokio::test]
async fn test_persisted_credential_uses_canonical_attributes() {
    let transport = MockTransport::new();
    expect_login(&transport, "tok-1");
    let store = MemoryCredentialStore::new();
    let registry = registry(&transport, &store);

    let before = Utc::now();
    registry.session.login("ada@gamehub.dev", "secret").await.unwrap();

    let credential = store.load().unwrap().unwrap();
    assert_eq!(credential.path, "/");
    assert!(!credential.secure);
    assert!(credential.expires_at >= before + Duration::hours(1));
    assert!(credential.expires_at <= Utc::now() + Duration::hours(1));
}

#[tokio::test]
async fn test_failed_login_persists_nothing() {
    let transport = MockTransport::new();
    transport.expect(HttpMethod::Post, "/users/login").return_err(ApiError::status(
        401,
        "Unauthorized",
        Some(json!({ "statusCode": 401, "message": "Invalid credentials" })),
    ));
    let store = MemoryCredentialStore::new();
    let registry = registry(&transport, &store);

    let err = registry
        .session
        .login("ada@gamehub.dev", "wrong")
        .await
        .unwrap_err();

    assert_eq!(
        err.to_string(),
        "ERROR in operation login of users: Invalid credentials"
    );
    assert!(err.api_error().unwrap().is_unauthorized());
    assert_eq!(registry.session.state(), SessionState::Unauthenticated);
    assert!(registry.session.token().is_none());
    assert!(store.load().unwrap().is_none());
    assert!(!registry.credential().is_set());
    transport.verify();
}

#[tokio::test]
async fn test_logout_is_immediate() {
    let transport = MockTransport::new();
    expect_login(&transport, "tok-1");
    let store = MemoryCredentialStore::new();
    let registry = registry(&transport, &store);
    registry.session.login("ada@gamehub.dev", "secret").await.unwrap();
    assert!(registry.session.is_authenticated());

    registry.session.logout();

    assert!(registry.session.current_user().is_none());
    assert!(registry.session.token().is_none());
    assert_eq!(registry.session.state(), SessionState::Unauthenticated);
    assert!(store.load().unwrap().is_none());
    assert!(!registry.credential().is_set());
}

#[tokio::test]
async fn test_logout_wins_over_inflight_resolution() {
    let transport = MockTransport::new();
    expect_login(&transport, "tok-1");
    let store = MemoryCredentialStore::new();
    let (registry, gate) = gated_registry(&transport, &store);
    let session = registry.session.clone();
    let mut updates = session.subscribe();

    let login = tokio::spawn({
        let session = session.clone();
        async move { session.login("ada@gamehub.dev", "secret").await }
    });
    updates
        .wait_for(|s| s.state() == SessionState::Loading)
        .await
        .unwrap();

    session.logout();
    assert!(session.current_user().is_none());
    assert!(store.load().unwrap().is_none());

    gate.notify_one();
    assert_eq!(login.await.unwrap().unwrap(), "tok-1");

    assert_eq!(session.state(), SessionState::Unauthenticated);
    assert!(session.token().is_none());
    assert!(store.load().unwrap().is_none());
    assert!(!registry.credential().is_set());
    transport.verify();
}

#[tokio::test]
async fn test_new_login_overwrites_previous_credential() {
    let transport = MockTransport::new();
    expect_login(&transport, "tok-1");
    expect_login(&transport, "tok-2");
    let store = MemoryCredentialStore::new();
    let registry = registry(&transport, &store);

    registry.session.login("ada@gamehub.dev", "secret").await.unwrap();
    registry.session.login("ada@gamehub.dev", "secret").await.unwrap();

    assert_eq!(store.load().unwrap().unwrap().token, "tok-2");
    assert_eq!(registry.session.token().as_deref(), Some("tok-2"));
    assert_eq!(registry.credential().get().as_deref(), Some("tok-2"));
}

#[tokio::test]
async fn test_init_restores_persisted_credential() {
    let transport = MockTransport::new();
    transport
        .expect(HttpMethod::Get, "/users/token/tok-9")
        .return_ok(user_json());
    let store = MemoryCredentialStore::with(Credential::issue(
        "tok-9",
        &CredentialPolicy::default(),
        Utc::now(),
    ));
    let registry = registry(&transport, &store);

    let state = registry.session.init().await;

    assert_eq!(state, SessionState::Authenticated);
    assert_eq!(registry.session.current_user().unwrap().username, "ada");
    assert_eq!(
        transport.last_request().unwrap().header("Authorization"),
        Some("Bearer tok-9")
    );
}

#[tokio::test]
async fn test_init_clears_rejected_credential() {
    let transport = MockTransport::new();
    transport
        .expect(HttpMethod::Get, "/users/token/stale")
        .return_err(ApiError::status(401, "Unauthorized", None));
    let store = MemoryCredentialStore::with(Credential::issue(
        "stale",
        &CredentialPolicy::default(),
        Utc::now(),
    ));
    let registry = registry(&transport, &store);

    let state = registry.session.init().await;

    assert_eq!(state, SessionState::Unauthenticated);
    assert!(store.load().unwrap().is_none());
    assert!(!registry.credential().is_set());
    assert_eq!(transport.request_count(), 1);
}

#[tokio::test]
async fn test_rejected_credential_never_reaches_logs() {
    let logs = LogBuffer::default();
    let writer = logs.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .with_max_level(tracing::Level::TRACE)
        .finish();
    let _guard = tracing::subscriber::set_default(subscriber);

    let transport = MockTransport::new();
    transport
        .expect(HttpMethod::Get, "/users/token/SECRET-TOKEN-123")
        .return_err(ApiError::status(401, "Unauthorized", None));
    let store = MemoryCredentialStore::with(Credential::issue(
        "SECRET-TOKEN-123",
        &CredentialPolicy::default(),
        Utc::now(),
    ));
    let registry = registry(&transport, &store);

    let state = registry.session.init().await;

    let output = String::from_utf8_lossy(&logs.0.lock().unwrap()).into_owned();
    assert_eq!(state, SessionState::Unauthenticated);
    assert!(output.contains("Request failed"), "{output}");
    assert!(output.contains("/users/token/***"), "{output}");
    assert!(!output.contains("SECRET-TOKEN-123"), "{output}");
}

#[tokio::test]
async fn test_init_drops_expired_credential_without_network() {
    let transport = MockTransport::new();
    let store = MemoryCredentialStore::with(Credential::issue(
        "old",
        &CredentialPolicy::default(),
        Utc::now() - Duration::hours(2),
    ));
    let registry = registry(&transport, &store);

    let state = registry.session.init().await;

    assert_eq!(state, SessionState::Unauthenticated);
    assert!(store.load().unwrap().is_none());
    assert_eq!(transport.request_count(), 0);
}

#[tokio::test]
async fn test_init_without_credential_stays_anonymous() {
    let transport = MockTransport::new();
    let registry = registry(&transport, &MemoryCredentialStore::new());

    assert_eq!(registry.session.init().await, SessionState::Unauthenticated);
    assert_eq!(transport.request_count(), 0);
}

#[tokio::test]
async fn test_file_store_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("credential.json");

    let first = MockTransport::new();
    expect_login(&first, "tok-1");
    let registry = ServiceRegistry::with_transport(
        Arc::new(first.clone()),
        Arc::new(FileCredentialStore::new(&path)),
        &ClientConfig::default(),
    );
    registry.session.login("ada@gamehub.dev", "secret").await.unwrap();
    drop(registry);

    let second = MockTransport::new();
    second
        .expect(HttpMethod::Get, "/users/token/tok-1")
        .return_ok(user_json());
    let restarted = ServiceRegistry::with_transport(
        Arc::new(second.clone()),
        Arc::new(FileCredentialStore::new(&path)),
        &ClientConfig::default(),
    );

    assert_eq!(restarted.session.init().await, SessionState::Authenticated);
    second.verify();
}
