//! # User Service
//!
//! Directory lookups, registration and the two calls the session is built on:
//! `login` and `find_by_token`.
use crate::model::{LoginRequest, TokenResponse, User, UserCreate, UserFilter};
use resource_framework::{
    ClientError, PaginatedResult, RequestOptions, ResourceClient, ServiceClient,
};
use tracing::{debug, instrument};

#[derive(Clone)]
pub struct UserService {
    inner: ResourceClient<User>,
}

impl UserService {
    pub fn new(inner: ResourceClient<User>) -> Self {
        Self { inner }
    }
}

impl ServiceClient<User> for UserService {
    fn inner(&self) -> &ResourceClient<User> {
        &self.inner
    }
}

impl UserService {
    #[instrument(skip(self))]
    pub async fn list(&self, filter: &UserFilter) -> Result<PaginatedResult<User>, ClientError> {
        debug!("Listing users");
        self.inner
            .find(RequestOptions::new().params(filter.to_params()))
            .await
    }

    #[instrument(skip(self))]
    pub async fn get(&self, pid: &str) -> Result<User, ClientError> {
        self.inner.get(pid).await
    }

    /// Registers a new account. Never sends a credential.
    #[instrument(skip(self))]
    pub async fn register(&self, dto: &UserCreate) -> Result<User, ClientError> {
        self.inner
            .create(dto, RequestOptions::new().requires_auth(false))
            .await
    }

    /// Exchanges email and password for an access token.
    #[instrument(skip(self))]
    pub async fn login(&self, request: &LoginRequest) -> Result<TokenResponse, ClientError> {
        self.inner
            .post(
                "login",
                request,
                RequestOptions::new().sub_endpoint("/login").requires_auth(false),
            )
            .await
    }

    /// Resolves the user owning `token`.
    ///
    /// The credential attached is whatever the shared slot holds; the session sets
    /// it to `token` before calling.
    #[instrument(skip_all)]
    pub async fn find_by_token(&self, token: &str) -> Result<User, ClientError> {
        let segment = self.inner.encode_segment("find", token)?;
        self.inner
            .find_as(
                RequestOptions::new()
                    .sub_endpoint(format!("/token{segment}"))
                    .requires_auth(true),
            )
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use resource_framework::mock::MockTransport;
    use resource_framework::{ApiError, HttpMethod, ResourceConfig, SharedCredential};
    use serde_json::json;
    use std::sync::Arc;

    fn service(transport: &MockTransport, credential: &SharedCredential) -> UserService {
        UserService::new(ResourceClient::new(
            ResourceConfig::for_entity::<User>().auth_required(true),
            Arc::new(transport.clone()),
            Arc::new(credential.clone()),
        ))
    }

    fn user_json(pid: &str) -> serde_json::Value {
        json!({ "id": 1, "pid": pid, "username": "ada", "email": "ada@gamehub.dev" })
    }

    #[tokio::test]
    async fn test_login_posts_credentials_without_auth() {
        let transport = MockTransport::new();
        transport
            .expect(HttpMethod::Post, "/users/login")
            .return_ok(json!({ "access_token": "tok-1" }));
        let credential = SharedCredential::new();
        credential.set("old");

        let response = service(&transport, &credential)
            .login(&LoginRequest {
                email: "ada@gamehub.dev".into(),
                password: "secret".into(),
            })
            .await
            .unwrap();

        assert_eq!(response.access_token, "tok-1");
        let request = transport.last_request().unwrap();
        assert_eq!(request.header("Authorization"), None);
        assert_eq!(
            request.body,
            Some(json!({ "email": "ada@gamehub.dev", "password": "secret" }))
        );
        transport.verify();
    }

    #[tokio::test]
    async fn test_find_by_token_sends_bearer() {
        let transport = MockTransport::new();
        transport
            .expect(HttpMethod::Get, "/users/token/tok-1")
            .return_ok(user_json("u1"));
        let credential = SharedCredential::new();
        credential.set("tok-1");

        let user = service(&transport, &credential)
            .find_by_token("tok-1")
            .await
            .unwrap();

        assert_eq!(user.pid, "u1");
        assert_eq!(
            transport.last_request().unwrap().header("Authorization"),
            Some("Bearer tok-1")
        );
    }

    #[tokio::test]
    async fn test_register_never_sends_credential() {
        let transport = MockTransport::new();
        transport
            .expect(HttpMethod::Post, "/users")
            .return_ok(user_json("u2"));
        let credential = SharedCredential::new();
        credential.set("tok-1");

        let dto = UserCreate {
            username: "ada".into(),
            email: "ada@gamehub.dev".into(),
            password: "secret".into(),
        };
        service(&transport, &credential).register(&dto).await.unwrap();

        assert_eq!(transport.last_request().unwrap().header("Authorization"), None);
    }

    #[tokio::test]
    async fn test_get_labels_failures() {
        let transport = MockTransport::new();
        transport
            .expect(HttpMethod::Get, "/users/nobody")
            .return_err(ApiError::status(
                404,
                "Not Found",
                Some(json!({ "message": "User not found" })),
            ));

        let err = service(&transport, &SharedCredential::new())
            .get("nobody")
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "ERROR in operation find of users: User not found");
    }

    #[tokio::test]
    async fn test_find_by_token_encodes_token_segment() {
        let transport = MockTransport::new();
        transport
            .expect(HttpMethod::Get, "/users/token/a%2Fb")
            .return_ok(user_json("u1"));

        service(&transport, &SharedCredential::new())
            .find_by_token("a/b")
            .await
            .unwrap();

        assert_eq!(transport.last_request().unwrap().path, "/users/token/a%2Fb");
    }
}
