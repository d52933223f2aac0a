use super::Page;
use chrono::{DateTime, Utc};
use resource_framework::{ClientError, PaginatedResult, QueryParams, ResourceEntity};
use serde::{Deserialize, Serialize};

/// A registered GameHub member.
///
/// Users are not interactive: nobody likes or stars a profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: u64,
    pub pid: String,
    pub username: String,
    pub email: String,
    #[serde(default)]
    pub avatar: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    /// Name of the user's role (`admin`, `member`, ...).
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Payload for registering a new user.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct UserCreate {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Body of `POST /users/login`.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

// Keeps passwords out of `#[instrument]` output.
impl std::fmt::Debug for UserCreate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserCreate")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl std::fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginRequest")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Response of a successful login.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
}

/// Query for the user directory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserFilter {
    pub search: Option<String>,
    pub role: Option<String>,
    pub page: Page,
}

impl UserFilter {
    pub fn to_params(&self) -> QueryParams {
        let mut params = QueryParams::new();
        params
            .insert_opt("search", self.search.as_deref())
            .insert_opt("role", self.role.as_deref());
        self.page.write_to(&mut params);
        params
    }
}

impl ResourceEntity for User {
    type Listing = PaginatedResult<User>;
    type Create = UserCreate;
    const RESOURCE: &'static str = "users";
    const BASE_PATH: &'static str = "/users";

    fn pid(&self) -> &str {
        &self.pid
    }

    fn handle_service_error(operation: &'static str, error: ClientError) -> ClientError {
        error.labeled(operation, Self::RESOURCE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn decodes_with_optional_fields_missing() {
        let user: User = serde_json::from_value(json!({
            "id": 7,
            "pid": "u7",
            "username": "ada",
            "email": "ada@gamehub.dev",
            "createdAt": "2024-03-01T10:00:00Z"
        }))
        .unwrap();

        assert_eq!(user.pid(), "u7");
        assert!(user.avatar.is_none());
        assert_eq!(user.created_at.unwrap().to_rfc3339(), "2024-03-01T10:00:00+00:00");
    }

    #[test]
    fn login_request_debug_hides_password() {
        let request = LoginRequest {
            email: "ada@gamehub.dev".into(),
            password: "hunter2".into(),
        };
        let printed = format!("{request:?}");
        assert!(printed.contains("ada@gamehub.dev"));
        assert!(!printed.contains("hunter2"));
    }
}
