use resource_framework::ResourceEntity;
use serde::{Deserialize, Serialize};

/// A named permission set assigned to users.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Role {
    pub id: u64,
    pub pid: String,
    pub name: String,
    #[serde(default)]
    pub permissions: Vec<String>,
}

impl Role {
    pub fn has_permission(&self, permission: &str) -> bool {
        self.permissions.iter().any(|p| p == permission)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoleCreate {
    pub name: String,
    pub permissions: Vec<String>,
}

impl ResourceEntity for Role {
    type Listing = Vec<Role>;
    type Create = RoleCreate;
    const RESOURCE: &'static str = "roles";
    const BASE_PATH: &'static str = "/roles";

    fn pid(&self) -> &str {
        &self.pid
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn permission_lookup() {
        let role = Role {
            id: 1,
            pid: "r1".into(),
            name: "moderator".into(),
            permissions: vec!["submissions:review".into()],
        };
        assert!(role.has_permission("submissions:review"));
        assert!(!role.has_permission("roles:create"));
    }
}
