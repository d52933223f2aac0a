//! # Role Service
use crate::model::{Role, RoleCreate};
use resource_framework::{ClientError, RequestOptions, ResourceClient, ServiceClient};
use tracing::instrument;

#[derive(Clone)]
pub struct RoleService {
    inner: ResourceClient<Role>,
}

impl RoleService {
    pub fn new(inner: ResourceClient<Role>) -> Self {
        Self { inner }
    }
}

impl ServiceClient<Role> for RoleService {
    fn inner(&self) -> &ResourceClient<Role> {
        &self.inner
    }
}

impl RoleService {
    /// Roles are admin data; listing them needs a credential too.
    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<Role>, ClientError> {
        self.inner
            .find(RequestOptions::new().requires_auth(true))
            .await
    }

    #[instrument(skip(self))]
    pub async fn create(&self, dto: &RoleCreate) -> Result<Role, ClientError> {
        self.inner.create(dto, RequestOptions::new()).await
    }
}
