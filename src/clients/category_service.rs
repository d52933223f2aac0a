//! # Category Service
use crate::model::{Category, CategoryCreate};
use resource_framework::{ClientError, RequestOptions, ResourceClient, ServiceClient};
use tracing::instrument;

#[derive(Clone)]
pub struct CategoryService {
    inner: ResourceClient<Category>,
}

impl CategoryService {
    pub fn new(inner: ResourceClient<Category>) -> Self {
        Self { inner }
    }
}

impl ServiceClient<Category> for CategoryService {
    fn inner(&self) -> &ResourceClient<Category> {
        &self.inner
    }
}

impl CategoryService {
    /// All categories. The endpoint is not paginated.
    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<Category>, ClientError> {
        self.inner.find(RequestOptions::new()).await
    }

    #[instrument(skip(self))]
    pub async fn get(&self, pid: &str) -> Result<Category, ClientError> {
        self.inner.get(pid).await
    }

    #[instrument(skip(self))]
    pub async fn create(&self, dto: &CategoryCreate) -> Result<Category, ClientError> {
        self.inner.create(dto, RequestOptions::new()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use resource_framework::mock::MockTransport;
    use resource_framework::{ApiError, HttpMethod, ResourceConfig, SharedCredential};
    use serde_json::json;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_list_decodes_plain_array() {
        let transport = MockTransport::new();
        transport.expect(HttpMethod::Get, "/categories").return_ok(json!([
            { "id": 1, "pid": "c1", "name": "Platformer", "slug": "platformer" },
            { "id": 2, "pid": "c2", "name": "Puzzle", "slug": "puzzle" }
        ]));
        let service = CategoryService::new(ResourceClient::new(
            ResourceConfig::for_entity::<Category>(),
            Arc::new(transport.clone()),
            Arc::new(SharedCredential::new()),
        ));

        let categories = service.list().await.unwrap();

        assert_eq!(categories.len(), 2);
        assert_eq!(categories[1].slug, "puzzle");
    }

    #[tokio::test]
    async fn test_errors_are_not_labeled() {
        let transport = MockTransport::new();
        transport
            .expect(HttpMethod::Get, "/categories/c9")
            .return_err(ApiError::status(404, "Not Found", None));
        let service = CategoryService::new(ResourceClient::new(
            ResourceConfig::for_entity::<Category>(),
            Arc::new(transport.clone()),
            Arc::new(SharedCredential::new()),
        ));

        let err = service.get("c9").await.unwrap_err();

        assert!(matches!(err, ClientError::Api(_)));
        assert_eq!(err.to_string(), "Request failed with status 404 Not Found");
    }
}
