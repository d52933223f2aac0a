//! # Snippet Service
use crate::model::{Snippet, SnippetCreate, SnippetFilter};
use resource_framework::{
    ClientError, InteractionKind, InteractiveService, PaginatedResult, RequestOptions,
    ResourceClient, ServiceClient,
};
use tracing::{debug, instrument};

#[derive(Clone)]
pub struct SnippetService {
    inner: ResourceClient<Snippet>,
}

impl SnippetService {
    pub fn new(inner: ResourceClient<Snippet>) -> Self {
        Self { inner }
    }
}

impl ServiceClient<Snippet> for SnippetService {
    fn inner(&self) -> &ResourceClient<Snippet> {
        &self.inner
    }
}

impl InteractiveService<Snippet> for SnippetService {}

impl SnippetService {
    #[instrument(skip(self))]
    pub async fn list(
        &self,
        filter: &SnippetFilter,
    ) -> Result<PaginatedResult<Snippet>, ClientError> {
        debug!("Listing snippets");
        self.inner
            .find(RequestOptions::new().params(filter.to_params()))
            .await
    }

    #[instrument(skip(self))]
    pub async fn get(&self, pid: &str) -> Result<Snippet, ClientError> {
        self.inner.get(pid).await
    }

    #[instrument(skip(self))]
    pub async fn create(&self, dto: &SnippetCreate) -> Result<Snippet, ClientError> {
        self.inner.create(dto, RequestOptions::new()).await
    }

    /// Counts a fork of `pid`. Creating the forked copy is a separate `create`.
    #[instrument(skip(self))]
    pub async fn fork(&self, pid: &str) -> Result<(), ClientError> {
        self.add_interaction(pid, InteractionKind::Forks).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use resource_framework::mock::MockTransport;
    use resource_framework::{HttpMethod, ResourceConfig, SharedCredential};
    use serde_json::json;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_fork_signals_forks_interaction() {
        let transport = MockTransport::new();
        transport
            .expect(HttpMethod::Patch, "/snippets/abc123/interact")
            .return_ok(json!(null));
        let service = SnippetService::new(ResourceClient::new(
            ResourceConfig::for_entity::<Snippet>().auth_required(true),
            Arc::new(transport.clone()),
            Arc::new(SharedCredential::new()),
        ));

        service.fork("abc123").await.unwrap();

        assert_eq!(
            transport.last_request().unwrap().body,
            Some(json!({ "type": "forks" }))
        );
        transport.verify();
    }
}
