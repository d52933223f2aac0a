//! # ServiceClient Trait
//!
//! Provides a common interface for resource-specific services, adding default `find`,
//! `create` and `add_interaction` methods built on top of a generic [`ResourceClient`].
use crate::{
    ClientError, InteractionKind, Interactive, RequestOptions, ResourceClient, ResourceEntity,
};
use async_trait::async_trait;

/// Trait for resource-specific services to inherit the generic operations.
///
/// # Example
///
/// ```rust
/// use resource_framework::{
///     Anonymous, PaginatedResult, RequestOptions, ResourceClient, ResourceConfig, ResourceEntity,
///     ServiceClient,
/// };
/// use resource_framework::mock::MockTransport;
/// use serde::{Deserialize, Serialize};
/// use std::sync::Arc;
///
/// // 1. Define Entity
/// #[derive(Clone, Debug, Deserialize)]
/// struct Category { pid: String, name: String }
/// #[derive(Debug, Serialize)]
/// struct CategoryCreate { name: String }
///
/// impl ResourceEntity for Category {
///     type Listing = PaginatedResult<Category>;
///     type Create = CategoryCreate;
///     const RESOURCE: &'static str = "categories";
///     const BASE_PATH: &'static str = "/categories";
///     fn pid(&self) -> &str { &self.pid }
/// }
///
/// // 2. Define Service Wrapper
/// struct CategoryService {
///     inner: ResourceClient<Category>,
/// }
///
/// // 3. Implement ServiceClient
/// impl ServiceClient<Category> for CategoryService {
///     fn inner(&self) -> &ResourceClient<Category> {
///         &self.inner
///     }
/// }
///
/// // 4. Usage
/// async fn usage(service: CategoryService) {
///     // find() and create() are provided automatically!
///     let _ = service.find(RequestOptions::new()).await;
/// }
/// # let client = ResourceClient::<Category>::new(
/// #     resource_framework::ResourceConfig::for_entity::<Category>(),
/// #     Arc::new(MockTransport::new()),
/// #     Arc::new(Anonymous),
/// # );
/// # let _service = CategoryService { inner: client };
/// ```
#[async_trait]
pub trait ServiceClient<T: ResourceEntity>: Send + Sync {
    /// Access the inner generic ResourceClient.
    fn inner(&self) -> &ResourceClient<T>;

    /// List/find on the resource base path.
    #[tracing::instrument(skip_all, fields(resource = T::RESOURCE))]
    async fn find(&self, options: RequestOptions) -> Result<T::Listing, ClientError> {
        tracing::debug!("Sending request");
        self.inner().find(options).await
    }

    /// Create an entity and return the server's echo of it.
    #[tracing::instrument(skip_all, fields(resource = T::RESOURCE))]
    async fn create_entity(
        &self,
        dto: T::Create,
        options: RequestOptions,
    ) -> Result<T, ClientError> {
        tracing::debug!(?dto, "Sending request");
        self.inner().create(&dto, options).await
    }
}

/// Services over [`Interactive`] resources get `add_interaction` for free.
#[async_trait]
pub trait InteractiveService<T: Interactive>: ServiceClient<T> {
    /// Signal one interaction on `pid`. Fire-and-forget from the caller's view.
    #[tracing::instrument(skip(self), fields(resource = T::RESOURCE))]
    async fn add_interaction(&self, pid: &str, kind: InteractionKind) -> Result<(), ClientError> {
        tracing::debug!("Sending request");
        self.inner().add_interaction(pid, kind).await
    }
}
