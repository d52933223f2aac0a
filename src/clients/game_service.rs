//! # Game Service
//!
//! Catalog browsing and publishing for `/games`.
use crate::model::{Game, GameCreate, GameFilter};
use resource_framework::{
    ClientError, InteractionKind, InteractiveService, PaginatedResult, RequestOptions,
    ResourceClient, ServiceClient,
};
use tracing::{debug, instrument};

#[derive(Clone)]
pub struct GameService {
    inner: ResourceClient<Game>,
}

impl GameService {
    pub fn new(inner: ResourceClient<Game>) -> Self {
        Self { inner }
    }
}

impl ServiceClient<Game> for GameService {
    fn inner(&self) -> &ResourceClient<Game> {
        &self.inner
    }
}

impl InteractiveService<Game> for GameService {}

impl GameService {
    #[instrument(skip(self))]
    pub async fn list(&self, filter: &GameFilter) -> Result<PaginatedResult<Game>, ClientError> {
        debug!("Listing games");
        self.inner
            .find(RequestOptions::new().params(filter.to_params()))
            .await
    }

    #[instrument(skip(self))]
    pub async fn get(&self, pid: &str) -> Result<Game, ClientError> {
        self.inner.get(pid).await
    }

    /// Publishes a game. Sends the session credential.
    #[instrument(skip(self))]
    pub async fn create(&self, dto: &GameCreate) -> Result<Game, ClientError> {
        self.inner.create(dto, RequestOptions::new()).await
    }

    /// Records a download. Call right before handing the user the download URL.
    #[instrument(skip(self))]
    pub async fn record_download(&self, pid: &str) -> Result<(), ClientError> {
        self.add_interaction(pid, InteractionKind::Downloads).await
    }
}
