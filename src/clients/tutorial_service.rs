//! # Tutorial Service
use crate::model::{Tutorial, TutorialCreate, TutorialFilter};
use resource_framework::{
    ClientError, InteractiveService, PaginatedResult, RequestOptions, ResourceClient,
    ServiceClient,
};
use tracing::{debug, instrument};

#[derive(Clone)]
pub struct TutorialService {
    inner: ResourceClient<Tutorial>,
}

impl TutorialService {
    pub fn new(inner: ResourceClient<Tutorial>) -> Self {
        Self { inner }
    }
}

impl ServiceClient<Tutorial> for TutorialService {
    fn inner(&self) -> &ResourceClient<Tutorial> {
        &self.inner
    }
}

impl InteractiveService<Tutorial> for TutorialService {}

impl TutorialService {
    #[instrument(skip(self))]
    pub async fn list(
        &self,
        filter: &TutorialFilter,
    ) -> Result<PaginatedResult<Tutorial>, ClientError> {
        debug!("Listing tutorials");
        self.inner
            .find(RequestOptions::new().params(filter.to_params()))
            .await
    }

    #[instrument(skip(self))]
    pub async fn get(&self, pid: &str) -> Result<Tutorial, ClientError> {
        self.inner.get(pid).await
    }

    #[instrument(skip(self))]
    pub async fn create(&self, dto: &TutorialCreate) -> Result<Tutorial, ClientError> {
        self.inner.create(dto, RequestOptions::new()).await
    }
}
