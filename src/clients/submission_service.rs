//! # Submission Service
use crate::model::{Submission, SubmissionCreate, SubmissionFilter};
use resource_framework::{
    ClientError, InteractiveService, PaginatedResult, RequestOptions, ResourceClient,
    ServiceClient,
};
use tracing::{debug, instrument};

#[derive(Clone)]
pub struct SubmissionService {
    inner: ResourceClient<Submission>,
}

impl SubmissionService {
    pub fn new(inner: ResourceClient<Submission>) -> Self {
        Self { inner }
    }
}

impl ServiceClient<Submission> for SubmissionService {
    fn inner(&self) -> &ResourceClient<Submission> {
        &self.inner
    }
}

impl InteractiveService<Submission> for SubmissionService {}

impl SubmissionService {
    #[instrument(skip(self))]
    pub async fn list(
        &self,
        filter: &SubmissionFilter,
    ) -> Result<PaginatedResult<Submission>, ClientError> {
        debug!("Listing submissions");
        self.inner
            .find(RequestOptions::new().params(filter.to_params()))
            .await
    }

    #[instrument(skip(self))]
    pub async fn list_for_game(
        &self,
        game_pid: &str,
    ) -> Result<PaginatedResult<Submission>, ClientError> {
        self.list(&SubmissionFilter::for_game(game_pid)).await
    }

    #[instrument(skip(self))]
    pub async fn get(&self, pid: &str) -> Result<Submission, ClientError> {
        self.inner.get(pid).await
    }

    #[instrument(skip(self))]
    pub async fn create(&self, dto: &SubmissionCreate) -> Result<Submission, ClientError> {
        self.inner.create(dto, RequestOptions::new()).await
    }
}
