//! Expert query handlers.

use std::sync::Arc;

use crate::domain::expert::{Expert, ExpertError};
use crate::domain::foundation::ExpertId;
use crate::ports::ExpertRepository;

/// Handler for fetching a single expert.
pub struct GetExpertHandler {
    repository: Arc<dyn ExpertRepository>,
}

impl GetExpertHandler {
    pub fn new(repository: Arc<dyn ExpertRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, id: &ExpertId) -> Result<Expert, ExpertError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| ExpertError::NotFound(id.clone()))
    }
}

/// Handler for listing every registered expert.
pub struct ListExpertsHandler {
    repository: Arc<dyn ExpertRepository>,
}

impl ListExpertsHandler {
    pub fn new(repository: Arc<dyn ExpertRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self) -> Result<Vec<Expert>, ExpertError> {
        Ok(self.repository.list_all().await?)
    }
}
