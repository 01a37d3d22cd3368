//! RegisterExpertHandler - Command handler for adding panel members.

use std::sync::Arc;

use crate::domain::expert::{Expert, ExpertError, ExpertProfile};
use crate::ports::ExpertRepository;

/// Command to register a new expert.
#[derive(Debug, Clone)]
pub struct RegisterExpertCommand {
    pub badge_number: String,
    pub name: String,
    pub institution: String,
    pub title: String,
    pub research_field: String,
    pub years_experience: u32,
}

/// Handler for registering experts.
pub struct RegisterExpertHandler {
    repository: Arc<dyn ExpertRepository>,
}

impl RegisterExpertHandler {
    pub fn new(repository: Arc<dyn ExpertRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, cmd: RegisterExpertCommand) -> Result<Expert, ExpertError> {
        let profile = ExpertProfile::new(
            &cmd.badge_number,
            &cmd.name,
            &cmd.institution,
            &cmd.title,
            &cmd.research_field,
            cmd.years_experience,
        )?;

        let expert = Expert::register(profile);
        if self.repository.find_by_id(expert.id()).await?.is_some() {
            return Err(ExpertError::AlreadyRegistered(expert.id().clone()));
        }

        self.repository.register(&expert).await?;

        tracing::info!(
            expert_id = %expert.id(),
            institution = %expert.profile().institution,
            "Expert registered"
        );

        Ok(expert)
    }
}
