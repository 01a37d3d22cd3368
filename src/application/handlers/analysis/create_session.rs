//! CreateAnalysisSessionHandler - Command handler for new analysis sessions.

use std::sync::Arc;

use super::AnalysisError;
use crate::domain::analysis_session::AnalysisSession;
use crate::domain::criteria::CriteriaHierarchy;
use crate::ports::AnalysisSessionRepository;

/// Command to create an analysis session.
#[derive(Debug, Clone)]
pub struct CreateAnalysisSessionCommand {
    pub name: String,
    pub description: Option<String>,
    /// Level keys to cover; empty means every level of the hierarchy.
    pub levels: Vec<String>,
}

/// Handler for creating analysis sessions.
pub struct CreateAnalysisSessionHandler {
    repository: Arc<dyn AnalysisSessionRepository>,
    hierarchy: Arc<CriteriaHierarchy>,
}

impl CreateAnalysisSessionHandler {
    pub fn new(
        repository: Arc<dyn AnalysisSessionRepository>,
        hierarchy: Arc<CriteriaHierarchy>,
    ) -> Self {
        Self {
            repository,
            hierarchy,
        }
    }

    pub async fn handle(
        &self,
        cmd: CreateAnalysisSessionCommand,
    ) -> Result<AnalysisSession, AnalysisError> {
        let levels = if cmd.levels.is_empty() {
            self.hierarchy.levels()
        } else {
            let mut levels = Vec::with_capacity(cmd.levels.len());
            for key in &cmd.levels {
                let level = self.hierarchy.resolve_level(key)?;
                if !levels.contains(&level) {
                    levels.push(level);
                }
            }
            levels
        };

        let session = AnalysisSession::new(&cmd.name, cmd.description, levels)?;
        self.repository.save(&session).await?;

        tracing::info!(
            session_id = %session.id(),
            levels = session.levels().len(),
            "Analysis session created"
        );

        Ok(session)
    }
}
