//! In-Memory Store Adapter
//!
//! Keeps experts and analysis sessions in memory.
//! Useful for testing and development.

use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::analysis_session::{AnalysisSession, LevelResult};
use crate::domain::criteria::HierarchyLevel;
use crate::domain::expert::{Expert, ExpertError, JudgmentRecord};
use crate::domain::foundation::{AnalysisSessionId, DomainError, ErrorCode, ExpertId, Timestamp};
use crate::ports::{AnalysisSessionRepository, ExpertRepository};

/// In-memory storage for experts and analysis sessions
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    experts: Arc<RwLock<BTreeMap<ExpertId, Expert>>>,
    sessions: Arc<RwLock<HashMap<AnalysisSessionId, AnalysisSession>>>,
    last_modified: Arc<RwLock<Option<Timestamp>>>,
}

impl InMemoryStore {
    /// Create a new empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear all stored data (useful for tests)
    pub async fn clear(&self) {
        self.experts.write().await.clear();
        self.sessions.write().await.clear();
        *self.last_modified.write().await = None;
    }

    async fn touch(&self) {
        *self.last_modified.write().await = Some(Timestamp::now());
    }
}

#[async_trait]
impl ExpertRepository for InMemoryStore {
    async fn register(&self, expert: &Expert) -> Result<(), DomainError> {
        {
            let mut experts = self.experts.write().await;
            if experts.contains_key(expert.id()) {
                return Err(ExpertError::AlreadyRegistered(expert.id().clone()).into());
            }
            experts.insert(expert.id().clone(), expert.clone());
        }
        self.touch().await;
        Ok(())
    }

    async fn record_judgment(
        &self,
        id: &ExpertId,
        level: HierarchyLevel,
        record: JudgmentRecord,
    ) -> Result<bool, DomainError> {
        let replaced = {
            let mut experts = self.experts.write().await;
            let expert = experts
                .get_mut(id)
                .ok_or_else(|| ExpertError::NotFound(id.clone()))?;
            expert.record_judgment(level, record).is_some()
        };
        self.touch().await;
        Ok(replaced)
    }

    async fn find_by_id(&self, id: &ExpertId) -> Result<Option<Expert>, DomainError> {
        Ok(self.experts.read().await.get(id).cloned())
    }

    async fn list_all(&self) -> Result<Vec<Expert>, DomainError> {
        Ok(self.experts.read().await.values().cloned().collect())
    }

    async fn last_modified(&self) -> Result<Option<Timestamp>, DomainError> {
        Ok(*self.last_modified.read().await)
    }
}

#[async_trait]
impl AnalysisSessionRepository for InMemoryStore {
    async fn save(&self, session: &AnalysisSession) -> Result<(), DomainError> {
        self.sessions
            .write()
            .await
            .insert(*session.id(), session.clone());
        self.touch().await;
        Ok(())
    }

    async fn record_results(
        &self,
        id: &AnalysisSessionId,
        results: Vec<LevelResult>,
        exported: bool,
    ) -> Result<AnalysisSession, DomainError> {
        let written = {
            let mut sessions = self.sessions.write().await;
            let session = sessions.get_mut(id).ok_or_else(|| {
                DomainError::new(
                    ErrorCode::SessionNotFound,
                    format!("Analysis session not found: {}", id),
                )
            })?;
            for result in results {
                session.record_result(result);
            }
            if exported {
                session.mark_exported();
            }
            session.clone()
        };
        self.touch().await;
        Ok(written)
    }

    async fn find_by_id(
        &self,
        id: &AnalysisSessionId,
    ) -> Result<Option<AnalysisSession>, DomainError> {
        Ok(self.sessions.read().await.get(id).cloned())
    }

    async fn count(&self) -> Result<usize, DomainError> {
        Ok(self.sessions.read().await.len())
    }
}
