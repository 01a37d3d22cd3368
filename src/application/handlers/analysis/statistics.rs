//! GetStatisticsHandler - Panel progress overview.

use std::sync::Arc;

use serde::Serialize;

use super::AnalysisError;
use crate::domain::criteria::{CriteriaHierarchy, HierarchyLevel};
use crate::domain::foundation::Timestamp;
use crate::ports::{AnalysisSessionRepository, ExpertRepository};

/// Submission progress of one level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LevelCompletion {
    pub level: HierarchyLevel,
    pub completed_experts: usize,
    /// Submissions with CR below the aggregation threshold.
    pub acceptable_judgments: usize,
}

/// Counts across the whole data set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DataStatistics {
    pub total_experts: usize,
    pub active_experts: usize,
    pub analysis_sessions: usize,
    pub last_modified: Option<Timestamp>,
    pub level_completion: Vec<LevelCompletion>,
}

/// Handler for data statistics.
pub struct GetStatisticsHandler {
    experts: Arc<dyn ExpertRepository>,
    sessions: Arc<dyn AnalysisSessionRepository>,
    hierarchy: Arc<CriteriaHierarchy>,
}

impl GetStatisticsHandler {
    pub fn new(
        experts: Arc<dyn ExpertRepository>,
        sessions: Arc<dyn AnalysisSessionRepository>,
        hierarchy: Arc<CriteriaHierarchy>,
    ) -> Self {
        Self {
            experts,
            sessions,
            hierarchy,
        }
    }

    pub async fn handle(&self) -> Result<DataStatistics, AnalysisError> {
        let experts = self.experts.list_all().await?;

        let level_completion = self
            .hierarchy
            .levels()
            .into_iter()
            .map(|level| {
                let records: Vec<_> = experts
                    .iter()
                    .filter_map(|expert| expert.judgment_for(&level))
                    .collect();
                LevelCompletion {
                    completed_experts: records.len(),
                    acceptable_judgments: records.iter().filter(|r| r.is_acceptable()).count(),
                    level,
                }
            })
            .collect();

        Ok(DataStatistics {
            total_experts: experts.len(),
            active_experts: experts.iter().filter(|e| e.is_active()).count(),
            analysis_sessions: self.sessions.count().await?,
            last_modified: self.experts.last_modified().await?,
            level_completion,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::InMemoryStore;
    use crate::domain::ahp::build_judgment_matrix;
    use crate::domain::criteria::EVALUATION_SYSTEM;
    use crate::domain::expert::{Expert, ExpertProfile, JudgmentRecord};
    use std::collections::HashMap;

    #[tokio::test]
    async fn empty_store_reports_zeroes() {
        let store = Arc::new(InMemoryStore::new());
        let handler =
            GetStatisticsHandler::new(store.clone(), store, Arc::new(EVALUATION_SYSTEM.clone()));

        let stats = handler.handle().await.unwrap();

        assert_eq!(stats.total_experts, 0);
        assert_eq!(stats.analysis_sessions, 0);
        assert!(stats.last_modified.is_none());
        assert_eq!(stats.level_completion.len(), 5);
        assert!(stats.level_completion.iter().all(|l| l.completed_experts == 0));
    }

    #[tokio::test]
    async fn counts_acceptable_judgments_per_level() {
        let store = Arc::new(InMemoryStore::new());

        let consistent = {
            let values = HashMap::from([
                ((0, 1), 1.0),
                ((0, 2), 1.0),
                ((0, 3), 1.0),
                ((1, 2), 1.0),
                ((1, 3), 1.0),
                ((2, 3), 1.0),
            ]);
            JudgmentRecord::assess(build_judgment_matrix(&values, 4).unwrap()).unwrap()
        };
        let contradictory = {
            let values = HashMap::from([
                ((0, 1), 5.0),
                ((0, 2), 0.2),
                ((0, 3), 5.0),
                ((1, 2), 5.0),
                ((1, 3), 0.2),
                ((2, 3), 5.0),
            ]);
            JudgmentRecord::assess(build_judgment_matrix(&values, 4).unwrap()).unwrap()
        };
        assert!(!contradictory.is_acceptable());

        for (badge, record) in [("E-1", consistent), ("E-2", contradictory)] {
            let profile = ExpertProfile::new(badge, "Expert", "Jilin University", "", "", 1).unwrap();
            let mut expert = Expert::register(profile);
            expert.record_judgment(HierarchyLevel::Top, record);
            store.register(&expert).await.unwrap();
        }

        let handler = GetStatisticsHandler::new(
            store.clone(),
            store,
            Arc::new(EVALUATION_SYSTEM.clone()),
        );
        let stats = handler.handle().await.unwrap();

        assert_eq!(stats.total_experts, 2);
        assert_eq!(stats.active_experts, 2);
        assert!(stats.last_modified.is_some());
        let top = &stats.level_completion[0];
        assert_eq!(top.level, HierarchyLevel::Top);
        assert_eq!(top.completed_experts, 2);
        assert_eq!(top.acceptable_judgments, 1);
    }
}
