//! AnalyzeLevelHandler - Group analysis of one hierarchy level.

use std::collections::HashMap;
use std::sync::Arc;

use serde::Serialize;

use super::AnalysisError;
use crate::domain::ahp::{aggregate_group, ExpertWeights, GroupAggregation};
use crate::domain::analysis_session::LevelResult;
use crate::domain::criteria::{CriteriaHierarchy, HierarchyLevel};
use crate::domain::expert::Expert;
use crate::domain::foundation::AnalysisSessionId;
use crate::ports::{AnalysisSessionRepository, ExpertRepository};

/// Command to analyse one level, optionally storing the result.
#[derive(Debug, Clone)]
pub struct AnalyzeLevelCommand {
    pub level: String,
    pub session_id: Option<AnalysisSessionId>,
}

/// Outcome of a level analysis.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum LevelAnalysis {
    Computed(LevelResult),
    /// Not enough acceptable judgments yet.
    InsufficientData {
        level: HierarchyLevel,
        submitted: usize,
        qualifying: usize,
    },
}

impl LevelAnalysis {
    pub fn computed(&self) -> Option<&LevelResult> {
        match self {
            LevelAnalysis::Computed(result) => Some(result),
            LevelAnalysis::InsufficientData { .. } => None,
        }
    }
}

/// Aggregates every expert's record for `level`.
pub(crate) fn analyze(
    hierarchy: &CriteriaHierarchy,
    experts: &[Expert],
    level: &HierarchyLevel,
) -> Result<LevelAnalysis, AnalysisError> {
    let criteria = hierarchy
        .criteria_for(level)?
        .into_iter()
        .cloned()
        .collect();

    let judgments: HashMap<_, _> = experts
        .iter()
        .filter_map(|expert| {
            expert.judgment_for(level).map(|record| {
                (
                    expert.id().clone(),
                    ExpertWeights::new(record.weights().clone(), record.consistency_ratio()),
                )
            })
        })
        .collect();

    let analysis = match aggregate_group(&judgments)? {
        GroupAggregation::Computed(result) => {
            LevelAnalysis::Computed(LevelResult::new(level.clone(), criteria, result))
        }
        GroupAggregation::InsufficientData {
            submitted,
            qualifying,
        } => LevelAnalysis::InsufficientData {
            level: level.clone(),
            submitted,
            qualifying,
        },
    };
    Ok(analysis)
}

/// Handler for single-level analysis.
pub struct AnalyzeLevelHandler {
    experts: Arc<dyn ExpertRepository>,
    sessions: Arc<dyn AnalysisSessionRepository>,
    hierarchy: Arc<CriteriaHierarchy>,
}

impl AnalyzeLevelHandler {
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

    pub async fn handle(&self, cmd: AnalyzeLevelCommand) -> Result<LevelAnalysis, AnalysisError> {
        let level = self.hierarchy.resolve_level(&cmd.level)?;

        if let Some(id) = cmd.session_id {
            if self.sessions.find_by_id(&id).await?.is_none() {
                return Err(AnalysisError::SessionNotFound(id));
            }
        }

        let experts = self.experts.list_all().await?;
        let analysis = analyze(&self.hierarchy, &experts, &level)?;

        match &analysis {
            LevelAnalysis::Computed(result) => {
                tracing::info!(
                    level = %level,
                    experts = result.result.expert_count,
                    consensus = result.result.consensus.label(),
                    "Level analysed"
                );
                if let Some(id) = cmd.session_id {
                    self.sessions
                        .record_results(&id, vec![result.clone()], false)
                        .await?;
                    tracing::debug!(session_id = %id, level = %level, "Level result stored");
                }
            }
            LevelAnalysis::InsufficientData {
                submitted,
                qualifying,
                ..
            } => {
                tracing::warn!(
                    level = %level,
                    submitted,
                    qualifying,
                    "Not enough acceptable judgments for group analysis"
                );
            }
        }

        Ok(analysis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::InMemoryStore;
    use crate::domain::ahp::{build_judgment_matrix, JudgmentMatrix};
    use crate::domain::analysis_session::AnalysisSession;
    use crate::domain::criteria::EVALUATION_SYSTEM;
    use crate::domain::expert::{ExpertProfile, JudgmentRecord};

    fn record(values: [f64; 6]) -> JudgmentRecord {
        let keys = [(0, 1), (0, 2), (0, 3), (1, 2), (1, 3), (2, 3)];
        let map = keys.into_iter().zip(values).collect();
        JudgmentRecord::assess(build_judgment_matrix(&map, 4).unwrap()).unwrap()
    }

    async fn seed(store: &InMemoryStore, badge: &str, values: [f64; 6]) {
        let profile = ExpertProfile::new(badge, "Expert", "Sun Yat-sen University", "", "", 5).unwrap();
        let mut expert = Expert::register(profile);
        expert.record_judgment(HierarchyLevel::Top, record(values));
        ExpertRepository::register(store, &expert).await.unwrap();
    }

    fn handler(store: &Arc<InMemoryStore>) -> AnalyzeLevelHandler {
        AnalyzeLevelHandler::new(store.clone(), store.clone(), Arc::new(EVALUATION_SYSTEM.clone()))
    }

    #[tokio::test]
    async fn two_consistent_experts_produce_result() {
        let store = Arc::new(InMemoryStore::new());
        seed(&store, "E-1", [3.0, 5.0, 2.0, 2.0, 0.5, 0.25]).await;
        seed(&store, "E-2", [2.0, 4.0, 2.0, 2.0, 1.0, 0.5]).await;

        let analysis = handler(&store)
            .handle(AnalyzeLevelCommand {
                level: "top".into(),
                session_id: None,
            })
            .await
            .unwrap();

        let result = analysis.computed().unwrap();
        assert_eq!(result.result.expert_count, 2);
        assert_eq!(result.criteria.len(), 4);
        let weights = result.result.group_weights.as_slice();
        assert!(weights[1..].iter().all(|w| *w < weights[0]));
    }

    #[tokio::test]
    async fn single_expert_is_insufficient() {
        let store = Arc::new(InMemoryStore::new());
        seed(&store, "E-1", [3.0, 5.0, 2.0, 2.0, 0.5, 0.25]).await;

        let analysis = handler(&store)
            .handle(AnalyzeLevelCommand {
                level: "top".into(),
                session_id: None,
            })
            .await
            .unwrap();

        assert_eq!(
            analysis,
            LevelAnalysis::InsufficientData {
                level: HierarchyLevel::Top,
                submitted: 1,
                qualifying: 1,
            }
        );
    }

    #[tokio::test]
    async fn computed_result_is_stored_in_session() {
        let store = Arc::new(InMemoryStore::new());
        seed(&store, "E-1", [3.0, 5.0, 2.0, 2.0, 0.5, 0.25]).await;
        seed(&store, "E-2", [3.0, 5.0, 2.0, 2.0, 0.5, 0.25]).await;
        let session = AnalysisSession::new("Round 1", None, vec![]).unwrap();
        AnalysisSessionRepository::save(store.as_ref(), &session).await.unwrap();

        handler(&store)
            .handle(AnalyzeLevelCommand {
                level: "TOP".into(),
                session_id: Some(*session.id()),
            })
            .await
            .unwrap();

        let stored = AnalysisSessionRepository::find_by_id(store.as_ref(), session.id())
            .await
            .unwrap()
            .unwrap();
        assert!(stored.result_for(&HierarchyLevel::Top).is_some());
    }

    #[tokio::test]
    async fn unknown_session_is_rejected() {
        let store = Arc::new(InMemoryStore::new());
        let err = handler(&store)
            .handle(AnalyzeLevelCommand {
                level: "top".into(),
                session_id: Some(AnalysisSessionId::new()),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, AnalysisError::SessionNotFound(_)));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 8)]
    async fn concurrent_levels_into_one_session_are_all_kept() {
        let store = Arc::new(InMemoryStore::new());
        for badge in ["E-1", "E-2"] {
            let profile =
                ExpertProfile::new(badge, "Expert", "Nankai University", "", "", 5).unwrap();
            let mut expert = Expert::register(profile);
            for level in EVALUATION_SYSTEM.levels() {
                let n = EVALUATION_SYSTEM.order_of(&level).unwrap();
                let matrix = JudgmentMatrix::identity(n).unwrap();
                expert.record_judgment(level, JudgmentRecord::assess(matrix).unwrap());
            }
            ExpertRepository::register(store.as_ref(), &expert).await.unwrap();
        }
        let session = AnalysisSession::new("Parallel", None, vec![]).unwrap();
        AnalysisSessionRepository::save(store.as_ref(), &session).await.unwrap();
        let handler = Arc::new(handler(&store));

        let tasks: Vec<_> = EVALUATION_SYSTEM
            .levels()
            .into_iter()
            .map(|level| {
                let handler = handler.clone();
                let session_id = *session.id();
                tokio::spawn(async move {
                    handler
                        .handle(AnalyzeLevelCommand {
                            level: level.to_string(),
                            session_id: Some(session_id),
                        })
                        .await
                })
            })
            .collect();
        for task in tasks {
            assert!(task.await.unwrap().unwrap().computed().is_some());
        }

        let stored = AnalysisSessionRepository::find_by_id(store.as_ref(), session.id())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.results().len(), 5);
    }
}
