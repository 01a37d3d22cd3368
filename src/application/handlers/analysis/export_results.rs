//! ExportResultsHandler - Comprehensive weight report for a session.
//!
//! Analyses every level, composes global weights over whatever branches
//! are available, and stores each level result in the session.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use serde::Serialize;

use super::analyze_level::{analyze, LevelAnalysis};
use super::AnalysisError;
use crate::domain::ahp::{compose_hierarchy, ConsensusLevel, HierarchyComposition, WeightVector};
use crate::domain::analysis_session::LevelResult;
use crate::domain::criteria::{CriteriaHierarchy, Criterion, HierarchyLevel};
use crate::domain::foundation::{AnalysisSessionId, Timestamp};
use crate::ports::{AnalysisSessionRepository, ExpertRepository};

/// Labelled group weights of one level.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LevelWeights {
    pub criteria: Vec<Criterion>,
    pub weights: WeightVector,
}

/// Agreement summary of one level.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisQuality {
    pub expert_count: usize,
    pub average_cr: f64,
    pub mean_pairwise_correlation: f64,
    pub consensus: ConsensusLevel,
    pub weight_stability: f64,
}

impl From<&LevelResult> for AnalysisQuality {
    fn from(level: &LevelResult) -> Self {
        let result = &level.result;
        Self {
            expert_count: result.expert_count,
            average_cr: result.average_cr,
            mean_pairwise_correlation: result.mean_pairwise_correlation,
            consensus: result.consensus,
            weight_stability: result.weight_stability,
        }
    }
}

/// One row of the global weight table.
///
/// Top-level rows carry a relative weight of 1.0.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HierarchyRow {
    pub level: HierarchyLevel,
    pub code: String,
    pub name: String,
    pub absolute_weight: f64,
    pub relative_weight: f64,
}

/// A level that could not be analysed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkippedLevel {
    pub level: HierarchyLevel,
    pub submitted: usize,
    pub qualifying: usize,
}

/// The exported report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportReport {
    pub system_name: String,
    pub analysis_time: Timestamp,
    pub session_id: AnalysisSessionId,
    pub expert_count: usize,
    pub level_weights: BTreeMap<HierarchyLevel, LevelWeights>,
    pub analysis_quality: BTreeMap<HierarchyLevel, AnalysisQuality>,
    pub skipped_levels: Vec<SkippedLevel>,
    pub hierarchy_weights: Vec<HierarchyRow>,
    /// Top-level codes whose branch had no group result.
    pub incomplete_branches: Vec<String>,
    /// Leaf codes by descending absolute weight. An undecomposed branch
    /// appears under its top-level code.
    pub leaf_ranking: Vec<String>,
}

#[derive(Default)]
struct ComposedRows {
    rows: Vec<HierarchyRow>,
    incomplete_branches: Vec<String>,
    leaf_ranking: Vec<String>,
}

/// Command to export a session's results.
#[derive(Debug, Clone)]
pub struct ExportResultsCommand {
    pub session_id: AnalysisSessionId,
}

/// Handler for comprehensive export.
pub struct ExportResultsHandler {
    experts: Arc<dyn ExpertRepository>,
    sessions: Arc<dyn AnalysisSessionRepository>,
    hierarchy: Arc<CriteriaHierarchy>,
}

impl ExportResultsHandler {
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

    pub async fn handle(&self, cmd: ExportResultsCommand) -> Result<ExportReport, AnalysisError> {
        if self.sessions.find_by_id(&cmd.session_id).await?.is_none() {
            return Err(AnalysisError::SessionNotFound(cmd.session_id));
        }
        let experts = self.experts.list_all().await?;

        let mut results: BTreeMap<HierarchyLevel, LevelResult> = BTreeMap::new();
        let mut skipped_levels = Vec::new();
        for level in self.hierarchy.levels() {
            match analyze(&self.hierarchy, &experts, &level)? {
                LevelAnalysis::Computed(result) => {
                    results.insert(level, result);
                }
                LevelAnalysis::InsufficientData {
                    level,
                    submitted,
                    qualifying,
                } => skipped_levels.push(SkippedLevel {
                    level,
                    submitted,
                    qualifying,
                }),
            }
        }

        if results.is_empty() {
            tracing::warn!(session_id = %cmd.session_id, "Nothing to export");
            return Err(AnalysisError::NoAnalysableResults);
        }

        let composed = match results.get(&HierarchyLevel::Top) {
            Some(top) => self.hierarchy_rows(top, &results)?,
            None => ComposedRows::default(),
        };

        let report = ExportReport {
            system_name: self.hierarchy.name.clone(),
            analysis_time: Timestamp::now(),
            session_id: cmd.session_id,
            expert_count: experts.len(),
            level_weights: results
                .iter()
                .map(|(level, result)| {
                    (
                        level.clone(),
                        LevelWeights {
                            criteria: result.criteria.clone(),
                            weights: result.result.group_weights.clone(),
                        },
                    )
                })
                .collect(),
            analysis_quality: results
                .iter()
                .map(|(level, result)| (level.clone(), AnalysisQuality::from(result)))
                .collect(),
            skipped_levels,
            hierarchy_weights: composed.rows,
            incomplete_branches: composed.incomplete_branches,
            leaf_ranking: composed.leaf_ranking,
        };

        self.sessions
            .record_results(&cmd.session_id, results.into_values().collect(), true)
            .await?;

        tracing::info!(
            session_id = %cmd.session_id,
            levels = report.level_weights.len(),
            rows = report.hierarchy_weights.len(),
            "Results exported"
        );

        Ok(report)
    }

    fn hierarchy_rows(
        &self,
        top: &LevelResult,
        results: &BTreeMap<HierarchyLevel, LevelResult>,
    ) -> Result<ComposedRows, AnalysisError> {
        let branches = self.hierarchy.branches();

        let sub_weights: HashMap<usize, WeightVector> = results
            .iter()
            .filter_map(|(level, result)| match level {
                HierarchyLevel::Branch(code) => self
                    .hierarchy
                    .parent_index(code)
                    .map(|index| (index, result.result.group_weights.clone())),
                HierarchyLevel::Top => None,
            })
            .collect();

        let composition: HierarchyComposition =
            compose_hierarchy(&top.result.group_weights, &sub_weights)?;
        tracing::debug!(
            complete = composition.is_complete(),
            total_weight = composition.total_weight(),
            "Hierarchy composed"
        );

        let mut rows = Vec::with_capacity(composition.leaves.len() + branches.len());
        let mut current_parent = None;
        for leaf in &composition.leaves {
            let Some(branch) = branches.get(leaf.parent) else {
                continue;
            };
            if current_parent != Some(leaf.parent) {
                current_parent = Some(leaf.parent);
                rows.push(HierarchyRow {
                    level: HierarchyLevel::Top,
                    code: branch.criterion.code.clone(),
                    name: branch.criterion.name.clone(),
                    absolute_weight: leaf.top_level_weight,
                    relative_weight: 1.0,
                });
            }
            let sub = leaf
                .child
                .and_then(|child| branch.sub_criteria.get(child))
                .zip(leaf.relative_weight);
            if let Some((criterion, relative)) = sub {
                rows.push(HierarchyRow {
                    level: HierarchyLevel::branch(branch.criterion.code.clone()),
                    code: criterion.code.clone(),
                    name: criterion.name.clone(),
                    absolute_weight: leaf.absolute_weight,
                    relative_weight: relative,
                });
            }
        }

        let incomplete_branches = composition
            .missing_branches()
            .into_iter()
            .filter_map(|index| branches.get(index))
            .map(|branch| branch.criterion.code.clone())
            .collect();

        let leaf_ranking = composition
            .ranked()
            .into_iter()
            .filter_map(|leaf| {
                let branch = branches.get(leaf.parent)?;
                match leaf.child {
                    Some(child) => branch.sub_criteria.get(child).map(|c| c.code.clone()),
                    None => Some(branch.criterion.code.clone()),
                }
            })
            .collect();

        Ok(ComposedRows {
            rows,
            incomplete_branches,
            leaf_ranking,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::InMemoryStore;
    use crate::domain::analysis_session::AnalysisSession;
    use crate::domain::criteria::EVALUATION_SYSTEM;
    use crate::domain::expert::{Expert, ExpertProfile, JudgmentRecord};
    use crate::domain::ahp::JudgmentMatrix;

    async fn seed_identity(store: &InMemoryStore, badge: &str, levels: &[HierarchyLevel]) {
        let profile = ExpertProfile::new(badge, "Expert", "Shandong University", "", "", 5).unwrap();
        let mut expert = Expert::register(profile);
        for level in levels {
            let n = EVALUATION_SYSTEM.order_of(level).unwrap();
            let record = JudgmentRecord::assess(JudgmentMatrix::identity(n).unwrap()).unwrap();
            expert.record_judgment(level.clone(), record);
        }
        ExpertRepository::register(store, &expert).await.unwrap();
    }

    async fn setup(store: &Arc<InMemoryStore>) -> (ExportResultsHandler, AnalysisSessionId) {
        let session = AnalysisSession::new("Export", None, vec![]).unwrap();
        AnalysisSessionRepository::save(store.as_ref(), &session).await.unwrap();
        let handler = ExportResultsHandler::new(
            store.clone(),
            store.clone(),
            Arc::new(EVALUATION_SYSTEM.clone()),
        );
        (handler, *session.id())
    }

    #[tokio::test]
    async fn partial_hierarchy_is_flagged() {
        let store = Arc::new(InMemoryStore::new());
        let levels = [HierarchyLevel::Top, HierarchyLevel::branch("B1")];
        seed_identity(&store, "E-1", &levels).await;
        seed_identity(&store, "E-2", &levels).await;
        let (handler, session_id) = setup(&store).await;

        let report = handler.handle(ExportResultsCommand { session_id }).await.unwrap();

        assert_eq!(report.expert_count, 2);
        assert_eq!(report.level_weights.len(), 2);
        assert_eq!(report.skipped_levels.len(), 3);
        assert_eq!(report.incomplete_branches, vec!["B2", "B3", "B4"]);
        assert_eq!(
            report.leaf_ranking,
            vec!["B2", "B3", "B4", "C11", "C12", "C13", "C14", "C15"]
        );
        // 4 top rows + 5 B1 rows
        assert_eq!(report.hierarchy_weights.len(), 9);
        assert_eq!(report.hierarchy_weights[0].code, "B1");
        assert_eq!(report.hierarchy_weights[1].code, "C11");
        assert!((report.hierarchy_weights[1].absolute_weight - 0.05).abs() < 1e-12);
        assert!((report.hierarchy_weights[1].relative_weight - 0.2).abs() < 1e-12);
    }

    #[tokio::test]
    async fn export_stores_results_in_session() {
        let store = Arc::new(InMemoryStore::new());
        let levels = EVALUATION_SYSTEM.levels();
        seed_identity(&store, "E-1", &levels).await;
        seed_identity(&store, "E-2", &levels).await;
        let (handler, session_id) = setup(&store).await;

        let report = handler.handle(ExportResultsCommand { session_id }).await.unwrap();

        assert!(report.incomplete_branches.is_empty());
        assert_eq!(report.hierarchy_weights.len(), 24);
        let leaf_total: f64 = report
            .hierarchy_weights
            .iter()
            .filter(|row| !row.level.is_top())
            .map(|row| row.absolute_weight)
            .sum();
        assert!((leaf_total - 1.0).abs() < 1e-9);

        let session = AnalysisSessionRepository::find_by_id(store.as_ref(), &session_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(session.results().len(), 5);
        assert!(session.exported_at().is_some());
    }

    #[tokio::test]
    async fn branch_results_without_top_export_no_rows() {
        let store = Arc::new(InMemoryStore::new());
        let levels = [HierarchyLevel::branch("B3")];
        seed_identity(&store, "E-1", &levels).await;
        seed_identity(&store, "E-2", &levels).await;
        let (handler, session_id) = setup(&store).await;

        let report = handler.handle(ExportResultsCommand { session_id }).await.unwrap();

        assert_eq!(report.level_weights.len(), 1);
        assert!(report.hierarchy_weights.is_empty());
    }

    #[tokio::test]
    async fn nothing_to_export_is_an_error() {
        let store = Arc::new(InMemoryStore::new());
        seed_identity(&store, "E-1", &[HierarchyLevel::Top]).await;
        let (handler, session_id) = setup(&store).await;

        let err = handler.handle(ExportResultsCommand { session_id }).await.unwrap_err();

        assert!(matches!(err, AnalysisError::NoAnalysableResults));
    }
}
