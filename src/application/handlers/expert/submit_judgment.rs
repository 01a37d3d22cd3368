//! SubmitJudgmentHandler - Records one expert's comparisons for one level.

use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::application::handlers::analysis::AnalysisError;
use crate::domain::ahp::{build_judgment_matrix, Intensity};
use crate::domain::criteria::{CriteriaHierarchy, Criterion, HierarchyLevel};
use crate::domain::expert::{ExpertError, JudgmentRecord};
use crate::domain::foundation::ExpertId;
use crate::ports::ExpertRepository;

/// One upper-triangle comparison: how much more important criterion `row`
/// is than criterion `col`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Comparison {
    pub row: usize,
    pub col: usize,
    pub value: f64,
}

/// Command to submit a complete set of comparisons for a level.
#[derive(Debug, Clone)]
pub struct SubmitJudgmentCommand {
    pub expert_id: ExpertId,
    pub level: String,
    pub comparisons: Vec<Comparison>,
}

/// Result of a stored submission.
#[derive(Debug, Clone)]
pub struct SubmitJudgmentResult {
    pub level: HierarchyLevel,
    pub criteria: Vec<Criterion>,
    pub record: JudgmentRecord,
    /// True when an earlier submission for the level was overwritten.
    pub replaced: bool,
}

/// Handler for judgment submission.
pub struct SubmitJudgmentHandler {
    repository: Arc<dyn ExpertRepository>,
    hierarchy: Arc<CriteriaHierarchy>,
}

impl SubmitJudgmentHandler {
    pub fn new(repository: Arc<dyn ExpertRepository>, hierarchy: Arc<CriteriaHierarchy>) -> Self {
        Self {
            repository,
            hierarchy,
        }
    }

    pub async fn handle(
        &self,
        cmd: SubmitJudgmentCommand,
    ) -> Result<SubmitJudgmentResult, AnalysisError> {
        // 1. Resolve the level and its criteria
        let level = self.hierarchy.resolve_level(&cmd.level)?;
        let criteria: Vec<Criterion> = self
            .hierarchy
            .criteria_for(&level)?
            .into_iter()
            .cloned()
            .collect();

        // 2. Input-layer checks: scale membership and uniqueness
        let pairwise_values = collect_comparisons(&cmd.comparisons)?;

        // 3. Build, solve and evaluate
        let matrix = build_judgment_matrix(&pairwise_values, criteria.len())?;
        let record = JudgmentRecord::assess(matrix)?;

        // 4. Attach to the expert and persist in one store operation
        let replaced = self
            .repository
            .record_judgment(&cmd.expert_id, level.clone(), record.clone())
            .await
            .map_err(ExpertError::from)?;

        tracing::info!(
            expert_id = %cmd.expert_id,
            level = %level,
            cr = record.consistency_ratio(),
            status = %record.consistency().status,
            replaced,
            "Judgment recorded"
        );

        Ok(SubmitJudgmentResult {
            level,
            criteria,
            record,
            replaced,
        })
    }
}

fn collect_comparisons(
    comparisons: &[Comparison],
) -> Result<HashMap<(usize, usize), f64>, AnalysisError> {
    let mut values = HashMap::with_capacity(comparisons.len());
    for c in comparisons {
        if Intensity::from_value(c.value).is_none() {
            return Err(AnalysisError::OffScale {
                row: c.row,
                col: c.col,
                value: c.value,
            });
        }
        if values.insert((c.row, c.col), c.value).is_some() {
            return Err(AnalysisError::DuplicateComparison {
                row: c.row,
                col: c.col,
            });
        }
    }
    Ok(values)
}
