//! Group analysis result for one hierarchy level.

use serde::{Deserialize, Serialize};

use crate::domain::ahp::GroupWeightResult;
use crate::domain::criteria::{Criterion, HierarchyLevel};
use crate::domain::foundation::{ExpertId, Timestamp};

/// Group weights for one level, labelled with the compared criteria.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelResult {
    pub level: HierarchyLevel,
    /// Index-aligned with `result.group_weights`.
    pub criteria: Vec<Criterion>,
    pub result: GroupWeightResult<ExpertId>,
    pub analyzed_at: Timestamp,
}

impl LevelResult {
    pub fn new(
        level: HierarchyLevel,
        criteria: Vec<Criterion>,
        result: GroupWeightResult<ExpertId>,
    ) -> Self {
        Self {
            level,
            criteria,
            result,
            analyzed_at: Timestamp::now(),
        }
    }

    /// Pairs each criterion with its group weight.
    pub fn labelled_weights(&self) -> impl Iterator<Item = (&Criterion, f64)> {
        self.criteria.iter().zip(self.result.group_weights.iter())
    }
}
