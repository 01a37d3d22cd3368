//! Judgment record - one expert's assessed matrix for one level.

use serde::{Deserialize, Serialize};

use crate::domain::ahp::{assess_matrix, AhpError, ConsistencyResult, JudgmentMatrix, WeightVector};
use crate::domain::foundation::Timestamp;

/// A judgment matrix together with its solved weights and consistency.
///
/// Immutable once created; a resubmission replaces the whole record.
/// Weights and consistency are derived again from the matrix on load, so a
/// stored record can never disagree with its own matrix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "StoredJudgment")]
pub struct JudgmentRecord {
    matrix: JudgmentMatrix,
    weights: WeightVector,
    consistency: ConsistencyResult,
    saved_at: Timestamp,
}

impl JudgmentRecord {
    /// Solves and evaluates `matrix`, stamping the record with the current time.
    pub fn assess(matrix: JudgmentMatrix) -> Result<Self, AhpError> {
        let (weights, consistency) = assess_matrix(&matrix)?;
        Ok(Self {
            matrix,
            weights,
            consistency,
            saved_at: Timestamp::now(),
        })
    }

    pub fn matrix(&self) -> &JudgmentMatrix {
        &self.matrix
    }

    pub fn weights(&self) -> &WeightVector {
        &self.weights
    }

    pub fn consistency(&self) -> &ConsistencyResult {
        &self.consistency
    }

    pub fn consistency_ratio(&self) -> f64 {
        self.consistency.cr
    }

    pub fn saved_at(&self) -> &Timestamp {
        &self.saved_at
    }

    /// True when the record may take part in group aggregation.
    pub fn is_acceptable(&self) -> bool {
        self.consistency.status.qualifies_for_aggregation()
    }
}

/// Persisted shape of a record; only the matrix and timestamp are trusted.
#[derive(Deserialize)]
struct StoredJudgment {
    matrix: JudgmentMatrix,
    saved_at: Timestamp,
}

impl TryFrom<StoredJudgment> for JudgmentRecord {
    type Error = AhpError;

    fn try_from(stored: StoredJudgment) -> Result<Self, Self::Error> {
        let (weights, consistency) = assess_matrix(&stored.matrix)?;
        Ok(Self {
            matrix: stored.matrix,
            weights,
            consistency,
            saved_at: stored.saved_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ahp::{build_judgment_matrix, ConsistencyStatus};
    use std::collections::HashMap;

    #[test]
    fn assess_identity_is_excellent() {
        let record = JudgmentRecord::assess(JudgmentMatrix::identity(4).unwrap()).unwrap();
        assert_eq!(record.consistency().status, ConsistencyStatus::Excellent);
        assert!(record.is_acceptable());
        assert!((record.weights().as_slice()[0] - 0.25).abs() < 1e-12);
    }

    #[test]
    fn assess_contradictory_matrix_is_not_acceptable() {
        let values = HashMap::from([((0, 1), 5.0), ((1, 2), 5.0), ((0, 2), 0.2)]);
        let matrix = build_judgment_matrix(&values, 3).unwrap();
        let record = JudgmentRecord::assess(matrix).unwrap();
        assert_eq!(record.consistency().status, ConsistencyStatus::Unacceptable);
        assert!(!record.is_acceptable());
    }

    #[test]
    fn load_recomputes_tampered_weights_and_consistency() {
        let values = HashMap::from([((0, 1), 5.0), ((1, 2), 5.0), ((0, 2), 0.2)]);
        let record = JudgmentRecord::assess(build_judgment_matrix(&values, 3).unwrap()).unwrap();

        let mut json = serde_json::to_value(&record).unwrap();
        json["weights"] = serde_json::json!([0.9, 0.05, 0.05]);
        json["consistency"]["cr"] = serde_json::json!(0.0);
        json["consistency"]["status"] = serde_json::json!("excellent");

        let loaded: JudgmentRecord = serde_json::from_value(json).unwrap();
        assert_eq!(loaded, record);
        assert!(!loaded.is_acceptable());
    }

    #[test]
    fn load_without_derived_fields_still_assesses() {
        let record = JudgmentRecord::assess(JudgmentMatrix::identity(3).unwrap()).unwrap();
        let json = serde_json::json!({
            "matrix": record.matrix(),
            "saved_at": record.saved_at(),
        });

        let loaded: JudgmentRecord = serde_json::from_value(json).unwrap();
        assert_eq!(loaded, record);
    }

    #[test]
    fn load_rejects_reciprocal_violation() {
        let json = serde_json::json!({
            "matrix": [[1.0, 4.0], [4.0, 1.0]],
            "saved_at": "2024-01-01T00:00:00Z",
        });
        assert!(serde_json::from_value::<JudgmentRecord>(json).is_err());
    }
}
