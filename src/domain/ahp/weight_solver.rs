//! Weight Solver - Geometric-mean priorities and consistency ratio.
//!
//! Priorities come from the row geometric means of the judgment matrix.
//! λmax is estimated from those same priorities rather than from an exact
//! eigensolver; the CR thresholds below are calibrated against this estimate.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::consistency_baseline::random_index;
use super::{AhpError, JudgmentMatrix};

/// CR below this is excellent.
pub const CR_EXCELLENT_THRESHOLD: f64 = 0.10;

/// CR below this is acceptable; at or above it the matrix is unacceptable.
pub const CR_ACCEPTABLE_THRESHOLD: f64 = 0.20;

/// Tolerance on the sum of a stored weight vector.
pub const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

/// Normalized priority vector, index-aligned with the compared criteria.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<f64>", into = "Vec<f64>")]
pub struct WeightVector(Vec<f64>);

impl WeightVector {
    /// Creates a weight vector, checking that entries are finite,
    /// non-negative, and sum to 1 within [`WEIGHT_SUM_TOLERANCE`].
    pub fn new(weights: Vec<f64>) -> Result<Self, AhpError> {
        if weights.is_empty() {
            return Err(AhpError::EmptyWeights);
        }
        for (index, &value) in weights.iter().enumerate() {
            if !value.is_finite() || value < 0.0 {
                return Err(AhpError::InvalidWeight { index, value });
            }
        }
        let sum: f64 = weights.iter().sum();
        if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(AhpError::NotNormalized { sum });
        }
        Ok(Self(weights))
    }

    /// Divides every entry by the total. Caller guarantees positive entries.
    pub(crate) fn normalize(raw: Vec<f64>) -> Self {
        let total: f64 = raw.iter().sum();
        Self(raw.into_iter().map(|value| value / total).collect())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<f64> {
        self.0.get(index).copied()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.0.iter().copied()
    }

    /// Returns indices ordered by descending weight; ties keep index order.
    pub fn ranking(&self) -> Vec<usize> {
        let mut indices: Vec<usize> = (0..self.0.len()).collect();
        indices.sort_by(|&a, &b| self.0[b].total_cmp(&self.0[a]));
        indices
    }
}

impl TryFrom<Vec<f64>> for WeightVector {
    type Error = AhpError;

    fn try_from(weights: Vec<f64>) -> Result<Self, Self::Error> {
        Self::new(weights)
    }
}

impl From<WeightVector> for Vec<f64> {
    fn from(weights: WeightVector) -> Self {
        weights.0
    }
}

/// Reliability band of a consistency ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConsistencyStatus {
    Excellent,
    Acceptable,
    Unacceptable,
}

impl ConsistencyStatus {
    /// Classifies a consistency ratio.
    pub fn from_ratio(cr: f64) -> Self {
        if cr < CR_EXCELLENT_THRESHOLD {
            ConsistencyStatus::Excellent
        } else if cr < CR_ACCEPTABLE_THRESHOLD {
            ConsistencyStatus::Acceptable
        } else {
            ConsistencyStatus::Unacceptable
        }
    }

    /// Returns true if judgments with this status may join a group analysis.
    pub fn qualifies_for_aggregation(&self) -> bool {
        !matches!(self, ConsistencyStatus::Unacceptable)
    }

    pub fn label(&self) -> &'static str {
        match self {
            ConsistencyStatus::Excellent => "Excellent",
            ConsistencyStatus::Acceptable => "Acceptable",
            ConsistencyStatus::Unacceptable => "Unacceptable",
        }
    }
}

impl fmt::Display for ConsistencyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Consistency evaluation of one judgment matrix.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConsistencyResult {
    pub lambda_max: f64,
    pub ci: f64,
    pub ri: f64,
    pub cr: f64,
    pub status: ConsistencyStatus,
}

/// Computes the priority vector by the geometric-mean (row product) method.
///
/// # Algorithm
/// `g[i] = (Π_j m[i][j])^(1/n)`, then `w[i] = g[i] / Σ g`.
///
/// The row product is taken in log space and shifted by the largest log
/// mean before exponentiating, so it cannot overflow for any order.
pub fn solve_weights(matrix: &JudgmentMatrix) -> WeightVector {
    let n = matrix.order() as f64;
    let log_means: Vec<f64> = matrix
        .rows()
        .map(|row| row.iter().map(|value| value.ln()).sum::<f64>() / n)
        .collect();
    let shift = log_means
        .iter()
        .copied()
        .fold(f64::NEG_INFINITY, f64::max);
    WeightVector::normalize(
        log_means
            .into_iter()
            .map(|log_mean| (log_mean - shift).exp())
            .collect(),
    )
}

/// Computes λmax, CI, RI and CR for a matrix and its priority vector.
///
/// High CR is reported through `status`, never as an error; rejecting
/// unacceptable matrices is the caller's policy.
///
/// # Errors
/// - `DimensionMismatch` if the vector length differs from the matrix order
/// - `NonPositiveWeight` if any weight is zero, negative or non-finite
pub fn evaluate_consistency(
    matrix: &JudgmentMatrix,
    weights: &WeightVector,
) -> Result<ConsistencyResult, AhpError> {
    let n = matrix.order();
    if weights.len() != n {
        return Err(AhpError::DimensionMismatch {
            expected: n,
            actual: weights.len(),
        });
    }
    for (index, value) in weights.iter().enumerate() {
        if !value.is_finite() || value <= 0.0 {
            return Err(AhpError::NonPositiveWeight { index, value });
        }
    }

    let w = weights.as_slice();
    let ratio_sum: f64 = matrix
        .rows()
        .zip(w)
        .map(|(row, &wi)| {
            let weighted: f64 = row.iter().zip(w).map(|(m, wj)| m * wj).sum();
            weighted / wi
        })
        .sum();
    let lambda_max = ratio_sum / n as f64;

    let ci = if n > 1 {
        (lambda_max - n as f64) / (n as f64 - 1.0)
    } else {
        0.0
    };
    let ri = random_index(n);
    let cr = if ri > 0.0 { ci / ri } else { 0.0 };

    Ok(ConsistencyResult {
        lambda_max,
        ci,
        ri,
        cr,
        status: ConsistencyStatus::from_ratio(cr),
    })
}

/// Solves the weights of a matrix and evaluates their consistency.
pub fn assess_matrix(
    matrix: &JudgmentMatrix,
) -> Result<(WeightVector, ConsistencyResult), AhpError> {
    let weights = solve_weights(matrix);
    let consistency = evaluate_consistency(matrix, &weights)?;
    Ok((weights, consistency))
}
