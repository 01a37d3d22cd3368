//! Group Aggregator - Consensus weights across a panel of experts.
//!
//! Only experts whose judgments are excellent or acceptable (CR < 0.20)
//! participate. Group weights are the renormalized geometric mean of the
//! individual vectors, computed in log space.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

use super::weight_solver::CR_ACCEPTABLE_THRESHOLD;
use super::{AhpError, WeightVector};

/// Minimum number of qualifying experts for a group result.
pub const MIN_GROUP_SIZE: usize = 2;

/// Correlation above which agreement is high.
pub const HIGH_CONSENSUS_THRESHOLD: f64 = 0.8;

/// Correlation above which agreement is moderate.
pub const MODERATE_CONSENSUS_THRESHOLD: f64 = 0.6;

/// Below this, a vector's sum of squared deviations counts as zero variance.
const ZERO_VARIANCE: f64 = 1e-24;

/// One expert's solved priorities and consistency ratio for a level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpertWeights {
    pub weights: WeightVector,
    pub consistency_ratio: f64,
}

impl ExpertWeights {
    pub fn new(weights: WeightVector, consistency_ratio: f64) -> Self {
        Self {
            weights,
            consistency_ratio,
        }
    }
}

/// Reporting band for a correlation coefficient. Never used for gating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConsensusLevel {
    High,
    Moderate,
    Low,
}

impl ConsensusLevel {
    pub fn from_correlation(correlation: f64) -> Self {
        if correlation > HIGH_CONSENSUS_THRESHOLD {
            ConsensusLevel::High
        } else if correlation > MODERATE_CONSENSUS_THRESHOLD {
            ConsensusLevel::Moderate
        } else {
            ConsensusLevel::Low
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ConsensusLevel::High => "High",
            ConsensusLevel::Moderate => "Moderate",
            ConsensusLevel::Low => "Low",
        }
    }
}

impl fmt::Display for ConsensusLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Pearson correlation between two participants' weight vectors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PairwiseAgreement<K> {
    pub first: K,
    pub second: K,
    pub correlation: f64,
    pub level: ConsensusLevel,
}

/// Smallest and largest individual weight given to one criterion.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OpinionRange {
    pub min: f64,
    pub max: f64,
}

/// An expert left out of the group because CR >= 0.20.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExcludedExpert<K> {
    pub expert: K,
    pub consistency_ratio: f64,
}

/// Aggregated weights and agreement statistics for one hierarchy level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupWeightResult<K> {
    pub group_weights: WeightVector,
    /// Population standard deviation of individual weights, per criterion.
    pub per_criterion_std_dev: Vec<f64>,
    /// `std_dev / group_weight`, per criterion.
    pub per_criterion_cv: Vec<f64>,
    pub opinion_ranges: Vec<OpinionRange>,
    pub expert_count: usize,
    pub average_cr: f64,
    pub mean_pairwise_correlation: f64,
    pub consensus: ConsensusLevel,
    /// `1 - mean(cv)`.
    pub weight_stability: f64,
    /// Participating experts, sorted.
    pub participants: Vec<K>,
    pub excluded: Vec<ExcludedExpert<K>>,
    pub pairwise_agreement: Vec<PairwiseAgreement<K>>,
}

/// Outcome of a group aggregation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum GroupAggregation<K> {
    Computed(GroupWeightResult<K>),
    /// Fewer than [`MIN_GROUP_SIZE`] experts qualified. Not an error.
    InsufficientData { submitted: usize, qualifying: usize },
}

impl<K> GroupAggregation<K> {
    /// Returns the computed result, if any.
    pub fn computed(&self) -> Option<&GroupWeightResult<K>> {
        match self {
            GroupAggregation::Computed(result) => Some(result),
            GroupAggregation::InsufficientData { .. } => None,
        }
    }

    pub fn into_computed(self) -> Option<GroupWeightResult<K>> {
        match self {
            GroupAggregation::Computed(result) => Some(result),
            GroupAggregation::InsufficientData { .. } => None,
        }
    }
}

/// Aggregates expert judgments for one level into group weights.
///
/// Participants are processed in key order, so the result does not depend
/// on the iteration order of `judgments`.
///
/// # Errors
/// - `InvalidConsistencyRatio` if any CR is negative or non-finite
/// - `DimensionMismatch` if participating vectors differ in length
/// - `NonPositiveWeight` if a participating weight is zero (log undefined)
pub fn aggregate_group<K>(
    judgments: &HashMap<K, ExpertWeights>,
) -> Result<GroupAggregation<K>, AhpError>
where
    K: Ord + Hash + Clone,
{
    let mut entries: Vec<(&K, &ExpertWeights)> = judgments.iter().collect();
    entries.sort_by(|a, b| a.0.cmp(b.0));

    for (_, judgment) in &entries {
        let cr = judgment.consistency_ratio;
        if !cr.is_finite() || cr < 0.0 {
            return Err(AhpError::InvalidConsistencyRatio { value: cr });
        }
    }

    let (participants, rejected): (Vec<_>, Vec<_>) = entries
        .into_iter()
        .partition(|(_, judgment)| judgment.consistency_ratio < CR_ACCEPTABLE_THRESHOLD);

    if participants.len() < MIN_GROUP_SIZE {
        return Ok(GroupAggregation::InsufficientData {
            submitted: judgments.len(),
            qualifying: participants.len(),
        });
    }

    let n = participants[0].1.weights.len();
    for (_, judgment) in &participants {
        if judgment.weights.len() != n {
            return Err(AhpError::DimensionMismatch {
                expected: n,
                actual: judgment.weights.len(),
            });
        }
        for (index, value) in judgment.weights.iter().enumerate() {
            if value <= 0.0 {
                return Err(AhpError::NonPositiveWeight { index, value });
            }
        }
    }

    let vectors: Vec<&[f64]> = participants
        .iter()
        .map(|(_, judgment)| judgment.weights.as_slice())
        .collect();
    let count = vectors.len() as f64;

    let log_means: Vec<f64> = (0..n)
        .map(|i| (vectors.iter().map(|v| v[i].ln()).sum::<f64>() / count).exp())
        .collect();
    let group_weights = WeightVector::normalize(log_means);

    let mut per_criterion_std_dev = Vec::with_capacity(n);
    let mut per_criterion_cv = Vec::with_capacity(n);
    let mut opinion_ranges = Vec::with_capacity(n);
    for (i, group_weight) in group_weights.iter().enumerate() {
        let column: Vec<f64> = vectors.iter().map(|v| v[i]).collect();
        let std_dev = population_std_dev(&column);
        per_criterion_std_dev.push(std_dev);
        per_criterion_cv.push(std_dev / group_weight);
        opinion_ranges.push(OpinionRange {
            min: column.iter().copied().fold(f64::INFINITY, f64::min),
            max: column.iter().copied().fold(f64::NEG_INFINITY, f64::max),
        });
    }

    let mut pairwise_agreement = Vec::new();
    for a in 0..participants.len() {
        for b in (a + 1)..participants.len() {
            let correlation = pearson_correlation(vectors[a], vectors[b]);
            pairwise_agreement.push(PairwiseAgreement {
                first: participants[a].0.clone(),
                second: participants[b].0.clone(),
                correlation,
                level: ConsensusLevel::from_correlation(correlation),
            });
        }
    }
    let mean_pairwise_correlation = pairwise_agreement
        .iter()
        .map(|pair| pair.correlation)
        .sum::<f64>()
        / pairwise_agreement.len() as f64;

    let average_cr = participants
        .iter()
        .map(|(_, judgment)| judgment.consistency_ratio)
        .sum::<f64>()
        / count;
    let weight_stability = 1.0 - per_criterion_cv.iter().sum::<f64>() / n as f64;

    Ok(GroupAggregation::Computed(GroupWeightResult {
        group_weights,
        per_criterion_std_dev,
        per_criterion_cv,
        opinion_ranges,
        expert_count: participants.len(),
        average_cr,
        mean_pairwise_correlation,
        consensus: ConsensusLevel::from_correlation(mean_pairwise_correlation),
        weight_stability,
        participants: participants.iter().map(|(key, _)| (*key).clone()).collect(),
        excluded: rejected
            .into_iter()
            .map(|(key, judgment)| ExcludedExpert {
                expert: key.clone(),
                consistency_ratio: judgment.consistency_ratio,
            })
            .collect(),
        pairwise_agreement,
    }))
}

fn population_std_dev(values: &[f64]) -> f64 {
    let count = values.len() as f64;
    let mean = values.iter().sum::<f64>() / count;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / count;
    variance.sqrt()
}

/// Pearson correlation of two equal-length vectors.
///
/// Two constant vectors correlate at 1.0; one constant vector against a
/// varying one gives 0.0.
fn pearson_correlation(a: &[f64], b: &[f64]) -> f64 {
    let count = a.len() as f64;
    let mean_a = a.iter().sum::<f64>() / count;
    let mean_b = b.iter().sum::<f64>() / count;

    let mut covariance = 0.0;
    let mut spread_a = 0.0;
    let mut spread_b = 0.0;
    for (x, y) in a.iter().zip(b) {
        let dx = x - mean_a;
        let dy = y - mean_b;
        covariance += dx * dy;
        spread_a += dx * dx;
        spread_b += dy * dy;
    }

    match (spread_a < ZERO_VARIANCE, spread_b < ZERO_VARIANCE) {
        (true, true) => 1.0,
        (true, false) | (false, true) => 0.0,
        (false, false) => covariance / (spread_a * spread_b).sqrt(),
    }
}
