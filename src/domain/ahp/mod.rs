//! AHP Module - Pure computation core of the Analytic Hierarchy Process.
//!
//! Stateless functions over immutable values. No I/O, no logging, no
//! ambient state; every input arrives as a parameter.
//!
//! # Components
//!
//! - `scale` - The 1/5..5 intensity scale with labels and reciprocals
//! - `consistency_baseline` - Random consistency index RI(n)
//! - `judgment_matrix` - Reciprocal matrix construction and validation
//! - `weight_solver` - Geometric-mean priorities and consistency ratio
//! - `group_aggregator` - Log-space consensus across experts
//! - `hierarchy_composer` - Global weights for the two-level tree

pub mod consistency_baseline;
mod errors;
mod group_aggregator;
mod hierarchy_composer;
mod judgment_matrix;
mod scale;
mod weight_solver;

pub use consistency_baseline::{random_index, RANDOM_INDEX, RANDOM_INDEX_FALLBACK};
pub use errors::AhpError;
pub use group_aggregator::{
    aggregate_group, ConsensusLevel, ExcludedExpert, ExpertWeights, GroupAggregation,
    GroupWeightResult, OpinionRange, PairwiseAgreement, HIGH_CONSENSUS_THRESHOLD,
    MIN_GROUP_SIZE, MODERATE_CONSENSUS_THRESHOLD,
};
pub use hierarchy_composer::{compose_hierarchy, ComposedWeight, HierarchyComposition};
pub use judgment_matrix::{build_judgment_matrix, JudgmentMatrix, RECIPROCITY_TOLERANCE};
pub use scale::{Intensity, AHP_SCALE};
pub use weight_solver::{
    assess_matrix, evaluate_consistency, solve_weights, ConsistencyResult, ConsistencyStatus,
    WeightVector, CR_ACCEPTABLE_THRESHOLD, CR_EXCELLENT_THRESHOLD, WEIGHT_SUM_TOLERANCE,
};
