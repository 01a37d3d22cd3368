//! Criteria Module - The fixed two-level criteria tree.
//!
//! Static configuration data consumed by the application layer to label
//! weight vectors and to size judgment matrices per level.

mod criterion;
mod hierarchy;

pub use criterion::{Criterion, HierarchyLevel, TOP_LEVEL_KEY};
pub use hierarchy::{CriteriaBranch, CriteriaHierarchy, EVALUATION_SYSTEM};

use thiserror::Error;

/// Errors raised when resolving levels or building a hierarchy.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CriteriaError {
    #[error("Level key cannot be empty")]
    EmptyLevelKey,

    #[error("Unknown hierarchy level: {0}")]
    UnknownLevel(String),

    #[error("Duplicate criterion code: {0}")]
    DuplicateCode(String),

    #[error("Criterion {0} has no sub-criteria")]
    EmptyBranch(String),

    #[error("Hierarchy has no criteria")]
    EmptyHierarchy,
}
