//! Error types for the AHP computation core.

use thiserror::Error;

/// Malformed input detected by matrix construction, solving, aggregation or
/// composition. Raised at the point of detection, never deferred.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AhpError {
    #[error("Matrix order must be at least 1")]
    EmptyMatrix,

    #[error("Comparison ({row}, {col}) must have a positive finite value, got {value}")]
    NonPositiveValue { row: usize, col: usize, value: f64 },

    #[error("Comparison ({row}, {col}) is missing")]
    MissingComparison { row: usize, col: usize },

    #[error("Comparison ({row}, {col}) is not an upper-triangle pair of an order-{order} matrix")]
    UnexpectedComparison { row: usize, col: usize, order: usize },

    #[error("Row {row} has {actual} entries, expected {expected}")]
    NotSquare {
        row: usize,
        expected: usize,
        actual: usize,
    },

    #[error("Diagonal entry ({index}, {index}) must be 1, got {value}")]
    InvalidDiagonal { index: usize, value: f64 },

    #[error("Entries ({row}, {col}) and ({col}, {row}) are not reciprocal: {upper} * {lower} != 1")]
    NotReciprocal {
        row: usize,
        col: usize,
        upper: f64,
        lower: f64,
    },

    #[error("Expected a vector of length {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("Weight vector must not be empty")]
    EmptyWeights,

    #[error("Weight at index {index} must be finite and non-negative, got {value}")]
    InvalidWeight { index: usize, value: f64 },

    #[error("Weight at index {index} must be positive and finite, got {value}")]
    NonPositiveWeight { index: usize, value: f64 },

    #[error("Weights must sum to 1, got {sum}")]
    NotNormalized { sum: f64 },

    #[error("Consistency ratio must be finite and non-negative, got {value}")]
    InvalidConsistencyRatio { value: f64 },

    #[error("Sub-level weights given for parent index {parent}, but only {top_count} top-level criteria exist")]
    UnknownParent { parent: usize, top_count: usize },
}

impl AhpError {
    /// Returns the offending index pair, if the error concerns one.
    pub fn index_pair(&self) -> Option<(usize, usize)> {
        match self {
            AhpError::NonPositiveValue { row, col, .. }
            | AhpError::MissingComparison { row, col }
            | AhpError::UnexpectedComparison { row, col, .. }
            | AhpError::NotReciprocal { row, col, .. } => Some((*row, *col)),
            AhpError::InvalidDiagonal { index, .. } => Some((*index, *index)),
            _ => None,
        }
    }
}
