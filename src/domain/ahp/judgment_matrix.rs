//! Judgment Matrix - Positive reciprocal pairwise-comparison matrix.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::ops::Index;

use super::AhpError;

/// Tolerance for reciprocity and diagonal checks on stored matrices.
pub const RECIPROCITY_TOLERANCE: f64 = 1e-6;

/// An n×n positive reciprocal matrix.
///
/// Invariants: `m[i][i] == 1`, `m[j][i] == 1 / m[i][j]`, all entries > 0.
/// Serializes as a list of rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<f64>>", into = "Vec<Vec<f64>>")]
pub struct JudgmentMatrix {
    order: usize,
    /// Row-major entries.
    entries: Vec<f64>,
}

/// Builds a reciprocal matrix from its strict upper triangle.
///
/// `pairwise_values` must contain exactly the `n(n-1)/2` keys `(i, j)` with
/// `i < j < n`. Each value becomes `m[i][j]`, its inverse `m[j][i]`.
///
/// # Errors
/// - `EmptyMatrix` when `n == 0`
/// - `UnexpectedComparison` for a key outside the upper triangle
/// - `NonPositiveValue` for a zero, negative, or non-finite value
/// - `MissingComparison` for an absent upper-triangle pair
pub fn build_judgment_matrix(
    pairwise_values: &HashMap<(usize, usize), f64>,
    n: usize,
) -> Result<JudgmentMatrix, AhpError> {
    if n == 0 {
        return Err(AhpError::EmptyMatrix);
    }

    // Sorted so the reported pair does not depend on hash order.
    let mut supplied: Vec<(&(usize, usize), &f64)> = pairwise_values.iter().collect();
    supplied.sort_by_key(|(key, _)| **key);

    for (&(row, col), &value) in supplied {
        if row >= col || col >= n {
            return Err(AhpError::UnexpectedComparison { row, col, order: n });
        }
        if !value.is_finite() || value <= 0.0 {
            return Err(AhpError::NonPositiveValue { row, col, value });
        }
    }

    let mut matrix = JudgmentMatrix::identity(n)?;
    for row in 0..n {
        for col in (row + 1)..n {
            let value = *pairwise_values
                .get(&(row, col))
                .ok_or(AhpError::MissingComparison { row, col })?;
            matrix.set_pair(row, col, value);
        }
    }

    Ok(matrix)
}

impl JudgmentMatrix {
    /// Creates the order-n matrix with every entry equal to 1.
    pub fn identity(n: usize) -> Result<Self, AhpError> {
        if n == 0 {
            return Err(AhpError::EmptyMatrix);
        }
        Ok(Self {
            order: n,
            entries: vec![1.0; n * n],
        })
    }

    /// Loads a full matrix, checking every invariant.
    ///
    /// Used for persisted judgment records; reciprocity and the unit diagonal
    /// are checked within [`RECIPROCITY_TOLERANCE`].
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self, AhpError> {
        let n = rows.len();
        if n == 0 {
            return Err(AhpError::EmptyMatrix);
        }

        let mut entries = Vec::with_capacity(n * n);
        for (row, values) in rows.iter().enumerate() {
            if values.len() != n {
                return Err(AhpError::NotSquare {
                    row,
                    expected: n,
                    actual: values.len(),
                });
            }
            for (col, &value) in values.iter().enumerate() {
                if !value.is_finite() || value <= 0.0 {
                    return Err(AhpError::NonPositiveValue { row, col, value });
                }
            }
            entries.extend_from_slice(values);
        }

        let matrix = Self { order: n, entries };
        matrix.check_reciprocal()?;
        Ok(matrix)
    }

    fn check_reciprocal(&self) -> Result<(), AhpError> {
        for i in 0..self.order {
            let diagonal = self[(i, i)];
            if (diagonal - 1.0).abs() > RECIPROCITY_TOLERANCE {
                return Err(AhpError::InvalidDiagonal {
                    index: i,
                    value: diagonal,
                });
            }
            for j in (i + 1)..self.order {
                let upper = self[(i, j)];
                let lower = self[(j, i)];
                if (upper * lower - 1.0).abs() > RECIPROCITY_TOLERANCE {
                    return Err(AhpError::NotReciprocal {
                        row: i,
                        col: j,
                        upper,
                        lower,
                    });
                }
            }
        }
        Ok(())
    }

    fn set_pair(&mut self, row: usize, col: usize, value: f64) {
        let n = self.order;
        self.entries[row * n + col] = value;
        self.entries[col * n + row] = 1.0 / value;
    }

    /// Returns the matrix order n.
    pub fn order(&self) -> usize {
        self.order
    }

    /// Returns the entry at (row, col), or None when out of range.
    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        if row < self.order && col < self.order {
            Some(self.entries[row * self.order + col])
        } else {
            None
        }
    }

    /// Iterates over the rows as slices.
    pub fn rows(&self) -> impl Iterator<Item = &[f64]> {
        self.entries.chunks(self.order)
    }

    /// Returns the strict upper triangle as `((row, col), value)` pairs.
    pub fn upper_triangle(&self) -> Vec<((usize, usize), f64)> {
        let mut pairs = Vec::with_capacity(self.order * (self.order - 1) / 2);
        for row in 0..self.order {
            for col in (row + 1)..self.order {
                pairs.push(((row, col), self[(row, col)]));
            }
        }
        pairs
    }

    /// Copies the matrix into a list of rows.
    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        self.rows().map(|row| row.to_vec()).collect()
    }
}

impl Index<(usize, usize)> for JudgmentMatrix {
    type Output = f64;

    fn index(&self, (row, col): (usize, usize)) -> &f64 {
        assert!(
            row < self.order && col < self.order,
            "index ({}, {}) out of range for order {}",
            row,
            col,
            self.order
        );
        &self.entries[row * self.order + col]
    }
}

impl TryFrom<Vec<Vec<f64>>> for JudgmentMatrix {
    type Error = AhpError;

    fn try_from(rows: Vec<Vec<f64>>) -> Result<Self, Self::Error> {
        Self::from_rows(rows)
    }
}

impl From<JudgmentMatrix> for Vec<Vec<f64>> {
    fn from(matrix: JudgmentMatrix) -> Self {
        matrix.to_rows()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn upper(values: &[((usize, usize), f64)]) -> HashMap<(usize, usize), f64> {
        values.iter().copied().collect()
    }

    fn worked_example() -> HashMap<(usize, usize), f64> {
        upper(&[
            ((0, 1), 3.0),
            ((0, 2), 5.0),
            ((0, 3), 2.0),
            ((1, 2), 2.0),
            ((1, 3), 0.5),
            ((2, 3), 0.25),
        ])
    }

    #[test]
    fn builds_reciprocal_entries_below_diagonal() {
        let matrix = build_judgment_matrix(&worked_example(), 4).unwrap();

        assert_eq!(matrix.order(), 4);
        assert_eq!(matrix[(0, 1)], 3.0);
        assert!((matrix[(1, 0)] - 1.0 / 3.0).abs() < 1e-12);
        assert_eq!(matrix[(3, 2)], 4.0);
        for i in 0..4 {
            assert_eq!(matrix[(i, i)], 1.0);
        }
    }

    #[test]
    fn single_criterion_needs_no_comparisons() {
        let matrix = build_judgment_matrix(&HashMap::new(), 1).unwrap();
        assert_eq!(matrix.to_rows(), vec![vec![1.0]]);
    }

    #[test]
    fn zero_order_is_rejected() {
        let err = build_judgment_matrix(&HashMap::new(), 0).unwrap_err();
        assert_eq!(err, AhpError::EmptyMatrix);
    }

    #[test]
    fn missing_pair_is_reported() {
        let mut values = worked_example();
        values.remove(&(1, 3));

        let err = build_judgment_matrix(&values, 4).unwrap_err();
        assert_eq!(err, AhpError::MissingComparison { row: 1, col: 3 });
    }

    #[test]
    fn non_positive_value_is_reported_with_pair() {
        let mut values = worked_example();
        values.insert((0, 2), 0.0);

        let err = build_judgment_matrix(&values, 4).unwrap_err();
        assert_eq!(err.index_pair(), Some((0, 2)));
    }

    #[test]
    fn nan_value_is_rejected() {
        let values = upper(&[((0, 1), f64::NAN)]);
        let err = build_judgment_matrix(&values, 2).unwrap_err();
        assert!(matches!(err, AhpError::NonPositiveValue { row: 0, col: 1, .. }));
    }

    #[test]
    fn lower_triangle_key_is_rejected() {
        let mut values = worked_example();
        values.insert((2, 1), 2.0);

        let err = build_judgment_matrix(&values, 4).unwrap_err();
        assert_eq!(
            err,
            AhpError::UnexpectedComparison {
                row: 2,
                col: 1,
                order: 4
            }
        );
    }

    #[test]
    fn out_of_range_key_is_rejected() {
        let mut values = worked_example();
        values.insert((1, 4), 2.0);

        let err = build_judgment_matrix(&values, 4).unwrap_err();
        assert_eq!(err.index_pair(), Some((1, 4)));
    }

    #[test]
    fn from_rows_accepts_valid_matrix() {
        let built = build_judgment_matrix(&worked_example(), 4).unwrap();
        let loaded = JudgmentMatrix::from_rows(built.to_rows()).unwrap();
        assert_eq!(loaded, built);
    }

    #[test]
    fn from_rows_rejects_ragged_rows() {
        let err = JudgmentMatrix::from_rows(vec![vec![1.0, 2.0], vec![0.5]]).unwrap_err();
        assert_eq!(
            err,
            AhpError::NotSquare {
                row: 1,
                expected: 2,
                actual: 1
            }
        );
    }

    #[test]
    fn from_rows_rejects_non_reciprocal_pair() {
        let err = JudgmentMatrix::from_rows(vec![vec![1.0, 2.0], vec![2.0, 1.0]]).unwrap_err();
        assert_eq!(err.index_pair(), Some((0, 1)));
    }

    #[test]
    fn from_rows_rejects_bad_diagonal() {
        let err = JudgmentMatrix::from_rows(vec![vec![2.0, 2.0], vec![0.5, 1.0]]).unwrap_err();
        assert_eq!(err, AhpError::InvalidDiagonal { index: 0, value: 2.0 });
    }

    #[test]
    fn get_is_bounds_checked() {
        let matrix = JudgmentMatrix::identity(3).unwrap();
        assert_eq!(matrix.get(2, 2), Some(1.0));
        assert!(matrix.get(3, 0).is_none());
    }

    #[test]
    fn upper_triangle_lists_independent_pairs() {
        let matrix = build_judgment_matrix(&worked_example(), 4).unwrap();
        let pairs = matrix.upper_triangle();
        assert_eq!(pairs.len(), 6);
        assert_eq!(pairs[0], ((0, 1), 3.0));
        assert_eq!(pairs[5], ((2, 3), 0.25));
    }

    #[test]
    fn matrix_serializes_as_rows() {
        let matrix = build_judgment_matrix(&upper(&[((0, 1), 4.0)]), 2).unwrap();
        let json = serde_json::to_string(&matrix).unwrap();
        assert_eq!(json, "[[1.0,4.0],[0.25,1.0]]");

        let parsed: JudgmentMatrix = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, matrix);
    }

    #[test]
    fn deserializing_invalid_matrix_fails() {
        let result: Result<JudgmentMatrix, _> = serde_json::from_str("[[1.0,4.0],[4.0,1.0]]");
        assert!(result.is_err());
    }

    proptest! {
        #[test]
        fn constructed_matrices_are_reciprocal(
            n in 1usize..9,
            raw in proptest::collection::vec(0.05f64..20.0, 36),
        ) {
            let mut values = HashMap::new();
            let mut next = raw.iter();
            for i in 0..n {
                for j in (i + 1)..n {
                    values.insert((i, j), *next.next().unwrap());
                }
            }

            let matrix = build_judgment_matrix(&values, n).unwrap();
            for i in 0..n {
                prop_assert_eq!(matrix[(i, i)], 1.0);
                for j in 0..n {
                    prop_assert!((matrix[(i, j)] * matrix[(j, i)] - 1.0).abs() < 1e-9);
                }
            }
        }
    }
}
