//! Hierarchy Composer - Global weights for a two-level criteria tree.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::{AhpError, WeightVector};

/// Absolute weight of one leaf of the composed hierarchy.
///
/// When a branch has no sub-level result the top-level criterion itself is
/// the leaf: `child` is `None` and `sub_decomposition_complete` is false.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ComposedWeight {
    pub parent: usize,
    pub child: Option<usize>,
    pub top_level_weight: f64,
    /// Weight within the branch; `None` for an undecomposed branch.
    pub relative_weight: Option<f64>,
    pub absolute_weight: f64,
    pub sub_decomposition_complete: bool,
}

/// All leaves of a composed hierarchy, ordered by parent then child.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HierarchyComposition {
    pub leaves: Vec<ComposedWeight>,
}

impl HierarchyComposition {
    /// Sum of all leaf absolute weights.
    pub fn total_weight(&self) -> f64 {
        self.leaves.iter().map(|leaf| leaf.absolute_weight).sum()
    }

    /// Returns true if every branch was decomposed.
    pub fn is_complete(&self) -> bool {
        self.leaves.iter().all(|leaf| leaf.sub_decomposition_complete)
    }

    /// Parent indices whose sub-level weights were missing.
    pub fn missing_branches(&self) -> Vec<usize> {
        self.leaves
            .iter()
            .filter(|leaf| !leaf.sub_decomposition_complete)
            .map(|leaf| leaf.parent)
            .collect()
    }

    /// Leaves sorted by descending absolute weight.
    pub fn ranked(&self) -> Vec<&ComposedWeight> {
        let mut ranked: Vec<&ComposedWeight> = self.leaves.iter().collect();
        ranked.sort_by(|a, b| b.absolute_weight.total_cmp(&a.absolute_weight));
        ranked
    }
}

/// Multiplies top-level weights into each branch's sub-level weights.
///
/// Branches absent from `sub_weights_by_parent` are reported with their
/// top-level weight and flagged incomplete; no uniform split is assumed.
///
/// # Errors
/// - `UnknownParent` if a key is not a valid top-level index
pub fn compose_hierarchy(
    top_weights: &WeightVector,
    sub_weights_by_parent: &HashMap<usize, WeightVector>,
) -> Result<HierarchyComposition, AhpError> {
    let top_count = top_weights.len();
    let mut parents: Vec<usize> = sub_weights_by_parent.keys().copied().collect();
    parents.sort_unstable();
    if let Some(&parent) = parents.iter().find(|&&parent| parent >= top_count) {
        return Err(AhpError::UnknownParent { parent, top_count });
    }

    let mut leaves = Vec::new();
    for (parent, top_level_weight) in top_weights.iter().enumerate() {
        match sub_weights_by_parent.get(&parent) {
            Some(sub_weights) => {
                for (child, relative_weight) in sub_weights.iter().enumerate() {
                    leaves.push(ComposedWeight {
                        parent,
                        child: Some(child),
                        top_level_weight,
                        relative_weight: Some(relative_weight),
                        absolute_weight: top_level_weight * relative_weight,
                        sub_decomposition_complete: true,
                    });
                }
            }
            None => leaves.push(ComposedWeight {
                parent,
                child: None,
                top_level_weight,
                relative_weight: None,
                absolute_weight: top_level_weight,
                sub_decomposition_complete: false,
            }),
        }
    }

    Ok(HierarchyComposition { leaves })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn weights(values: &[f64]) -> WeightVector {
        WeightVector::new(values.to_vec()).unwrap()
    }

    #[test]
    fn absolute_weight_is_product_of_levels() {
        let top = weights(&[0.6, 0.4]);
        let subs: HashMap<usize, WeightVector> = [
            (0, weights(&[0.5, 0.5])),
            (1, weights(&[0.25, 0.75])),
        ]
        .into_iter()
        .collect();

        let composition = compose_hierarchy(&top, &subs).unwrap();

        assert_eq!(composition.leaves.len(), 4);
        assert!((composition.leaves[0].absolute_weight - 0.3).abs() < 1e-12);
        assert!((composition.leaves[3].absolute_weight - 0.3).abs() < 1e-12);
        assert_eq!(composition.leaves[2].child, Some(0));
        assert!(composition.is_complete());
        assert!((composition.total_weight() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn missing_branch_keeps_top_level_weight_and_is_flagged() {
        let top = weights(&[0.7, 0.3]);
        let subs: HashMap<usize, WeightVector> =
            [(0, weights(&[0.2, 0.8]))].into_iter().collect();

        let composition = compose_hierarchy(&top, &subs).unwrap();

        let undecomposed = composition.leaves.last().unwrap();
        assert_eq!(undecomposed.parent, 1);
        assert_eq!(undecomposed.child, None);
        assert_eq!(undecomposed.relative_weight, None);
        assert_eq!(undecomposed.absolute_weight, 0.3);
        assert!(!undecomposed.sub_decomposition_complete);
        assert_eq!(composition.missing_branches(), vec![1]);
        assert!(!composition.is_complete());
    }

    #[test]
    fn unknown_parent_is_rejected() {
        let top = weights(&[0.5, 0.5]);
        let subs: HashMap<usize, WeightVector> =
            [(2, weights(&[1.0]))].into_iter().collect();

        let err = compose_hierarchy(&top, &subs).unwrap_err();
        assert_eq!(err, AhpError::UnknownParent { parent: 2, top_count: 2 });
    }

    #[test]
    fn ranked_orders_by_absolute_weight() {
        let top = weights(&[0.2, 0.8]);
        let subs: HashMap<usize, WeightVector> =
            [(1, weights(&[0.1, 0.9]))].into_iter().collect();

        let composition = compose_hierarchy(&top, &subs).unwrap();
        let ranked = composition.ranked();

        assert_eq!(ranked[0].child, Some(1));
        assert_eq!(ranked[0].parent, 1);
        assert_eq!(ranked[1].parent, 0);
    }

    proptest! {
        #[test]
        fn complete_composition_sums_to_one(
            top_raw in proptest::collection::vec(0.01f64..1.0, 1..6),
            sub_raw in proptest::collection::vec(proptest::collection::vec(0.01f64..1.0, 1..7), 6),
        ) {
            let normalize = |raw: &[f64]| {
                let total: f64 = raw.iter().sum();
                WeightVector::new(raw.iter().map(|v| v / total).collect()).unwrap()
            };
            let top = normalize(&top_raw);
            let subs: HashMap<usize, WeightVector> = (0..top.len())
                .map(|parent| (parent, normalize(&sub_raw[parent])))
                .collect();

            let composition = compose_hierarchy(&top, &subs).unwrap();

            prop_assert!(composition.is_complete());
            prop_assert!((composition.total_weight() - top.iter().sum::<f64>()).abs() < 1e-9);
            prop_assert!((composition.total_weight() - 1.0).abs() < 1e-9);
        }
    }
}
