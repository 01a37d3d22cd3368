//! Criteria Hierarchy - The fixed two-level evaluation system.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::{CriteriaError, Criterion, HierarchyLevel};

/// A top-level criterion and its sub-criteria.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CriteriaBranch {
    pub criterion: Criterion,
    pub sub_criteria: Vec<Criterion>,
}

/// Two-level criteria tree: top-level criteria, each with its own
/// sub-criteria. Deeper nesting is not supported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CriteriaHierarchy {
    pub name: String,
    branches: Vec<CriteriaBranch>,
}

impl CriteriaHierarchy {
    /// Creates a hierarchy, checking codes are unique and no branch is empty.
    pub fn new(name: impl Into<String>, branches: Vec<CriteriaBranch>) -> Result<Self, CriteriaError> {
        if branches.is_empty() {
            return Err(CriteriaError::EmptyHierarchy);
        }

        let mut seen = HashSet::new();
        for branch in &branches {
            if branch.sub_criteria.is_empty() {
                return Err(CriteriaError::EmptyBranch(branch.criterion.code.clone()));
            }
            let codes = std::iter::once(&branch.criterion).chain(&branch.sub_criteria);
            for criterion in codes {
                if !seen.insert(criterion.code.clone()) {
                    return Err(CriteriaError::DuplicateCode(criterion.code.clone()));
                }
            }
        }

        Ok(Self {
            name: name.into(),
            branches,
        })
    }

    pub fn branches(&self) -> &[CriteriaBranch] {
        &self.branches
    }

    /// Top-level criteria in comparison order.
    pub fn top_level(&self) -> Vec<&Criterion> {
        self.branches.iter().map(|branch| &branch.criterion).collect()
    }

    /// Index of the top-level criterion with this code.
    pub fn parent_index(&self, code: &str) -> Option<usize> {
        self.branches
            .iter()
            .position(|branch| branch.criterion.code == code)
    }

    /// Every level an expert is asked to judge: top first, then each branch.
    pub fn levels(&self) -> Vec<HierarchyLevel> {
        std::iter::once(HierarchyLevel::Top)
            .chain(
                self.branches
                    .iter()
                    .map(|branch| HierarchyLevel::branch(branch.criterion.code.clone())),
            )
            .collect()
    }

    /// Criteria compared at `level`, index-aligned with its judgment matrix.
    pub fn criteria_for(&self, level: &HierarchyLevel) -> Result<Vec<&Criterion>, CriteriaError> {
        match level {
            HierarchyLevel::Top => Ok(self.top_level()),
            HierarchyLevel::Branch(code) => self
                .parent_index(code)
                .map(|index| self.branches[index].sub_criteria.iter().collect())
                .ok_or_else(|| CriteriaError::UnknownLevel(code.clone())),
        }
    }

    /// Number of criteria compared at `level`.
    pub fn order_of(&self, level: &HierarchyLevel) -> Result<usize, CriteriaError> {
        self.criteria_for(level).map(|criteria| criteria.len())
    }

    /// Returns the level if it belongs to this hierarchy.
    pub fn resolve_level(&self, key: &str) -> Result<HierarchyLevel, CriteriaError> {
        let level: HierarchyLevel = key.parse()?;
        self.criteria_for(&level)?;
        Ok(level)
    }
}

fn branch(code: &str, name: &str, subs: [(&str, &str); 5]) -> CriteriaBranch {
    CriteriaBranch {
        criterion: Criterion::new(code, name),
        sub_criteria: subs
            .iter()
            .map(|(code, name)| Criterion::new(*code, *name))
            .collect(),
    }
}

/// The university-student AI literacy evaluation system: four top-level
/// criteria with five sub-criteria each.
pub static EVALUATION_SYSTEM: Lazy<CriteriaHierarchy> = Lazy::new(|| CriteriaHierarchy {
    name: "University Student AI Literacy Evaluation System".to_string(),
    branches: vec![
        branch(
            "B1",
            "Systemic Cognition",
            [
                ("C11", "Data and Knowledge"),
                ("C12", "Algorithms and Models"),
                ("C13", "Computing Power and Systems"),
                ("C14", "Interdisciplinary Application"),
                ("C15", "Trustworthiness and Security"),
            ],
        ),
        branch(
            "B2",
            "Constructive Competence",
            [
                ("C21", "Problem Abstraction and Definition"),
                ("C22", "Decomposition and Modularization"),
                ("C23", "Tool Selection and Model Building"),
                ("C24", "Validation, Evaluation and Iteration"),
                ("C25", "Result Interpretation and Communication"),
            ],
        ),
        branch(
            "B3",
            "Creativity and Critical Thinking",
            [
                ("C31", "Cross-context Transfer and Application"),
                ("C32", "Fact Checking and Logical Critique"),
                ("C33", "Self-directed Planning and Personalized Learning"),
                ("C34", "Active Exploration and Creation"),
                ("C35", "Learning Reflection and Metacognition"),
            ],
        ),
        branch(
            "B4",
            "Human-centeredness and Responsibility",
            [
                ("C41", "Data Security and Privacy Protection"),
                ("C42", "Algorithmic Bias and Model Hallucination"),
                ("C43", "AI for Good and Human-centered Values"),
                ("C44", "Accountability in Human-AI Collaboration"),
                ("C45", "Knowledge Inclusion and Social Equity"),
            ],
        ),
    ],
});
