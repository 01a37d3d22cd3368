//! Criterion and hierarchy level value objects.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::CriteriaError;

/// Level key used for the top-level comparison.
pub const TOP_LEVEL_KEY: &str = "top";

/// An immutable labeled node of the criteria tree.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Criterion {
    /// Stable code, e.g. "B1" or "C23".
    pub code: String,
    pub name: String,
}

impl Criterion {
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for Criterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.name)
    }
}

/// A set of sibling criteria compared in one judgment matrix.
///
/// `Top` compares the top-level criteria; `Branch(code)` compares the
/// sub-criteria of the top-level criterion with that code. Serializes as
/// `"top"` or the parent code.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum HierarchyLevel {
    Top,
    Branch(String),
}

impl HierarchyLevel {
    pub fn branch(parent_code: impl Into<String>) -> Self {
        HierarchyLevel::Branch(parent_code.into())
    }

    pub fn is_top(&self) -> bool {
        matches!(self, HierarchyLevel::Top)
    }

    /// Returns the storage key of this level.
    pub fn key(&self) -> &str {
        match self {
            HierarchyLevel::Top => TOP_LEVEL_KEY,
            HierarchyLevel::Branch(code) => code,
        }
    }
}

impl fmt::Display for HierarchyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

impl FromStr for HierarchyLevel {
    type Err = CriteriaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(CriteriaError::EmptyLevelKey);
        }
        if trimmed.eq_ignore_ascii_case(TOP_LEVEL_KEY) {
            Ok(HierarchyLevel::Top)
        } else {
            Ok(HierarchyLevel::Branch(trimmed.to_string()))
        }
    }
}

impl TryFrom<String> for HierarchyLevel {
    type Error = CriteriaError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<HierarchyLevel> for String {
    fn from(level: HierarchyLevel) -> Self {
        level.key().to_string()
    }
}
