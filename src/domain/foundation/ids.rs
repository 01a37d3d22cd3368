//! Strongly-typed identifier value objects.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::ValidationError;

/// Number of hex characters kept from the identity digest.
pub const EXPERT_ID_LENGTH: usize = 12;

/// Stable identifier for a registered expert.
///
/// Derived from the expert's badge number, name and institution so the same
/// person registering twice maps to the same id.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExpertId(String);

impl ExpertId {
    /// Derives the id from identity fields.
    pub fn derive(badge_number: &str, name: &str, institution: &str) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(format!("{}_{}_{}", badge_number, name, institution).as_bytes());
        let digest = format!("{:x}", hasher.finalize());
        Self(digest[..EXPERT_ID_LENGTH].to_string())
    }

    /// Wraps an existing id, returning error if empty.
    pub fn new(id: impl Into<String>) -> Result<Self, ValidationError> {
        let id = id.into();
        if id.is_empty() {
            return Err(ValidationError::empty_field("expert_id"));
        }
        Ok(Self(id))
    }

    /// Returns the inner string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ExpertId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ExpertId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s.trim())
    }
}

/// Unique identifier for an analysis session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnalysisSessionId(Uuid);

impl AnalysisSessionId {
    /// Creates a new random AnalysisSessionId.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates an AnalysisSessionId from an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the inner UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for AnalysisSessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for AnalysisSessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for AnalysisSessionId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}
