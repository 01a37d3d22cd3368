//! Storage configuration

use serde::Deserialize;
use std::path::{Path, PathBuf};

use super::error::ValidationError;

/// Where panel data is persisted.
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// JSON document holding experts, judgments and analysis sessions
    #[serde(default = "default_data_file")]
    pub data_file: PathBuf,
}

impl StorageConfig {
    pub fn data_file(&self) -> &Path {
        &self.data_file
    }

    /// Validate storage configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.data_file.as_os_str().is_empty() {
            return Err(ValidationError::MissingRequired("storage.data_file"));
        }
        match self.data_file.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Ok(()),
            _ => Err(ValidationError::InvalidDataFile(
                self.data_file.display().to_string(),
            )),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_file: default_data_file(),
        }
    }
}

fn default_data_file() -> PathBuf {
    PathBuf::from("expert_data.json")
}
