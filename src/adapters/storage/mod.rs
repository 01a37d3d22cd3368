//! Storage Adapters
//!
//! Implementations of the `ExpertRepository` and `AnalysisSessionRepository`
//! ports.
//!
//! ## Available Adapters
//!
//! - **JsonFileStore** - Single JSON document on disk
//! - **InMemoryStore** - In memory (testing/development)
//!
//! ## Usage
//!
//! ```ignore
//! use adapters::storage::{InMemoryStore, JsonFileStore};
//!
//! // Production: file-based storage
//! let store = JsonFileStore::open("expert_data.json").await?;
//!
//! // Testing: in-memory storage
//! let store = InMemoryStore::new();
//! ```

mod in_memory_store;
mod json_file_store;

pub use in_memory_store::InMemoryStore;
pub use json_file_store::{JsonFileStore, StoreMetadata, STORE_FORMAT_VERSION};
