//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `storage` - Expert and analysis session persistence (JSON file, in-memory)
//! - `http` - axum REST endpoints

pub mod http;
pub mod storage;
