//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `ExpertRepository` - Registered experts and their judgments
//! - `AnalysisSessionRepository` - Stored group analysis results

mod analysis_session_repository;
mod expert_repository;

pub use analysis_session_repository::AnalysisSessionRepository;
pub use expert_repository::ExpertRepository;
