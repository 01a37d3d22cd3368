//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, timestamps, errors)
//! - `ahp` - Pure AHP computation core (matrices, weights, consistency, aggregation)
//! - `criteria` - The fixed two-level criteria hierarchy
//! - `expert` - Expert aggregate and per-level judgment records
//! - `analysis_session` - Stored group analysis results

pub mod ahp;
pub mod analysis_session;
pub mod criteria;
pub mod expert;
pub mod foundation;
