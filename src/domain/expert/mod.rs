//! Expert domain module.
//!
//! Registered panel members and the judgment records they submit, one per
//! hierarchy level.

mod aggregate;
mod errors;
mod judgment;
mod profile;

pub use aggregate::Expert;
pub use errors::ExpertError;
pub use judgment::JudgmentRecord;
pub use profile::{ExpertProfile, MAX_YEARS_EXPERIENCE};
