//! Expert command and query handlers.

mod expert_queries;
mod register_expert;
mod submit_judgment;

pub use expert_queries::{GetExpertHandler, ListExpertsHandler};
pub use register_expert::{RegisterExpertCommand, RegisterExpertHandler};
pub use submit_judgment::{
    Comparison, SubmitJudgmentCommand, SubmitJudgmentHandler, SubmitJudgmentResult,
};
