//! Foundation module - Shared domain primitives.
//!
//! Contains identifiers and error types that the rest of the domain builds on.

mod errors;
mod ids;

pub use errors::ValidationError;
pub use ids::AnalysisId;
