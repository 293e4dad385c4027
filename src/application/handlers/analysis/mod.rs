//! Analysis handlers.

mod analysis_client;

pub use analysis_client::{AnalysisClient, CheckedAnalysis, DEFAULT_ANALYSIS_TEMPERATURE};
