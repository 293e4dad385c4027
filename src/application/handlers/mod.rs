//! Application handlers.
//!
//! Orchestrate domain services through ports.

pub mod analysis;
pub mod export;

pub use analysis::{AnalysisClient, CheckedAnalysis, DEFAULT_ANALYSIS_TEMPERATURE};
pub use export::{ExportFormat, ExportReportHandler};
