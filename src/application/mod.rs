//! Application layer - Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.

pub mod handlers;

pub use handlers::{
    AnalysisClient, CheckedAnalysis, ExportFormat, ExportReportHandler,
    DEFAULT_ANALYSIS_TEMPERATURE,
};
