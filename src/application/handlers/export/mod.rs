//! Export handlers.

mod export_report;

pub use export_report::{ExportFormat, ExportReportHandler};
