//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Analysis Ports
//!
//! - `GenerativeModel` - Structured-output generation service
//!
//! ## Export Ports
//!
//! - `SpreadsheetWriter` - Layout to workbook bytes
//! - `ReportStorage` - Persisting exported files

mod generative_model;
mod report_storage;
mod spreadsheet_writer;

pub use generative_model::{
    GenerationError, GenerationRequest, GenerationResponse, GenerativeModel, ModelInfo,
    JSON_MIME_TYPE,
};
pub use report_storage::{ReportStorage, StoredReport};
pub use spreadsheet_writer::SpreadsheetWriter;
