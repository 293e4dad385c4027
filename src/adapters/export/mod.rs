//! Export Adapters.
//!
//! - `XlsxWriter` - SpreadsheetWriter producing Office Open XML workbooks
//! - `LocalReportStorage` - ReportStorage writing into a local directory

mod local_report_storage;
mod xlsx_writer;

pub use local_report_storage::LocalReportStorage;
pub use xlsx_writer::{cell_reference, column_letters, encode_cell_text, XlsxWriter};
