//! Export model - format-independent representations of a finished table.
//!
//! The JSON copy and the spreadsheet layout are pure transformations of a
//! [`TOSResult`](crate::domain::tos::TOSResult). Turning a layout into bytes
//! happens behind the `SpreadsheetWriter` port; persisting them behind
//! `ReportStorage`.

mod errors;
mod json;
mod sheet;

pub use errors::ExportError;
pub use json::{from_json, to_pretty_json};
pub use sheet::{
    format_row_percentage, format_total_percentage, validate_sheet_name, Cell, ColumnSpec,
    MergeRange, RowKind, SheetLayout, SheetRow, BLOOMS_GROUP_LABEL, COLUMNS, DEFAULT_SHEET_NAME,
    FIRST_BLOOM_COLUMN, HEADER_ROWS, TOTAL_LABEL, ZERO_COUNT_PLACEHOLDER,
};

/// Default file stem for exported reports.
pub const DEFAULT_FILE_STEM: &str = "TOS-Analysis-Report";
