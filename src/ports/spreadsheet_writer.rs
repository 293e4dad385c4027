//! Spreadsheet Writer Port - Serializes a sheet layout into workbook bytes.

use crate::domain::export::{ExportError, SheetLayout};

/// Port for spreadsheet generation.
///
/// Implementations must reproduce every cell, merged region and column width
/// of the layout. The returned bytes are a complete workbook file.
pub trait SpreadsheetWriter: Send + Sync {
    /// Renders a single-sheet workbook.
    fn write(&self, layout: &SheetLayout) -> Result<Vec<u8>, ExportError>;

    /// File extension of the produced format, without the dot.
    fn extension(&self) -> &'static str;
}
