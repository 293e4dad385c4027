//! ExportReportHandler - Writes a finished table to disk as JSON or a workbook.

use std::sync::Arc;
use tracing::info;

use crate::domain::export::{
    to_pretty_json, ExportError, SheetLayout, DEFAULT_FILE_STEM, DEFAULT_SHEET_NAME,
};
use crate::domain::tos::TOSResult;
use crate::ports::{ReportStorage, SpreadsheetWriter, StoredReport};

/// Output format of an export.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Json,
    Spreadsheet,
}

/// Handler for exporting tables.
pub struct ExportReportHandler {
    writer: Arc<dyn SpreadsheetWriter>,
    storage: Arc<dyn ReportStorage>,
    file_stem: String,
    sheet_name: String,
}

impl ExportReportHandler {
    pub fn new(writer: Arc<dyn SpreadsheetWriter>, storage: Arc<dyn ReportStorage>) -> Self {
        Self {
            writer,
            storage,
            file_stem: DEFAULT_FILE_STEM.to_string(),
            sheet_name: DEFAULT_SHEET_NAME.to_string(),
        }
    }

    /// Sets the file name stem (without extension).
    pub fn with_file_stem(mut self, file_stem: impl Into<String>) -> Self {
        self.file_stem = file_stem.into();
        self
    }

    /// Sets the worksheet name.
    pub fn with_sheet_name(mut self, sheet_name: impl Into<String>) -> Self {
        self.sheet_name = sheet_name.into();
        self
    }

    /// File name a format is stored under.
    pub fn file_name(&self, format: ExportFormat) -> String {
        let extension = match format {
            ExportFormat::Json => "json",
            ExportFormat::Spreadsheet => self.writer.extension(),
        };
        format!("{}.{}", self.file_stem, extension)
    }

    /// Renders the workbook bytes without storing them.
    pub fn render_spreadsheet(&self, result: &TOSResult) -> Result<Vec<u8>, ExportError> {
        let layout = SheetLayout::with_sheet_name(result, &self.sheet_name)?;
        self.writer.write(&layout)
    }

    /// Renders and stores the workbook.
    pub async fn export_spreadsheet(&self, result: &TOSResult) -> Result<StoredReport, ExportError> {
        let bytes = self.render_spreadsheet(result)?;
        self.store(ExportFormat::Spreadsheet, &bytes, result).await
    }

    /// Stores the pretty-printed JSON form.
    pub async fn export_json(&self, result: &TOSResult) -> Result<StoredReport, ExportError> {
        let json = to_pretty_json(result)?;
        self.store(ExportFormat::Json, json.as_bytes(), result).await
    }

    /// Exports in the requested format.
    pub async fn export(
        &self,
        result: &TOSResult,
        format: ExportFormat,
    ) -> Result<StoredReport, ExportError> {
        match format {
            ExportFormat::Json => self.export_json(result).await,
            ExportFormat::Spreadsheet => self.export_spreadsheet(result).await,
        }
    }

    async fn store(
        &self,
        format: ExportFormat,
        bytes: &[u8],
        result: &TOSResult,
    ) -> Result<StoredReport, ExportError> {
        let stored = self.storage.store(&self.file_name(format), bytes).await?;
        info!(
            path = %stored.path.display(),
            size_bytes = stored.size_bytes,
            checksum = %stored.checksum,
            rows = result.row_count(),
            ?format,
            "Report exported"
        );
        Ok(stored)
    }
}
