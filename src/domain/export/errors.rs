//! Export error types.

use thiserror::Error;

/// Errors that can occur while exporting a table.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("serialization failed: {0}")]
    Serialization(String),

    #[error("spreadsheet generation failed: {0}")]
    Spreadsheet(String),

    #[error("storage failed: {0}")]
    Storage(String),

    #[error("invalid sheet name '{name}': {reason}")]
    InvalidSheetName { name: String, reason: String },
}

impl ExportError {
    /// Creates a spreadsheet generation error.
    pub fn spreadsheet(message: impl Into<String>) -> Self {
        Self::Spreadsheet(message.into())
    }

    /// Creates a storage error.
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage(message.into())
    }
}

impl From<serde_json::Error> for ExportError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}
