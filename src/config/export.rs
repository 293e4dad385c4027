//! Report export configuration

use serde::Deserialize;
use std::path::PathBuf;

use super::error::ValidationError;
use crate::domain::export::{validate_sheet_name, DEFAULT_FILE_STEM, DEFAULT_SHEET_NAME};

/// Report export configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ExportConfig {
    /// Directory receiving exported reports
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// File name without extension
    #[serde(default = "default_file_stem")]
    pub file_stem: String,

    /// Worksheet name
    #[serde(default = "default_sheet_name")]
    pub sheet_name: String,
}

impl ExportConfig {
    /// Validate export configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        let stem = self.file_stem.trim();
        if stem.is_empty() || stem.contains(['/', '\\']) || stem == "." || stem == ".." {
            return Err(ValidationError::InvalidFileStem(self.file_stem.clone()));
        }

        validate_sheet_name(&self.sheet_name)
            .map_err(|_| ValidationError::InvalidSheetName(self.sheet_name.clone()))?;

        Ok(())
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            file_stem: default_file_stem(),
            sheet_name: default_sheet_name(),
        }
    }
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_file_stem() -> String {
    DEFAULT_FILE_STEM.to_string()
}

fn default_sheet_name() -> String {
    DEFAULT_SHEET_NAME.to_string()
}
