//! Report Storage Port - Persists exported reports.
//!
//! Adapters decide where the bytes land. The export handler only names the
//! file and reads back what was written.

use async_trait::async_trait;
use std::path::PathBuf;

use crate::domain::export::ExportError;

/// Port for persisting exported report files.
///
/// # Contract
///
/// Implementations must:
/// - Write atomically (no partial file on failure)
/// - Overwrite an existing file with the same name
/// - Compute a SHA-256 checksum of the stored bytes
#[async_trait]
pub trait ReportStorage: Send + Sync {
    /// Stores `bytes` under `file_name` and reports where they went.
    async fn store(&self, file_name: &str, bytes: &[u8]) -> Result<StoredReport, ExportError>;
}

/// Where and what was stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredReport {
    /// Full path of the stored file.
    pub path: PathBuf,
    /// Size in bytes.
    pub size_bytes: u64,
    /// Hex-encoded SHA-256 of the content.
    pub checksum: String,
}

impl StoredReport {
    /// Creates a new stored report record.
    pub fn new(path: impl Into<PathBuf>, size_bytes: u64, checksum: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            size_bytes,
            checksum: checksum.into(),
        }
    }
}
