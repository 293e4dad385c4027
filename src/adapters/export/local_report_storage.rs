//! Local Filesystem Storage Adapter - Implementation of ReportStorage.
//!
//! Writes exported reports into a single output directory using atomic
//! writes and SHA-256 checksums.

use async_trait::async_trait;
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::domain::export::ExportError;
use crate::ports::{ReportStorage, StoredReport};

/// Local filesystem storage for exported reports.
///
/// # Atomic Writes
///
/// Uses a write-to-temp-then-rename pattern:
/// 1. Write content to `{file_name}.tmp`
/// 2. Sync to disk
/// 3. Rename to `{file_name}`
///
/// If any step fails the temp file is removed. An existing report with the
/// same name is replaced.
#[derive(Debug, Clone)]
pub struct LocalReportStorage {
    /// Directory receiving all reports.
    output_dir: PathBuf,
}

impl LocalReportStorage {
    /// Creates a storage rooted at `output_dir`. The directory is created on
    /// first write.
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    /// Returns the output directory.
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Computes the hex-encoded SHA-256 checksum of the given bytes.
    fn compute_checksum(bytes: &[u8]) -> String {
        let mut hasher = Sha256::new();
        hasher.update(bytes);
        format!("{:x}", hasher.finalize())
    }

    /// Writes `bytes` to `temp_path`, syncs, and renames it over `final_path`.
    async fn write_and_rename(
        temp_path: &Path,
        final_path: &Path,
        bytes: &[u8],
    ) -> Result<(), ExportError> {
        let mut file = fs::File::create(temp_path).await.map_err(|e| {
            ExportError::storage(format!(
                "Failed to create temp file {}: {}",
                temp_path.display(),
                e
            ))
        })?;

        file.write_all(bytes).await.map_err(|e| {
            ExportError::storage(format!(
                "Failed to write to temp file {}: {}",
                temp_path.display(),
                e
            ))
        })?;

        file.sync_all().await.map_err(|e| {
            ExportError::storage(format!(
                "Failed to sync temp file {}: {}",
                temp_path.display(),
                e
            ))
        })?;
        drop(file);

        fs::rename(temp_path, final_path).await.map_err(|e| {
            ExportError::storage(format!(
                "Failed to rename {} to {}: {}",
                temp_path.display(),
                final_path.display(),
                e
            ))
        })
    }

    /// Rejects names that would escape the output directory.
    fn validate_file_name(file_name: &str) -> Result<(), ExportError> {
        let trimmed = file_name.trim();
        if trimmed.is_empty()
            || trimmed == "."
            || trimmed == ".."
            || trimmed.contains(['/', '\\'])
        {
            return Err(ExportError::storage(format!(
                "Invalid report file name '{}'",
                file_name
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl ReportStorage for LocalReportStorage {
    async fn store(&self, file_name: &str, bytes: &[u8]) -> Result<StoredReport, ExportError> {
        Self::validate_file_name(file_name)?;

        fs::create_dir_all(&self.output_dir).await.map_err(|e| {
            ExportError::storage(format!(
                "Failed to create output directory {}: {}",
                self.output_dir.display(),
                e
            ))
        })?;

        let final_path = self.output_dir.join(file_name);
        let temp_path = self.output_dir.join(format!("{}.tmp", file_name));

        if let Err(err) = Self::write_and_rename(&temp_path, &final_path, bytes).await {
            // The temp file may or may not exist at this point.
            let _ = fs::remove_file(&temp_path).await;
            return Err(err);
        }

        Ok(StoredReport::new(
            final_path,
            bytes.len() as u64,
            Self::compute_checksum(bytes),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_storage() -> (LocalReportStorage, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let storage = LocalReportStorage::new(temp_dir.path().join("reports"));
        (storage, temp_dir)
    }

    #[tokio::test]
    async fn store_creates_directory_and_file() {
        let (storage, _temp) = create_storage();

        let stored = storage.store("report.json", b"{}").await.unwrap();

        assert!(stored.path.exists());
        assert_eq!(stored.path, storage.output_dir().join("report.json"));
        assert_eq!(stored.size_bytes, 2);
    }

    #[tokio::test]
    async fn store_content_is_correct() {
        let (storage, _temp) = create_storage();

        let stored = storage.store("a.bin", &[1, 2, 3]).await.unwrap();

        assert_eq!(tokio::fs::read(&stored.path).await.unwrap(), vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn store_overwrites_existing() {
        let (storage, _temp) = create_storage();

        storage.store("r.txt", b"first").await.unwrap();
        let stored = storage.store("r.txt", b"second").await.unwrap();

        assert_eq!(tokio::fs::read(&stored.path).await.unwrap(), b"second");
    }

    #[tokio::test]
    async fn store_leaves_no_temp_file() {
        let (storage, _temp) = create_storage();

        storage.store("r.txt", b"data").await.unwrap();

        assert!(!storage.output_dir().join("r.txt.tmp").exists());
    }

    #[tokio::test]
    async fn failed_rename_removes_temp_file() {
        let (storage, _temp) = create_storage();
        let blocker = storage.output_dir().join("report.xlsx");
        tokio::fs::create_dir_all(blocker.join("occupied")).await.unwrap();

        let result = storage.store("report.xlsx", b"data").await;

        assert!(matches!(result, Err(ExportError::Storage(_))));
        assert!(!storage.output_dir().join("report.xlsx.tmp").exists());
        assert!(blocker.is_dir());
    }

    #[tokio::test]
    async fn checksum_is_sha256_hex() {
        let (storage, _temp) = create_storage();

        let stored = storage.store("abc.txt", b"abc").await.unwrap();

        assert_eq!(
            stored.checksum,
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[tokio::test]
    async fn rejects_path_traversal() {
        let (storage, _temp) = create_storage();

        for name in ["", "..", "../escape.txt", "dir/file.txt"] {
            assert!(matches!(
                storage.store(name, b"x").await,
                Err(ExportError::Storage(_))
            ));
        }
    }
}
