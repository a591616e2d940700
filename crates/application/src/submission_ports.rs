use std::path::PathBuf;

use async_trait::async_trait;
use subportal_core::AppResult;
use subportal_domain::StoredFileName;

/// Outcome of closing a submission file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedSubmission {
    /// Where the bytes were written.
    pub stored_path: PathBuf,
    /// Number of bytes the storage accepted.
    pub bytes_written: u64,
}

/// Storage port for submitted files.
#[async_trait]
pub trait SubmissionStore: Send + Sync {
    /// Ensures the destination directory exists, creating missing parents.
    ///
    /// Fails with `StorageUnavailable`.
    async fn prepare(&self) -> AppResult<()>;

    /// Opens the destination file for writing, truncating any existing file of the same name.
    async fn create(&self, file_name: &StoredFileName) -> AppResult<Box<dyn SubmissionFile>>;
}

/// A destination file being written.
#[async_trait]
pub trait SubmissionFile: Send {
    /// Appends bytes to the file.
    async fn write_all(&mut self, bytes: &[u8]) -> AppResult<()>;

    /// Flushes and closes the file, reporting how many bytes were persisted.
    async fn finish(self: Box<Self>) -> AppResult<PersistedSubmission>;
}
