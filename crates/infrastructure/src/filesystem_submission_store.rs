use std::path::PathBuf;

use async_trait::async_trait;
use subportal_application::{PersistedSubmission, SubmissionFile, SubmissionStore};
use subportal_core::{AppError, AppResult};
use subportal_domain::StoredFileName;
use tokio::fs::{self, File};
use tokio::io::AsyncWriteExt;

/// Stores submissions as flat files inside one directory.
///
/// Two uploads with the same name write to the same file; the last one to
/// finish wins.
#[derive(Debug, Clone)]
pub struct FilesystemSubmissionStore {
    root_dir: PathBuf,
}

impl FilesystemSubmissionStore {
    /// Creates a store rooted at the given directory. Nothing is touched until `prepare`.
    #[must_use]
    pub fn new(root_dir: impl Into<PathBuf>) -> Self {
        Self {
            root_dir: root_dir.into(),
        }
    }
}

#[async_trait]
impl SubmissionStore for FilesystemSubmissionStore {
    async fn prepare(&self) -> AppResult<()> {
        fs::create_dir_all(&self.root_dir).await.map_err(|error| {
            AppError::StorageUnavailable(format!(
                "could not create directory '{}': {error}",
                self.root_dir.display()
            ))
        })
    }

    async fn create(&self, file_name: &StoredFileName) -> AppResult<Box<dyn SubmissionFile>> {
        let path = self.root_dir.join(file_name.as_str());
        let file = File::create(&path).await.map_err(|error| {
            AppError::StorageUnavailable(format!(
                "could not create destination file '{}': {error}",
                path.display()
            ))
        })?;

        Ok(Box::new(FilesystemSubmissionFile {
            path,
            file,
            bytes_written: 0,
        }))
    }
}

struct FilesystemSubmissionFile {
    path: PathBuf,
    file: File,
    bytes_written: u64,
}

#[async_trait]
impl SubmissionFile for FilesystemSubmissionFile {
    async fn write_all(&mut self, bytes: &[u8]) -> AppResult<()> {
        self.file.write_all(bytes).await.map_err(|error| {
            AppError::StorageUnavailable(format!(
                "could not copy file to '{}': {error}",
                self.path.display()
            ))
        })?;
        self.bytes_written = self.bytes_written.saturating_add(bytes.len() as u64);
        Ok(())
    }

    async fn finish(mut self: Box<Self>) -> AppResult<PersistedSubmission> {
        self.file.flush().await.map_err(|error| {
            AppError::StorageUnavailable(format!(
                "could not flush '{}': {error}",
                self.path.display()
            ))
        })?;
        self.file.sync_all().await.map_err(|error| {
            AppError::StorageUnavailable(format!(
                "could not sync '{}': {error}",
                self.path.display()
            ))
        })?;

        Ok(PersistedSubmission {
            stored_path: self.path,
            bytes_written: self.bytes_written,
        })
    }
}
