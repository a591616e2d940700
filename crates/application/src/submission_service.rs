use std::sync::Arc;

use bytes::Bytes;
use futures_util::{Stream, StreamExt};
use subportal_core::{AppError, AppResult};
use subportal_domain::{StoredFileName, UploadedArtifact};

use crate::{SubmissionFile, SubmissionStore};

/// Buffering cap used by the portal for one upload.
pub const DEFAULT_MAX_BUFFERED_BYTES: usize = 100_000_000;

/// File part received from an upload request.
pub struct IncomingUpload<S> {
    /// File name as sent by the client.
    pub original_filename: String,
    /// Size declared for the part, when the client sent one.
    pub declared_size: Option<u64>,
    /// Part content as it arrives from the transport.
    pub content: S,
}

/// Application service that persists uploaded submissions.
#[derive(Clone)]
pub struct SubmissionService {
    store: Arc<dyn SubmissionStore>,
    max_buffered_bytes: usize,
}

impl SubmissionService {
    /// Creates a new submission service.
    #[must_use]
    pub fn new(store: Arc<dyn SubmissionStore>, max_buffered_bytes: usize) -> Self {
        Self {
            store,
            max_buffered_bytes,
        }
    }

    /// Stores one uploaded file and verifies the persisted byte count.
    ///
    /// At most `max_buffered_bytes` of content is held in memory at a time.
    /// A file that fails verification is left on disk.
    pub async fn ingest<S>(&self, upload: IncomingUpload<S>) -> AppResult<UploadedArtifact>
    where
        S: Stream<Item = AppResult<Bytes>> + Send + Unpin,
    {
        let IncomingUpload {
            original_filename,
            declared_size,
            mut content,
        } = upload;

        let file_name = StoredFileName::parse(&original_filename)?;
        self.store.prepare().await?;
        let mut file = self.store.create(&file_name).await?;

        let mut pending: Vec<u8> = Vec::new();
        let mut received: u64 = 0;
        let mut interruption: Option<AppError> = None;

        while let Some(chunk) = content.next().await {
            let chunk = match chunk {
                Ok(chunk) => chunk,
                Err(error) => {
                    interruption = Some(error);
                    break;
                }
            };
            received = received.saturating_add(chunk.len() as u64);

            if pending.len().saturating_add(chunk.len()) > self.max_buffered_bytes {
                flush(file.as_mut(), &mut pending).await?;
            }

            if chunk.len() > self.max_buffered_bytes {
                file.write_all(&chunk).await?;
            } else {
                pending.extend_from_slice(&chunk);
            }
        }

        flush(file.as_mut(), &mut pending).await?;
        let persisted = file.finish().await?;

        let declared = match (declared_size, &interruption) {
            (Some(declared), _) => declared,
            (None, None) => received,
            (None, Some(error)) => {
                return Err(AppError::NoFileSupplied(format!(
                    "file part '{original_filename}' ended unexpectedly: {error}"
                )));
            }
        };

        if persisted.bytes_written != declared {
            return Err(AppError::IncompleteWrite {
                filename: file_name.to_string(),
                declared,
                written: persisted.bytes_written,
                cause: interruption.map(|error| error.to_string()),
            });
        }

        Ok(UploadedArtifact {
            original_filename,
            declared_size: declared,
            stored_path: persisted.stored_path,
        })
    }
}

async fn flush(file: &mut dyn SubmissionFile, pending: &mut Vec<u8>) -> AppResult<()> {
    if pending.is_empty() {
        return Ok(());
    }

    file.write_all(pending.as_slice()).await?;
    pending.clear();
    Ok(())
}
