use std::fmt::{Display, Formatter};
use std::path::PathBuf;

use subportal_core::{AppError, AppResult};

/// File name a submission is stored under, derived from the untrusted client name.
///
/// Only the last path component is kept, so the stored file always lands
/// directly inside the submissions directory.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StoredFileName(String);

impl StoredFileName {
    /// Sanitizes a client-supplied file name.
    pub fn parse(original: &str) -> AppResult<Self> {
        let candidate = original
            .rsplit(['/', '\\'])
            .next()
            .unwrap_or_default();

        if candidate.is_empty() || candidate == "." || candidate == ".." {
            return Err(AppError::NoFileSupplied(format!(
                "file name '{original}' does not name a file"
            )));
        }

        if candidate.chars().any(char::is_control) {
            return Err(AppError::NoFileSupplied(
                "file name must not contain control characters".to_owned(),
            ));
        }

        Ok(Self(candidate.to_owned()))
    }

    /// Returns the sanitized name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl Display for StoredFileName {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.0.as_str())
    }
}

/// A submission that was persisted and verified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedArtifact {
    /// File name as sent by the client.
    pub original_filename: String,
    /// Byte count the client declared for the file part.
    pub declared_size: u64,
    /// Location of the stored file.
    pub stored_path: PathBuf,
}
