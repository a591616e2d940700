//! Shared primitives for all Rust crates in the submission portal.

#![forbid(unsafe_code)]

/// Identity primitives shared across services.
pub mod identity;

use thiserror::Error;

pub use identity::{CommunityId, MemberId};

/// Result type used across submission portal crates.
pub type AppResult<T> = Result<T, AppError>;

/// Common application error categories.
#[derive(Debug, Error)]
pub enum AppError {
    /// Invalid input or violated invariant.
    #[error("validation error: {0}")]
    Validation(String),

    /// User is not authenticated.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// User is authenticated but blocked by authorization policy.
    #[error("forbidden: {0}")]
    Forbidden(String),

    /// The external role directory could not be reached or answered with an error.
    #[error("role directory unavailable: {0}")]
    DirectoryUnavailable(String),

    /// The member is not part of the community.
    #[error("member not found: {0}")]
    MemberNotFound(String),

    /// The role directory returned an identifier that is not a decimal integer.
    #[error("malformed role id '{0}'")]
    MalformedRoleId(String),

    /// The upload did not carry a usable file part.
    #[error("no file supplied: {0}")]
    NoFileSupplied(String),

    /// The submission storage could not be prepared or written.
    #[error("storage unavailable: {0}")]
    StorageUnavailable(String),

    /// The number of persisted bytes differs from the declared size.
    #[error(
        "incomplete write of '{filename}': declared {declared} bytes, wrote {written}{}",
        cause_suffix(.cause)
    )]
    IncompleteWrite {
        /// Stored file name.
        filename: String,
        /// Byte count declared by the client.
        declared: u64,
        /// Byte count actually persisted.
        written: u64,
        /// Transport failure that cut the upload short, if any.
        cause: Option<String>,
    },

    /// Internal unexpected error.
    #[error("internal error: {0}")]
    Internal(String),
}

fn cause_suffix(cause: &Option<String>) -> String {
    cause
        .as_deref()
        .map(|cause| format!(" (stream interrupted: {cause})"))
        .unwrap_or_default()
}
