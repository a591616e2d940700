//! Application services and ports.

#![forbid(unsafe_code)]

mod authorization_service;
mod role_directory_ports;
mod submission_ports;
mod submission_service;

pub use authorization_service::AuthorizationService;
pub use role_directory_ports::RoleDirectory;
pub use submission_ports::{PersistedSubmission, SubmissionFile, SubmissionStore};
pub use submission_service::{DEFAULT_MAX_BUFFERED_BYTES, IncomingUpload, SubmissionService};
