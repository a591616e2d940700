//! Infrastructure adapters for application ports.

#![forbid(unsafe_code)]

mod discord_role_directory;
mod filesystem_submission_store;
mod in_memory_role_directory;

pub use discord_role_directory::DiscordRoleDirectory;
pub use filesystem_submission_store::FilesystemSubmissionStore;
pub use in_memory_role_directory::InMemoryRoleDirectory;
