//! Domain entities and invariants.

#![forbid(unsafe_code)]

mod role;
mod submission;

pub use role::{
    AuthorizedRoleNames, CommunityRole, DEFAULT_AUTHORIZED_ROLE_NAMES, RoleColor, parse_role_id,
};
pub use submission::{StoredFileName, UploadedArtifact};
