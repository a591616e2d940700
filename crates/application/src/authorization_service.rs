use std::sync::Arc;

use subportal_core::{AppResult, CommunityId, MemberId};
use subportal_domain::{AuthorizedRoleNames, CommunityRole, parse_role_id};

use crate::RoleDirectory;

/// Application service deciding site access from community roles.
///
/// Every check queries the directory again; nothing is cached between calls.
#[derive(Clone)]
pub struct AuthorizationService {
    directory: Arc<dyn RoleDirectory>,
    community_id: CommunityId,
    authorized_role_names: AuthorizedRoleNames,
}

impl AuthorizationService {
    /// Creates a new authorization service for one community.
    #[must_use]
    pub fn new(
        directory: Arc<dyn RoleDirectory>,
        community_id: CommunityId,
        authorized_role_names: AuthorizedRoleNames,
    ) -> Self {
        Self {
            directory,
            community_id,
            authorized_role_names,
        }
    }

    /// Returns whether the member holds at least one allow-listed role.
    ///
    /// Directory failures are returned as errors and must be treated as a
    /// denial by the caller, never as a decision.
    pub async fn is_authorized(&self, member_id: MemberId) -> AppResult<bool> {
        let roles = self.resolve_member_roles(member_id).await?;
        Ok(self.grants_access(&roles))
    }

    /// Returns whether any of the resolved roles is on the allow-list.
    #[must_use]
    pub fn grants_access(&self, roles: &[CommunityRole]) -> bool {
        roles
            .iter()
            .any(|role| self.authorized_role_names.contains(role.name()))
    }

    /// Resolves the member's role identifiers against the community catalog.
    ///
    /// Identifiers without a catalog entry are skipped. Each catalog role
    /// appears at most once in the result.
    pub async fn resolve_member_roles(&self, member_id: MemberId) -> AppResult<Vec<CommunityRole>> {
        let catalog = self
            .directory
            .fetch_community_roles(self.community_id)
            .await?;
        let role_ids = self
            .directory
            .fetch_member_role_ids(self.community_id, member_id)
            .await?;

        let mut resolved: Vec<CommunityRole> = Vec::new();
        for raw_role_id in &role_ids {
            let role_id = parse_role_id(raw_role_id)?;
            if resolved.iter().any(|role| role.id() == role_id) {
                continue;
            }

            resolved.extend(catalog.iter().filter(|role| role.id() == role_id).cloned());
        }

        Ok(resolved)
    }
}
