use std::collections::HashMap;

use async_trait::async_trait;
use subportal_application::RoleDirectory;
use subportal_core::{AppError, AppResult, CommunityId, MemberId};
use subportal_domain::CommunityRole;
use tokio::sync::RwLock;

/// In-memory role directory implementation.
#[derive(Debug, Default)]
pub struct InMemoryRoleDirectory {
    roles: RwLock<HashMap<CommunityId, Vec<CommunityRole>>>,
    members: RwLock<HashMap<(CommunityId, MemberId), Vec<String>>>,
}

impl InMemoryRoleDirectory {
    /// Creates an empty in-memory directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a role to the community catalog.
    pub async fn define_role(&self, community_id: CommunityId, role: CommunityRole) {
        self.roles
            .write()
            .await
            .entry(community_id)
            .or_default()
            .push(role);
    }

    /// Sets the raw role identifiers held by a member, adding the member to the community.
    pub async fn set_member_roles<I, S>(
        &self,
        community_id: CommunityId,
        member_id: MemberId,
        role_ids: I,
    ) where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.members.write().await.insert(
            (community_id, member_id),
            role_ids.into_iter().map(Into::into).collect(),
        );
    }
}

#[async_trait]
impl RoleDirectory for InMemoryRoleDirectory {
    async fn fetch_community_roles(
        &self,
        community_id: CommunityId,
    ) -> AppResult<Vec<CommunityRole>> {
        Ok(self
            .roles
            .read()
            .await
            .get(&community_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn fetch_member_role_ids(
        &self,
        community_id: CommunityId,
        member_id: MemberId,
    ) -> AppResult<Vec<String>> {
        self.members
            .read()
            .await
            .get(&(community_id, member_id))
            .cloned()
            .ok_or_else(|| {
                AppError::MemberNotFound(format!(
                    "user '{member_id}' is not a member of community '{community_id}'"
                ))
            })
    }
}
