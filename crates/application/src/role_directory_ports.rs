use async_trait::async_trait;
use subportal_core::{AppResult, CommunityId, MemberId};
use subportal_domain::CommunityRole;

/// Read access to the external community directory.
///
/// Implementations perform exactly one remote call per method and never retry.
#[async_trait]
pub trait RoleDirectory: Send + Sync {
    /// Lists every role defined in the community.
    ///
    /// Fails with `DirectoryUnavailable` when the remote call errors and with
    /// `MalformedRoleId` when any role identifier is not a decimal integer.
    async fn fetch_community_roles(&self, community_id: CommunityId)
    -> AppResult<Vec<CommunityRole>>;

    /// Lists the raw role identifiers held by one member of the community.
    ///
    /// Fails with `DirectoryUnavailable` or, when the member is not part of the
    /// community, `MemberNotFound`.
    async fn fetch_member_role_ids(
        &self,
        community_id: CommunityId,
        member_id: MemberId,
    ) -> AppResult<Vec<String>>;
}
