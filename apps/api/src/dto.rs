use serde::Serialize;
use subportal_core::MemberId;
use subportal_domain::CommunityRole;

/// Health response payload.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// API representation of a community role.
#[derive(Debug, Serialize)]
pub struct RoleResponse {
    pub id: String,
    pub name: String,
    pub color: String,
}

impl From<CommunityRole> for RoleResponse {
    fn from(value: CommunityRole) -> Self {
        Self {
            id: value.id().to_string(),
            name: value.name().to_owned(),
            color: value.color().as_str().to_owned(),
        }
    }
}

/// API representation of the signed-in member.
#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub user_id: String,
    pub authorized: bool,
    pub roles: Vec<RoleResponse>,
}

impl ProfileResponse {
    pub fn new(member_id: MemberId, authorized: bool, roles: Vec<CommunityRole>) -> Self {
        Self {
            user_id: member_id.to_string(),
            authorized,
            roles: roles.into_iter().map(RoleResponse::from).collect(),
        }
    }
}
