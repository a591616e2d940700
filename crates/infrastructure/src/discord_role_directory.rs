use async_trait::async_trait;
use serde::Deserialize;
use subportal_application::RoleDirectory;
use subportal_core::{AppError, AppResult, CommunityId, MemberId};
use subportal_domain::CommunityRole;
use tracing::info;

/// JSON error code the platform returns for members outside the guild.
///
/// This is the only signal for a missing member; a 404 without it is a directory fault.
const UNKNOWN_MEMBER_ERROR_CODE: u64 = 10007;

/// Discord REST API implementation of the role directory.
///
/// Each call is a single request; the HTTP client's own timeout applies.
pub struct DiscordRoleDirectory {
    http_client: reqwest::Client,
    api_base_url: String,
    bot_token: String,
}

#[derive(Debug, Deserialize)]
struct GuildRolePayload {
    id: String,
    name: String,
    #[serde(default)]
    color: u32,
}

#[derive(Debug, Deserialize)]
struct GuildMemberPayload {
    #[serde(default)]
    roles: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorPayload {
    #[serde(default)]
    code: u64,
    #[serde(default)]
    message: String,
}

impl DiscordRoleDirectory {
    /// Creates a new directory client authenticating as a bot.
    #[must_use]
    pub fn new(
        http_client: reqwest::Client,
        api_base_url: impl Into<String>,
        bot_token: impl Into<String>,
    ) -> Self {
        Self {
            http_client,
            api_base_url: api_base_url.into().trim_end_matches('/').to_owned(),
            bot_token: bot_token.into(),
        }
    }

    async fn get(&self, path: &str) -> AppResult<reqwest::Response> {
        self.http_client
            .get(format!("{}{path}", self.api_base_url))
            .header(
                reqwest::header::AUTHORIZATION,
                format!("Bot {}", self.bot_token),
            )
            .send()
            .await
            .map_err(|error| {
                AppError::DirectoryUnavailable(format!("request to '{path}' failed: {error}"))
            })
    }
}

#[async_trait]
impl RoleDirectory for DiscordRoleDirectory {
    async fn fetch_community_roles(
        &self,
        community_id: CommunityId,
    ) -> AppResult<Vec<CommunityRole>> {
        info!(community_id = %community_id, "getting community roles");

        let path = format!("/guilds/{community_id}/roles");
        let response = self.get(&path).await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::DirectoryUnavailable(format!(
                "role listing for community '{community_id}' failed with status {status}: {body}"
            )));
        }

        let roles = response
            .json::<Vec<GuildRolePayload>>()
            .await
            .map_err(|error| {
                AppError::DirectoryUnavailable(format!("invalid role listing payload: {error}"))
            })?;

        roles
            .into_iter()
            .map(|role| CommunityRole::from_directory(&role.id, role.name, role.color))
            .collect()
    }

    async fn fetch_member_role_ids(
        &self,
        community_id: CommunityId,
        member_id: MemberId,
    ) -> AppResult<Vec<String>> {
        info!(uid = %member_id, "getting community role ids for user");

        let path = format!("/guilds/{community_id}/members/{member_id}");
        let response = self.get(&path).await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let error = serde_json::from_str::<ApiErrorPayload>(&body).ok();

            if error
                .as_ref()
                .is_some_and(|error| error.code == UNKNOWN_MEMBER_ERROR_CODE)
            {
                return Err(AppError::MemberNotFound(format!(
                    "user '{member_id}' is not a member of community '{community_id}'"
                )));
            }

            let message = error.map(|error| error.message).unwrap_or(body);
            return Err(AppError::DirectoryUnavailable(format!(
                "member lookup for user '{member_id}' failed with status {status}: {message}"
            )));
        }

        let member = response
            .json::<GuildMemberPayload>()
            .await
            .map_err(|error| {
                AppError::DirectoryUnavailable(format!("invalid member payload: {error}"))
            })?;

        Ok(member.roles)
    }
}
