use axum::http::StatusCode;
use subportal_core::{AppError, MemberId};
use tower_sessions::Session;
use tracing::info;

use crate::error::ApiResult;

/// Session key under which the sign-in flow stores the verified `MemberId`.
pub const SESSION_MEMBER_KEY: &str = "member_id";

pub async fn logout_handler(session: Session) -> ApiResult<StatusCode> {
    let member_id = session
        .get::<MemberId>(SESSION_MEMBER_KEY)
        .await
        .map_err(|error| AppError::Internal(format!("failed to read session identity: {error}")))?;

    session
        .delete()
        .await
        .map_err(|error| AppError::Internal(format!("failed to delete session: {error}")))?;

    if let Some(member_id) = member_id {
        info!(uid = %member_id, "user logged out");
    }

    Ok(StatusCode::NO_CONTENT)
}
