use axum::Json;
use axum::extract::{Extension, State};
use subportal_core::MemberId;
use tracing::error;

use crate::dto::ProfileResponse;
use crate::error::ApiResult;
use crate::state::AppState;

pub async fn profile_handler(
    State(state): State<AppState>,
    Extension(member_id): Extension<MemberId>,
) -> ApiResult<Json<ProfileResponse>> {
    let roles = state
        .authorization_service
        .resolve_member_roles(member_id)
        .await
        .inspect_err(|lookup_error| {
            error!(uid = %member_id, error = %lookup_error, "failed to resolve member roles");
        })?;
    let authorized = state.authorization_service.grants_access(&roles);

    Ok(Json(ProfileResponse::new(member_id, authorized, roles)))
}
