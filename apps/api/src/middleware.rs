use axum::extract::{Extension, Request, State};
use axum::middleware::Next;
use axum::response::Response;
use subportal_core::{AppError, AppResult, MemberId};
use tower_sessions::Session;
use tracing::{error, warn};

use crate::auth::SESSION_MEMBER_KEY;
use crate::error::ApiResult;
use crate::state::AppState;

pub async fn require_auth(
    session: Session,
    mut request: Request,
    next: Next,
) -> ApiResult<Response> {
    let member_id = session
        .get::<MemberId>(SESSION_MEMBER_KEY)
        .await
        .map_err(|error| AppError::Internal(format!("failed to read session identity: {error}")))?
        .ok_or_else(|| AppError::Unauthorized("authentication required".to_owned()))?;

    request.extensions_mut().insert(member_id);
    Ok(next.run(request).await)
}

pub async fn require_authorized_member(
    State(state): State<AppState>,
    Extension(member_id): Extension<MemberId>,
    request: Request,
    next: Next,
) -> ApiResult<Response> {
    let decision = state.authorization_service.is_authorized(member_id).await;
    enforce_decision(member_id, decision)?;

    Ok(next.run(request).await)
}

/// Turns an authorization outcome into allow or deny.
///
/// An error means the decision is unknown and always denies.
fn enforce_decision(member_id: MemberId, decision: AppResult<bool>) -> AppResult<()> {
    match decision {
        Ok(true) => Ok(()),
        Ok(false) => {
            warn!(uid = %member_id, "user holds no authorized role");
            Err(AppError::Forbidden(
                "you do not hold a role that grants access to this site".to_owned(),
            ))
        }
        Err(decision_error) => {
            error!(uid = %member_id, error = %decision_error, "authorization check failed");
            Err(AppError::Forbidden(
                "authorization could not be verified, try again later".to_owned(),
            ))
        }
    }
}
