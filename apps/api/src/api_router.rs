use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::middleware::{from_fn, from_fn_with_state};
use axum::routing::{get, post};
use tower_http::trace::TraceLayer;
use tower_sessions::{SessionManagerLayer, SessionStore};

use crate::state::AppState;
use crate::{auth, handlers, middleware};

pub fn build_router<Store>(app_state: AppState, session_layer: SessionManagerLayer<Store>) -> Router
where
    Store: SessionStore + Clone,
{
    let protected_routes =
        member_routes(app_state.clone()).route_layer(from_fn(middleware::require_auth));

    Router::new()
        .route("/api/health", get(handlers::health::health_handler))
        .route("/logout", get(auth::logout_handler))
        .merge(protected_routes)
        .layer(TraceLayer::new_for_http())
        .layer(session_layer)
        .with_state(app_state)
}

/// Routes that expect a `MemberId` request extension and an allow-listed role.
pub(crate) fn member_routes(app_state: AppState) -> Router<AppState> {
    // Upload bodies stream to disk, so the default body cap does not apply.
    Router::new()
        .route("/api/profile", get(handlers::profile::profile_handler))
        .route(
            "/submission-receiver",
            post(handlers::submissions::submission_receiver_handler)
                .layer(DefaultBodyLimit::disable()),
        )
        .route_layer(from_fn_with_state(
            app_state,
            middleware::require_authorized_member,
        ))
}

#[cfg(test)]
mod tests;
