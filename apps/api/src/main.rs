//! Submission portal API composition root.

#![forbid(unsafe_code)]

mod api_config;
mod api_router;
mod auth;
mod dto;
mod error;
mod handlers;
mod middleware;
mod state;

use std::sync::Arc;

use subportal_application::{AuthorizationService, SubmissionService};
use subportal_core::AppError;
use subportal_infrastructure::{DiscordRoleDirectory, FilesystemSubmissionStore};
use tower_sessions::cookie::SameSite;
use tower_sessions::cookie::time::Duration;
use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer};
use tracing::info;

use crate::api_config::{ApiConfig, init_tracing};
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = ApiConfig::load()?;

    let http_client = reqwest::Client::builder()
        .user_agent(concat!("DiscordBot (subportal, ", env!("CARGO_PKG_VERSION"), ")"))
        .build()
        .map_err(|error| AppError::Internal(format!("failed to build http client: {error}")))?;

    info!("connecting discord bot...");
    let role_directory = Arc::new(DiscordRoleDirectory::new(
        http_client,
        config.discord_api_base_url.as_str(),
        config.discord_bot_token.clone(),
    ));
    let authorization_service = AuthorizationService::new(
        role_directory,
        config.community_id,
        config.authorized_role_names.clone(),
    );

    let submission_store = Arc::new(FilesystemSubmissionStore::new(
        config.submissions_dir.clone(),
    ));
    let submission_service =
        SubmissionService::new(submission_store, config.upload_max_buffered_bytes);

    let session_layer = SessionManagerLayer::new(MemoryStore::default())
        .with_secure(config.cookie_secure)
        .with_same_site(SameSite::Lax)
        .with_http_only(true)
        .with_expiry(Expiry::OnInactivity(Duration::days(7)));

    let app_state = AppState {
        authorization_service,
        submission_service,
    };
    let app = api_router::build_router(app_state, session_layer);

    let address = config.socket_address()?;
    let listener = tokio::net::TcpListener::bind(address)
        .await
        .map_err(|error| AppError::Internal(format!("failed to bind listener: {error}")))?;

    info!(
        %address,
        community_id = %config.community_id,
        submissions_dir = %config.submissions_dir.display(),
        authorized_roles = ?config.authorized_role_names.iter().collect::<Vec<_>>(),
        "subportal-api listening"
    );

    axum::serve(listener, app)
        .await
        .map_err(|error| AppError::Internal(format!("api server error: {error}")))
}
