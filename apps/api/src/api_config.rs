use std::env;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::str::FromStr;

use subportal_application::DEFAULT_MAX_BUFFERED_BYTES;
use subportal_core::{AppError, CommunityId};
use subportal_domain::AuthorizedRoleNames;
use tracing_subscriber::EnvFilter;
use url::Url;

const DEFAULT_DISCORD_API_BASE_URL: &str = "https://discord.com/api/v10";

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub api_host: String,
    pub api_port: u16,
    pub discord_bot_token: String,
    pub discord_api_base_url: Url,
    pub community_id: CommunityId,
    pub authorized_role_names: AuthorizedRoleNames,
    pub submissions_dir: PathBuf,
    pub upload_max_buffered_bytes: usize,
    pub cookie_secure: bool,
}

impl ApiConfig {
    pub fn load() -> Result<Self, AppError> {
        let api_host = env::var("API_HOST").unwrap_or_else(|_| "127.0.0.1".to_owned());
        let api_port = env::var("API_PORT")
            .ok()
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or(8730);

        let discord_bot_token = required_non_empty_env("DISCORD_BOT_TOKEN")?;
        let discord_api_base_url = env::var("DISCORD_API_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_DISCORD_API_BASE_URL.to_owned());
        let discord_api_base_url = Url::parse(&discord_api_base_url).map_err(|error| {
            AppError::Validation(format!("invalid DISCORD_API_BASE_URL: {error}"))
        })?;

        let community_id = CommunityId::from_str(&required_non_empty_env("COMMUNITY_ID")?)?;

        let authorized_role_names = match env::var("AUTHORIZED_ROLE_NAMES") {
            Ok(value) if !value.trim().is_empty() => AuthorizedRoleNames::from_csv(&value)?,
            _ => AuthorizedRoleNames::default(),
        };

        let submissions_dir = env::var("SUBMISSIONS_DIR")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("submissions"));

        let upload_max_buffered_bytes = match env::var("UPLOAD_MAX_BUFFERED_BYTES") {
            Ok(value) => value.parse::<usize>().map_err(|error| {
                AppError::Validation(format!("invalid UPLOAD_MAX_BUFFERED_BYTES: {error}"))
            })?,
            Err(_) => DEFAULT_MAX_BUFFERED_BYTES,
        };

        let cookie_secure = env::var("SESSION_COOKIE_SECURE")
            .unwrap_or_else(|_| "false".to_owned())
            .eq_ignore_ascii_case("true");

        Ok(Self {
            api_host,
            api_port,
            discord_bot_token,
            discord_api_base_url,
            community_id,
            authorized_role_names,
            submissions_dir,
            upload_max_buffered_bytes,
            cookie_secure,
        })
    }

    pub fn socket_address(&self) -> Result<SocketAddr, AppError> {
        let host = IpAddr::from_str(&self.api_host).map_err(|error| {
            AppError::Internal(format!("invalid API_HOST '{}': {error}", self.api_host))
        })?;
        Ok(SocketAddr::from((host, self.api_port)))
    }
}

pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .init();
}

fn required_env(name: &str) -> Result<String, AppError> {
    env::var(name).map_err(|_| AppError::Validation(format!("{name} is required")))
}

fn required_non_empty_env(name: &str) -> Result<String, AppError> {
    let value = required_env(name)?;
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{name} must not be empty")));
    }

    Ok(value)
}
