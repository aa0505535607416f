//! HereIAm API composition root.

#![forbid(unsafe_code)]

mod api_config;
mod api_router;
mod dto;
mod error;
mod handlers;
mod middleware;
mod state;

use std::sync::Arc;

use hereiam_application::{
    ContactService, EmailService, GithubStatsService, RateLimitRepository, RateLimitService,
    SpotifyAuthService,
};
use hereiam_core::AppError;
use hereiam_domain::Translations;
use hereiam_infrastructure::{
    ConsoleEmailService, GithubHttpClient, InMemoryRateLimitRepository, RedisRateLimitRepository,
    ResendEmailService, SmtpEmailConfig, SmtpEmailService, SpotifyCredentials, SpotifyHttpClient,
};
use tracing::info;

use crate::api_config::{ApiConfig, EmailProviderConfig};
use crate::state::{AppState, CookiePolicy};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    api_config::init_tracing();

    let config = ApiConfig::load()?;

    let rate_limit_repository: Arc<dyn RateLimitRepository> = match &config.redis_url {
        Some(redis_url) => {
            let client = redis::Client::open(redis_url.as_str()).map_err(|error| {
                AppError::Internal(format!("failed to create redis client: {error}"))
            })?;
            Arc::new(RedisRateLimitRepository::new(client, "hereiam:rate_limit"))
        }
        None => {
            info!("REDIS_URL not set, rate limiting is process-local");
            Arc::new(InMemoryRateLimitRepository::new())
        }
    };
    let rate_limit_service = RateLimitService::new(rate_limit_repository);

    let email_service: Arc<dyn EmailService> = match &config.email_provider {
        EmailProviderConfig::Console => Arc::new(ConsoleEmailService::new()),
        EmailProviderConfig::Smtp(smtp) => Arc::new(SmtpEmailService::new(SmtpEmailConfig {
            host: smtp.host.clone(),
            port: smtp.port,
            username: smtp.username.clone(),
            password: smtp.password.clone(),
            from_address: smtp.from_address.clone(),
        })),
        EmailProviderConfig::Resend {
            api_key,
            from_address,
        } => Arc::new(ResendEmailService::new(api_key, from_address.as_str())),
    };
    let contact_service = config
        .contact_recipient
        .as_ref()
        .map(|recipient| ContactService::new(email_service, recipient.as_str()));

    let spotify_service = config.spotify.as_ref().map(|spotify| {
        let client = SpotifyHttpClient::new(SpotifyCredentials {
            client_id: spotify.client_id.clone(),
            client_secret: spotify.client_secret.clone(),
            redirect_uri: spotify.redirect_url.clone(),
        });
        let service = SpotifyAuthService::new(
            Arc::new(client),
            spotify.client_id.clone(),
            spotify.redirect_url.clone(),
        );
        match &spotify.playlist_id {
            Some(playlist_id) => service.with_recommendations_playlist(playlist_id.clone()),
            None => service,
        }
    });

    let github_service = config
        .github_username
        .as_ref()
        .map(|username| -> Result<GithubStatsService, AppError> {
            let client = GithubHttpClient::new(config.github_token.clone())?;
            Ok(GithubStatsService::new(Arc::new(client), username.as_str()))
        })
        .transpose()?;

    let app_state = AppState {
        contact_service,
        rate_limit_service,
        spotify_service,
        github_service,
        translations: Arc::new(Translations::built_in()),
        cookie_policy: CookiePolicy {
            secure: config.cookie_secure,
        },
        site_url: config.site_url.clone(),
    };

    let app = api_router::build_router(app_state)?;

    let address = config.socket_address()?;
    let listener = tokio::net::TcpListener::bind(address)
        .await
        .map_err(|error| AppError::Internal(format!("failed to bind listener: {error}")))?;

    info!(%address, "hereiam-api listening");

    axum::serve(listener, app)
        .await
        .map_err(|error| AppError::Internal(format!("api server error: {error}")))
}
