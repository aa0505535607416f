//! Environment-driven runtime configuration.
//!
//! Feature groups (email, spotify, github) are optional: leaving a group's
//! variables unset leaves that surface unconfigured, and requests hitting it
//! fail with `ConfigurationMissing`. A partially set group is a startup
//! error rather than a silent degradation.

use std::env;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;

use hereiam_core::AppError;
use tracing_subscriber::EnvFilter;

/// SMTP delivery settings.
#[derive(Debug, Clone)]
pub struct SmtpRuntimeConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    pub from_address: String,
}

/// Which email backend delivers contact notifications.
#[derive(Debug, Clone)]
pub enum EmailProviderConfig {
    Console,
    Smtp(SmtpRuntimeConfig),
    Resend { api_key: String, from_address: String },
}

/// OAuth application credentials for the music provider.
#[derive(Debug, Clone)]
pub struct SpotifyConfig {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_url: String,
    /// Playlist read by the recommendations surface. Optional even when the
    /// credentials are set.
    pub playlist_id: Option<String>,
}

/// Full API runtime configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub api_host: String,
    pub api_port: u16,
    pub site_url: String,
    pub cookie_secure: bool,
    pub contact_recipient: Option<String>,
    pub email_provider: EmailProviderConfig,
    pub spotify: Option<SpotifyConfig>,
    pub github_username: Option<String>,
    pub github_token: Option<String>,
    pub redis_url: Option<String>,
}

impl ApiConfig {
    /// Loads configuration from the process environment.
    pub fn load() -> Result<Self, AppError> {
        let api_host = env::var("API_HOST").unwrap_or_else(|_| "127.0.0.1".to_owned());
        let api_port = env::var("API_PORT")
            .ok()
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or(3001);

        let site_url = env::var("SITE_URL").unwrap_or_else(|_| "http://localhost:3000".to_owned());
        let cookie_secure = env::var("COOKIE_SECURE")
            .unwrap_or_else(|_| "false".to_owned())
            .eq_ignore_ascii_case("true");

        let contact_recipient = optional_env("CONTACT_RECIPIENT");

        let email_provider = match env::var("EMAIL_PROVIDER")
            .unwrap_or_else(|_| "console".to_owned())
            .as_str()
        {
            "console" => EmailProviderConfig::Console,
            "smtp" => {
                let port = required_non_empty_env("SMTP_PORT")?
                    .parse::<u16>()
                    .map_err(|error| {
                        AppError::ConfigurationMissing(format!("invalid SMTP_PORT: {error}"))
                    })?;
                EmailProviderConfig::Smtp(SmtpRuntimeConfig {
                    host: required_non_empty_env("SMTP_HOST")?,
                    port,
                    username: required_non_empty_env("SMTP_USERNAME")?,
                    password: required_non_empty_env("SMTP_PASSWORD")?,
                    from_address: required_non_empty_env("SMTP_FROM_ADDRESS")?,
                })
            }
            "resend" => EmailProviderConfig::Resend {
                api_key: required_non_empty_env("RESEND_API_KEY")?,
                from_address: required_non_empty_env("CONTACT_FROM_ADDRESS")?,
            },
            other => {
                return Err(AppError::ConfigurationMissing(format!(
                    "EMAIL_PROVIDER must be 'console', 'smtp' or 'resend', got '{other}'"
                )));
            }
        };

        let spotify = spotify_config()?;

        let github_username = optional_env("GITHUB_USERNAME");
        let github_token = optional_env("GITHUB_TOKEN");

        let redis_url = optional_env("REDIS_URL");

        Ok(Self {
            api_host,
            api_port,
            site_url,
            cookie_secure,
            contact_recipient,
            email_provider,
            spotify,
            github_username,
            github_token,
            redis_url,
        })
    }

    pub fn socket_address(&self) -> Result<SocketAddr, AppError> {
        let host = IpAddr::from_str(&self.api_host).map_err(|error| {
            AppError::Internal(format!("invalid API_HOST '{}': {error}", self.api_host))
        })?;
        Ok(SocketAddr::from((host, self.api_port)))
    }
}

fn spotify_config() -> Result<Option<SpotifyConfig>, AppError> {
    let client_id = optional_env("SPOTIFY_CLIENT_ID");
    let client_secret = optional_env("SPOTIFY_CLIENT_SECRET");
    let redirect_url = optional_env("SPOTIFY_REDIRECT_URL");

    match (client_id, client_secret, redirect_url) {
        (Some(client_id), Some(client_secret), Some(redirect_url)) => Ok(Some(SpotifyConfig {
            client_id,
            client_secret,
            redirect_url,
            playlist_id: optional_env("SPOTIFY_PLAYLIST_ID"),
        })),
        (None, None, None) => Ok(None),
        _ => Err(AppError::ConfigurationMissing(
            "SPOTIFY_CLIENT_ID, SPOTIFY_CLIENT_SECRET and SPOTIFY_REDIRECT_URL must be set together"
                .to_owned(),
        )),
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

fn optional_env(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
}

fn required_non_empty_env(name: &str) -> Result<String, AppError> {
    env::var(name)
        .ok()
        .map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
        .ok_or_else(|| AppError::ConfigurationMissing(format!("{name} is required")))
}
