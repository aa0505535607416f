//! Infrastructure adapters for application ports.

#![forbid(unsafe_code)]

mod console_email_service;
mod github_http_client;
mod in_memory_rate_limit_repository;
mod redis_rate_limit_repository;
mod resend_email_service;
mod smtp_email_service;
mod spotify_http_client;

pub use console_email_service::ConsoleEmailService;
pub use github_http_client::GithubHttpClient;
pub use in_memory_rate_limit_repository::InMemoryRateLimitRepository;
pub use redis_rate_limit_repository::RedisRateLimitRepository;
pub use resend_email_service::ResendEmailService;
pub use smtp_email_service::{SmtpEmailConfig, SmtpEmailService};
pub use spotify_http_client::{SpotifyCredentials, SpotifyHttpClient};
