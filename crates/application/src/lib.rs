//! Application services and ports.

#![forbid(unsafe_code)]

mod contact_service;
mod github_service;
mod rate_limit_service;
mod spotify_service;

pub use contact_service::{ContactService, EmailService};
pub use github_service::{GithubClient, GithubStats, GithubStatsService, GithubUser};
pub use rate_limit_service::{AttemptInfo, RateLimitRepository, RateLimitRule, RateLimitService};
pub use spotify_service::{SpotifyAuthClient, SpotifyAuthService};
