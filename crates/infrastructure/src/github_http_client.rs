//! HTTP adapter for the GitHub REST API.
//!
//! GitHub rejects requests without a User-Agent, and rate-limits anonymous
//! callers aggressively, so an optional token can be attached to every call.

use async_trait::async_trait;
use hereiam_application::{GithubClient, GithubUser};
use hereiam_core::{AppError, AppResult};
use serde::Deserialize;

const DEFAULT_BASE_URL: &str = "https://api.github.com";
const USER_AGENT: &str = "hereiam-portfolio";

#[derive(Deserialize)]
struct UserResponse {
    public_repos: u64,
    followers: u64,
}

#[derive(Deserialize)]
struct RepoResponse {
    stargazers_count: u64,
}

#[derive(Deserialize)]
struct EventResponse {
    #[serde(rename = "type")]
    event_type: String,
}

/// Reqwest implementation of the GitHub port.
#[derive(Clone)]
pub struct GithubHttpClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl GithubHttpClient {
    /// Creates a client against the production host.
    pub fn new(token: Option<String>) -> AppResult<Self> {
        Self::with_base_url(DEFAULT_BASE_URL, token)
    }

    /// Creates a client against a custom host (used by tests).
    pub fn with_base_url(base_url: impl Into<String>, token: Option<String>) -> AppResult<Self> {
        let http = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|error| {
                AppError::Internal(format!("failed to build github client: {error}"))
            })?;

        Ok(Self {
            http,
            base_url: base_url.into(),
            token: token.filter(|token| !token.is_empty()),
        })
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        context: &str,
    ) -> AppResult<T> {
        let mut request = self.http.get(format!("{}{path}", self.base_url));
        if let Some(token) = &self.token {
            request = request.header("Authorization", format!("token {token}"));
        }

        let response = request.send().await.map_err(|error| {
            AppError::Internal(format!("github call failed ({context}): {error}"))
        })?;

        if !response.status().is_success() {
            return Err(AppError::UpstreamFailed {
                status: response.status().as_u16(),
                context: format!("github {context}"),
            });
        }

        response.json().await.map_err(|error| {
            AppError::Internal(format!("invalid github response ({context}): {error}"))
        })
    }
}

#[async_trait]
impl GithubClient for GithubHttpClient {
    async fn fetch_user(&self, username: &str) -> AppResult<GithubUser> {
        let user: UserResponse = self.get_json(&format!("/users/{username}"), "user").await?;

        Ok(GithubUser {
            public_repos: user.public_repos,
            followers: user.followers,
        })
    }

    async fn fetch_total_stars(&self, username: &str) -> AppResult<u64> {
        let repos: Vec<RepoResponse> = self
            .get_json(&format!("/users/{username}/repos"), "repos")
            .await?;

        Ok(repos.iter().map(|repo| repo.stargazers_count).sum())
    }

    async fn fetch_push_event_count(&self, username: &str) -> AppResult<u64> {
        let events: Vec<EventResponse> = self
            .get_json(&format!("/users/{username}/events"), "events")
            .await?;

        Ok(events
            .iter()
            .filter(|event| event.event_type == "PushEvent")
            .count() as u64)
    }
}
