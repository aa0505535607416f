//! GitHub activity aggregation for the portfolio widget.

use std::sync::Arc;

use async_trait::async_trait;

use hereiam_core::AppResult;

/// Profile counters from the user endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GithubUser {
    /// Public repository count.
    pub public_repos: u64,
    /// Follower count.
    pub followers: u64,
}

/// Aggregated activity shown on the site.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GithubStats {
    /// Public repository count.
    pub repos: u64,
    /// Follower count.
    pub followers: u64,
    /// Stargazers summed over the user's repositories.
    pub stars: u64,
    /// Push events in the recent public event feed, a rough contribution
    /// signal rather than an exact count.
    pub contributions: u64,
}

/// Port for the code-hosting API.
#[async_trait]
pub trait GithubClient: Send + Sync {
    /// Fetches the user's profile counters.
    async fn fetch_user(&self, username: &str) -> AppResult<GithubUser>;

    /// Sums stargazers over the user's repositories.
    async fn fetch_total_stars(&self, username: &str) -> AppResult<u64>;

    /// Counts push events in the user's recent public events.
    async fn fetch_push_event_count(&self, username: &str) -> AppResult<u64>;
}

/// Application service aggregating the widget's numbers.
#[derive(Clone)]
pub struct GithubStatsService {
    client: Arc<dyn GithubClient>,
    username: String,
}

impl GithubStatsService {
    /// Creates the service for the configured profile.
    #[must_use]
    pub fn new(client: Arc<dyn GithubClient>, username: impl Into<String>) -> Self {
        Self {
            client,
            username: username.into(),
        }
    }

    /// Collects the stats for the configured username.
    pub async fn stats(&self) -> AppResult<GithubStats> {
        let user = self.client.fetch_user(&self.username).await?;
        let stars = self.client.fetch_total_stars(&self.username).await?;
        let contributions = self.client.fetch_push_event_count(&self.username).await?;

        Ok(GithubStats {
            repos: user.public_repos,
            followers: user.followers,
            stars,
            contributions,
        })
    }
}
