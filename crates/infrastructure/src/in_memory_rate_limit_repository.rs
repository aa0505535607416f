//! Process-local rate limit repository.
//!
//! Fixed-window counters in a map guarded by an async lock. Entries are
//! created on first sight of a key and reset in place when their window has
//! elapsed; they are never evicted, so the map grows for the lifetime of the
//! process. Adequate as a single-instance fallback when no redis is
//! configured; multi-instance deployments need the redis adapter.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use hereiam_application::{AttemptInfo, RateLimitRepository};
use hereiam_core::{AppError, AppResult};
use tokio::sync::RwLock;

#[derive(Debug, Clone, Copy)]
struct WindowEntry {
    count: i32,
    window_started_at: DateTime<Utc>,
}

/// In-memory implementation of the rate limit repository port.
#[derive(Debug, Default)]
pub struct InMemoryRateLimitRepository {
    entries: RwLock<HashMap<String, WindowEntry>>,
}

impl InMemoryRateLimitRepository {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }
}

#[async_trait]
impl RateLimitRepository for InMemoryRateLimitRepository {
    async fn record_attempt(
        &self,
        key: &str,
        window_duration_seconds: i64,
    ) -> AppResult<AttemptInfo> {
        if window_duration_seconds <= 0 {
            return Err(AppError::Internal(
                "rate limit window must be greater than zero".to_owned(),
            ));
        }

        let now = Utc::now();
        let window = Duration::seconds(window_duration_seconds);

        let mut entries = self.entries.write().await;
        let entry = entries
            .entry(key.to_owned())
            .and_modify(|entry| {
                if now - entry.window_started_at > window {
                    entry.count = 0;
                    entry.window_started_at = now;
                }
                entry.count += 1;
            })
            .or_insert(WindowEntry {
                count: 1,
                window_started_at: now,
            });

        Ok(AttemptInfo {
            attempt_count: entry.count,
            window_started_at: entry.window_started_at,
        })
    }
}
