//! Rate limiting port and application service.
//!
//! Fixed-window limiting behind a repository capability so the same policy
//! works against the in-memory fallback on a single instance and against
//! redis when several instances share the budget. The limiter is advisory,
//! not security-critical; a benign over- or undercount under concurrent hits
//! from one address is acceptable.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use hereiam_core::{AppError, AppResult};

/// Repository port for windowed request counters.
#[async_trait]
pub trait RateLimitRepository: Send + Sync {
    /// Records an attempt for the given key.
    ///
    /// If the key's window has elapsed, the counter resets and a new window
    /// starts at `now`. Returns the attempt count within the active window,
    /// including this attempt.
    async fn record_attempt(
        &self,
        key: &str,
        window_duration_seconds: i64,
    ) -> AppResult<AttemptInfo>;
}

/// State of the active window for one key.
#[derive(Debug, Clone)]
pub struct AttemptInfo {
    /// Attempts in the current window, including the one just recorded.
    pub attempt_count: i32,
    /// When the current window started.
    pub window_started_at: DateTime<Utc>,
}

/// Configuration for one rate limit rule.
#[derive(Debug, Clone)]
pub struct RateLimitRule {
    /// Route category used as the key prefix (e.g. "contact").
    pub category: String,
    /// Maximum attempts allowed in the window.
    pub max_attempts: i32,
    /// Window duration in seconds.
    pub window_seconds: i64,
}

impl RateLimitRule {
    /// Creates a rule.
    #[must_use]
    pub fn new(category: impl Into<String>, max_attempts: i32, window_seconds: i64) -> Self {
        Self {
            category: category.into(),
            max_attempts,
            window_seconds,
        }
    }
}

/// Application service for rate limiting.
#[derive(Clone)]
pub struct RateLimitService {
    repository: Arc<dyn RateLimitRepository>,
}

impl RateLimitService {
    /// Creates a new rate limit service.
    #[must_use]
    pub fn new(repository: Arc<dyn RateLimitRepository>) -> Self {
        Self { repository }
    }

    /// Records an attempt for `key` under `rule` and enforces the limit.
    ///
    /// Returns `Ok(())` while the caller is within budget. Once the budget
    /// is exceeded the result is `AppError::RateLimited` carrying the
    /// seconds remaining until the window resets.
    pub async fn check_rate_limit(&self, rule: &RateLimitRule, key: &str) -> AppResult<()> {
        let composite_key = format!("{}:{key}", rule.category);
        let info = self
            .repository
            .record_attempt(&composite_key, rule.window_seconds)
            .await?;

        if info.attempt_count > rule.max_attempts {
            let elapsed = (Utc::now() - info.window_started_at).num_seconds().max(0);
            let remaining = rule.window_seconds.saturating_sub(elapsed).max(1);

            return Err(AppError::RateLimited {
                retry_after_seconds: u64::try_from(remaining).unwrap_or(1),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicI32, Ordering};

    use async_trait::async_trait;
    use chrono::{Duration, Utc};
    use hereiam_core::{AppError, AppResult};

    use super::{AttemptInfo, RateLimitRepository, RateLimitRule, RateLimitService};

    struct CountingRepository {
        counter: AtomicI32,
        window_age_seconds: i64,
    }

    #[async_trait]
    impl RateLimitRepository for CountingRepository {
        async fn record_attempt(
            &self,
            _key: &str,
            _window_duration_seconds: i64,
        ) -> AppResult<AttemptInfo> {
            Ok(AttemptInfo {
                attempt_count: self.counter.fetch_add(1, Ordering::SeqCst) + 1,
                window_started_at: Utc::now() - Duration::seconds(self.window_age_seconds),
            })
        }
    }

    #[tokio::test]
    async fn sixth_attempt_in_window_is_rejected() {
        let repository = Arc::new(CountingRepository {
            counter: AtomicI32::new(0),
            window_age_seconds: 0,
        });
        let service = RateLimitService::new(repository);
        let rule = RateLimitRule::new("contact", 5, 3600);

        for attempt in 1..=5 {
            let outcome = service.check_rate_limit(&rule, "203.0.113.9").await;
            assert!(outcome.is_ok(), "attempt {attempt} should pass");
        }

        let rejected = service.check_rate_limit(&rule, "203.0.113.9").await;
        match rejected {
            Err(AppError::RateLimited {
                retry_after_seconds,
            }) => {
                assert!(retry_after_seconds <= 3600);
                assert!(retry_after_seconds >= 3599);
            }
            other => panic!("expected rate limit rejection, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn retry_hint_shrinks_with_window_age() {
        let repository = Arc::new(CountingRepository {
            counter: AtomicI32::new(100),
            window_age_seconds: 3000,
        });
        let service = RateLimitService::new(repository);
        let rule = RateLimitRule::new("contact", 5, 3600);

        let rejected = service.check_rate_limit(&rule, "203.0.113.9").await;
        match rejected {
            Err(AppError::RateLimited {
                retry_after_seconds,
            }) => {
                assert!(retry_after_seconds <= 600);
                assert!(retry_after_seconds >= 1);
            }
            other => panic!("expected rate limit rejection, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn key_is_prefixed_with_the_rule_category() {
        struct KeyCapture {
            seen: tokio::sync::Mutex<Vec<String>>,
        }

        #[async_trait]
        impl RateLimitRepository for KeyCapture {
            async fn record_attempt(
                &self,
                key: &str,
                _window_duration_seconds: i64,
            ) -> AppResult<AttemptInfo> {
                self.seen.lock().await.push(key.to_owned());
                Ok(AttemptInfo {
                    attempt_count: 1,
                    window_started_at: Utc::now(),
                })
            }
        }

        let repository = Arc::new(KeyCapture {
            seen: tokio::sync::Mutex::new(Vec::new()),
        });
        let service = RateLimitService::new(repository.clone());
        let rule = RateLimitRule::new("contact", 5, 3600);

        let outcome = service.check_rate_limit(&rule, "198.51.100.4").await;
        assert!(outcome.is_ok());

        let seen = repository.seen.lock().await;
        assert_eq!(seen.as_slice(), ["contact:198.51.100.4"]);
    }
}
