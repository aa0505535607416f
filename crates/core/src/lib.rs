//! Shared primitives for all Rust crates in the HereIAm backend.

#![forbid(unsafe_code)]

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type used across HereIAm crates.
pub type AppResult<T> = Result<T, AppError>;

/// A single violated input constraint, keyed by the offending field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldViolation {
    /// Name of the field that failed validation.
    pub field: String,
    /// Human-readable description of the violated constraint.
    pub message: String,
}

impl FieldViolation {
    /// Creates a violation for one field.
    #[must_use]
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Common application error categories.
///
/// Every failure a request handler can produce maps to exactly one variant,
/// and the API layer maps each variant to a distinct HTTP status.
#[derive(Debug, Error)]
pub enum AppError {
    /// Client input violated one or more field constraints.
    #[error("validation failed: {}", format_violations(.0))]
    Validation(Vec<FieldViolation>),

    /// A required request parameter is missing or unreadable.
    #[error("malformed request: {0}")]
    MalformedRequest(String),

    /// A refresh was requested without presenting a refresh token.
    #[error("refresh token is required")]
    MissingRefreshToken,

    /// Caller lacks the credential the operation requires.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// Caller exceeded the request budget for the current window.
    #[error("too many requests, retry after {retry_after_seconds} seconds")]
    RateLimited {
        /// Seconds remaining until the caller's window resets.
        retry_after_seconds: u64,
    },

    /// A deployment-level setting the operation depends on is absent.
    #[error("configuration missing: {0}")]
    ConfigurationMissing(String),

    /// The outbound email call failed or was rejected.
    #[error("email delivery failed: {0}")]
    DeliveryFailed(String),

    /// The provider rejected the authorization-code exchange.
    #[error("authorization code exchange failed with provider status {status:?}")]
    AuthExchangeFailed {
        /// HTTP status reported by the provider, if the call got that far.
        status: Option<u16>,
    },

    /// The provider rejected the refresh-token grant.
    #[error("token refresh failed with provider status {status}")]
    RefreshFailed {
        /// HTTP status reported by the provider.
        status: u16,
    },

    /// An upstream collaborator other than the token endpoint failed.
    #[error("upstream call failed ({context}): status {status}")]
    UpstreamFailed {
        /// HTTP status reported upstream.
        status: u16,
        /// Which collaborator failed.
        context: String,
    },

    /// Internal unexpected error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Creates a validation error for a single field.
    #[must_use]
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation(vec![FieldViolation::new(field, message)])
    }
}

fn format_violations(violations: &[FieldViolation]) -> String {
    violations
        .iter()
        .map(|violation| format!("{}: {}", violation.field, violation.message))
        .collect::<Vec<_>>()
        .join("; ")
}
