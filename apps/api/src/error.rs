use axum::Json;
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use hereiam_core::AppError;
use serde::Serialize;
use tracing::error;

/// One violated constraint in an error payload, mirroring the shape the
/// frontend form expects (`path` is the field path, one segment per level).
#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub path: Vec<String>,
    pub message: String,
}

/// The `details` field is either a human-readable hint (rate limiting) or
/// the list of violated constraints (validation).
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum ErrorDetails {
    Hint(&'static str),
    Fields(Vec<ErrorDetail>),
}

/// API error payload.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<ErrorDetails>,
}

/// HTTP API error wrapper around core application errors.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(value: AppError) -> Self {
        Self(value)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, payload) = match &self.0 {
            AppError::Validation(violations) => (
                StatusCode::BAD_REQUEST,
                ErrorResponse {
                    error: "Validation failed".to_owned(),
                    message: None,
                    details: Some(ErrorDetails::Fields(
                        violations
                            .iter()
                            .map(|violation| ErrorDetail {
                                path: vec![violation.field.clone()],
                                message: violation.message.clone(),
                            })
                            .collect(),
                    )),
                },
            ),
            AppError::MalformedRequest(_) | AppError::MissingRefreshToken => {
                (StatusCode::BAD_REQUEST, message_payload(&self.0))
            }
            AppError::Unauthorized(_) => (StatusCode::UNAUTHORIZED, message_payload(&self.0)),
            AppError::RateLimited { .. } => (
                StatusCode::TOO_MANY_REQUESTS,
                ErrorResponse {
                    error: "Too many requests".to_owned(),
                    message: None,
                    details: Some(ErrorDetails::Hint("Please try again later")),
                },
            ),
            AppError::AuthExchangeFailed { status } => {
                (provider_status(status.unwrap_or(502)), message_payload(&self.0))
            }
            AppError::RefreshFailed { status } => {
                (provider_status(*status), message_payload(&self.0))
            }
            AppError::UpstreamFailed { .. } => (StatusCode::BAD_GATEWAY, message_payload(&self.0)),
            AppError::DeliveryFailed(_) => {
                error!(cause = %self.0, "request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    server_error_payload("Failed to process submission", &self.0),
                )
            }
            AppError::ConfigurationMissing(_) | AppError::Internal(_) => {
                error!(cause = %self.0, "request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    server_error_payload("Internal server error", &self.0),
                )
            }
        };

        let mut response = (status, Json(payload)).into_response();

        if let AppError::RateLimited {
            retry_after_seconds,
        } = self.0
        {
            if let Ok(value) = HeaderValue::from_str(&retry_after_seconds.to_string()) {
                response.headers_mut().insert(header::RETRY_AFTER, value);
            }
        }

        response
    }
}

/// Standard API result type.
pub type ApiResult<T> = Result<T, ApiError>;

fn message_payload(error: &AppError) -> ErrorResponse {
    ErrorResponse {
        error: error.to_string(),
        message: None,
        details: None,
    }
}

fn server_error_payload(title: &str, error: &AppError) -> ErrorResponse {
    ErrorResponse {
        error: title.to_owned(),
        message: Some(error.to_string()),
        details: None,
    }
}

/// Maps a provider-reported status onto the response, falling back to 502
/// when the provider produced something unusable as a status code.
fn provider_status(status: u16) -> StatusCode {
    StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY)
}
