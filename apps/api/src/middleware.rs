use axum::Extension;
use axum::extract::{Request, State};
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::Response;
use hereiam_application::RateLimitRule;

use crate::error::ApiResult;
use crate::state::AppState;

/// Route-layer rate limiting. Runs before the handler, so a limited caller
/// never reaches body parsing or validation.
pub async fn rate_limit(
    State(state): State<AppState>,
    Extension(rule): Extension<RateLimitRule>,
    request: Request,
    next: Next,
) -> ApiResult<Response> {
    let key = client_address(request.headers());
    state.rate_limit_service.check_rate_limit(&rule, &key).await?;

    Ok(next.run(request).await)
}

/// Client address for rate-limit keying. Behind the reverse proxy the first
/// `X-Forwarded-For` entry is the caller; without one the requests share the
/// "unknown" bucket.
pub fn client_address(headers: &HeaderMap) -> String {
    headers
        .get("x-forwarded-for")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(',').next())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .unwrap_or("unknown")
        .to_owned()
}
