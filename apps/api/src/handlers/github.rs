use axum::Json;
use axum::extract::State;
use hereiam_core::AppError;

use crate::dto::GithubStatsResponse;
use crate::error::ApiResult;
use crate::state::AppState;

pub async fn github_stats_handler(
    State(state): State<AppState>,
) -> ApiResult<Json<GithubStatsResponse>> {
    let github_service = state.github_service.as_ref().ok_or_else(|| {
        AppError::ConfigurationMissing("github username is not configured".to_owned())
    })?;

    let stats = github_service.stats().await?;

    Ok(Json(GithubStatsResponse::from(stats)))
}
