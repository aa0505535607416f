use axum::Json;
use axum::extract::State;
use hereiam_core::AppError;
use hereiam_domain::contact::ContactInput;

use crate::dto::ContactSuccessResponse;
use crate::error::ApiResult;
use crate::state::AppState;

pub async fn submit_contact_handler(
    State(state): State<AppState>,
    Json(input): Json<ContactInput>,
) -> ApiResult<Json<ContactSuccessResponse>> {
    let contact_service = state.contact_service.as_ref().ok_or_else(|| {
        AppError::ConfigurationMissing("contact email delivery is not configured".to_owned())
    })?;

    contact_service.submit(input).await?;

    Ok(Json(ContactSuccessResponse {
        success: true,
        message: "Message sent successfully",
    }))
}
