use std::str::FromStr;

use axum::Json;
use axum::extract::{Path, State};
use hereiam_domain::Locale;

use crate::dto::LocaleDictionaryResponse;
use crate::error::ApiResult;
use crate::state::AppState;

pub async fn locale_dictionary_handler(
    State(state): State<AppState>,
    Path(locale): Path<String>,
) -> ApiResult<Json<LocaleDictionaryResponse>> {
    let locale = Locale::from_str(&locale)?;

    Ok(Json(LocaleDictionaryResponse {
        locale: locale.to_string(),
        messages: state.translations.for_locale(locale),
    }))
}
