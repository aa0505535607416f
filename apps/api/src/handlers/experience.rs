use std::str::FromStr;

use axum::Json;
use axum::extract::Path;
use chrono::{NaiveDate, Utc};
use hereiam_core::AppError;
use hereiam_domain::{Locale, experience};

use crate::dto::{ExperienceEntryResponse, ExperienceResponse};
use crate::error::ApiResult;

pub async fn experience_handler(
    Path(locale): Path<String>,
) -> ApiResult<Json<ExperienceResponse>> {
    let locale = Locale::from_str(&locale)?;

    Ok(Json(build_response(locale, Utc::now().date_naive())?))
}

fn build_response(locale: Locale, today: NaiveDate) -> ApiResult<ExperienceResponse> {
    let entries = experience::site_entries()
        .into_iter()
        .map(|entry| {
            let tenure = entry.tenure(today)?;
            Ok(ExperienceEntryResponse {
                company: entry.company,
                role: entry.role(locale),
                start: entry.start.to_string(),
                end: entry.end.map(|end| end.to_string()),
                tenure: tenure.localize(locale),
            })
        })
        .collect::<Result<Vec<_>, AppError>>()?;

    Ok(ExperienceResponse {
        locale: locale.to_string(),
        entries,
    })
}
