use axum::body::Bytes;
use axum::extract::State;
use axum::Json;

use crate::api::error::ApiError;
use crate::api::types::{extract_text, lenient_json, ApiContext};
use crate::models::SymptomRecord;

/// `POST /ai/extract_local`: free text to a partial symptom record.
///
/// Only resolved fields appear in the response.
pub async fn extract(
    State(ctx): State<ApiContext>,
    body: Bytes,
) -> Result<Json<SymptomRecord>, ApiError> {
    let text = extract_text(&lenient_json(&body));
    let record = ctx.core.extract_bounded(text).await?;
    Ok(Json(record))
}
