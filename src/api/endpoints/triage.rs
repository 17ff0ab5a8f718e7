use axum::body::Bytes;
use axum::extract::State;
use axum::Json;

use crate::api::types::{lenient_json, ApiContext, TriageResponse};
use crate::models::SymptomRecord;

/// `POST /triage`: decide urgency for a structured report.
///
/// Unreadable bodies and unknown field values are treated as absent.
pub async fn decide(State(ctx): State<ApiContext>, body: Bytes) -> Json<TriageResponse> {
    let record = SymptomRecord::from_lenient_json(&lenient_json(&body));
    let result = ctx.core.triage(&record);

    tracing::info!(
        level = result.level.as_str(),
        call_now = result.call_now,
        "Triage decided"
    );

    Json(TriageResponse::new(&record, result))
}
