use axum::extract::State;
use axum::Json;

use crate::api::types::{ApiContext, HealthResponse};

/// `GET /health`: liveness plus classifier availability.
pub async fn check(State(ctx): State<ApiContext>) -> Json<HealthResponse> {
    let status = ctx.core.health();

    Json(HealthResponse {
        status: "ok",
        version: crate::config::APP_VERSION,
        models_loaded: status.models_loaded,
        models_expected: status.models_expected,
        model_errors: status.model_errors,
    })
}
