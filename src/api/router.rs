//! Triage API router.
//!
//! Returns a composable `Router` that can be mounted on any axum server.
//! CORS is fully permissive.

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::api::endpoints;
use crate::api::types::ApiContext;
use crate::core_state::CoreState;

/// Build the triage API router.
pub fn triage_router(core: Arc<CoreState>) -> Router {
    let ctx = ApiContext::new(core);

    Router::new()
        .route("/triage", post(endpoints::triage::decide))
        .route("/ai/extract_local", post(endpoints::extract::extract))
        .route("/health", get(endpoints::health::check))
        .with_state(ctx)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
