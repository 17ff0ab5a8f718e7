//! HTTP surface for the triage engine.
//!
//! Three routes: `POST /triage`, `POST /ai/extract_local` and
//! `GET /health`. The router is composable: `triage_router()` returns a
//! `Router` that can be mounted on any axum server instance.

pub mod endpoints;
pub mod error;
pub mod router;
pub mod server;
pub mod types;

pub use router::triage_router;
pub use server::{serve, ServerError};
pub use types::ApiContext;
