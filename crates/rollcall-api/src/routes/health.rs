//! Liveness endpoint.

use axum::extract::State;
use axum::{Json, Router, routing::get};
use rollcall_draw::application::query_handlers;
use serde::Serialize;

use crate::state::AppState;

/// Body of GET /health.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// `"ok"`, or `"degraded"` when session state cannot be read.
    pub status: &'static str,
    /// Crate version.
    pub version: &'static str,
    /// Names loaded at startup, when session state is readable.
    pub roster_size: Option<usize>,
}

/// GET /health
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let roster_size = query_handlers::get_roster_view(&state.animator)
        .ok()
        .map(|view| view.size);

    Json(HealthResponse {
        status: if roster_size.is_some() { "ok" } else { "degraded" },
        version: env!("CARGO_PKG_VERSION"),
        roster_size,
    })
}

/// Returns the health check router.
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
