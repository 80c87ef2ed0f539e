//! Routes for browsing and sampling the roster.

use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use rollcall_draw::application::query_handlers::{self, RosterView};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::error::ApiError;
use crate::state::AppState;

/// Request body for POST /sample.
#[derive(Debug, Deserialize)]
pub struct SampleRequest {
    /// How many names to draw. Values below one yield an empty sample.
    pub count: i64,
}

/// Response body for POST /sample.
#[derive(Debug, Serialize)]
pub struct SampleResponse {
    /// Sampled names in selection order.
    pub names: Vec<String>,
}

/// GET /
#[instrument(skip(state))]
async fn get_roster(State(state): State<AppState>) -> Result<Json<RosterView>, ApiError> {
    let view = query_handlers::get_roster_view(&state.animator)?;
    Ok(Json(view))
}

/// POST /sample
#[instrument(skip(state, request), fields(count = request.count))]
async fn sample(
    State(state): State<AppState>,
    Json(request): Json<SampleRequest>,
) -> Result<Json<SampleResponse>, ApiError> {
    let count = usize::try_from(request.count).unwrap_or(0);
    let names = query_handlers::sample_names(&state.animator, count)?;
    Ok(Json(SampleResponse { names }))
}

/// Returns the router for the roster.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_roster))
        .route("/sample", post(sample))
}
