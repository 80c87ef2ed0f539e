//! Route modules and the assembled application router.

use axum::Router;

use crate::state::AppState;

pub mod draw;
pub mod health;
pub mod roster;

/// Returns the full application router, without middleware layers.
pub fn app_router() -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .nest("/api/v1/roster", roster::router())
        .nest("/api/v1/draw", draw::router())
}
