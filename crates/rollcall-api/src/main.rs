//! Rollcall API server entry point.

use std::sync::{Arc, Mutex};

use rollcall_api::config::AppConfig;
use rollcall_api::error::AppError;
use rollcall_api::roster_file::YamlRosterFile;
use rollcall_api::routes;
use rollcall_api::state::AppState;
use rollcall_core::clock::SystemClock;
use rollcall_core::rng::SystemRng;
use rollcall_draw::application::animator::SharedRng;
use rollcall_draw::application::command_handlers;
use rollcall_draw::domain::commands::StopDraw;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // Initialize tracing subscriber.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .json()
        .init();

    tracing::info!("Starting Rollcall API server");

    let config = AppConfig::from_env()?;

    // Build application state.
    let source = YamlRosterFile::new(&config.roster_file);
    tracing::info!(path = %source.path().display(), "loading roster");
    let rng: SharedRng = Arc::new(Mutex::new(SystemRng::new()));
    let app_state = AppState::load(&source, &config, Arc::new(SystemClock), rng).await?;
    let animator = Arc::clone(&app_state.animator);

    // TODO: Replace CorsLayer::permissive() with restricted origins for production.
    let app = routes::app_router()
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(app_state);

    let addr = config.bind_addr()?;
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // Release the animation timer of a draw still in flight.
    let stop = StopDraw {
        correlation_id: Uuid::new_v4(),
    };
    if command_handlers::handle_stop_draw(&stop, &animator).await? {
        tracing::info!("cancelled draw in flight at shutdown");
    }

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutting down");
}
