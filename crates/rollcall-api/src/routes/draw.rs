//! Routes for the Draw context.

use std::convert::Infallible;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::sse::{Event, KeepAlive, Sse};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use rollcall_core::event::{DomainEvent, EventMetadata};
use rollcall_draw::application::animator::StartOutcome;
use rollcall_draw::application::command_handlers;
use rollcall_draw::application::query_handlers::{self, DrawView};
use rollcall_draw::domain::commands;
use rollcall_draw::domain::events::DrawEvent;
use serde::{Deserialize, Serialize};
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::wrappers::errors::BroadcastStreamRecvError;
use tokio_stream::{Stream, StreamExt};
use tracing::{instrument, warn};
use uuid::Uuid;

use crate::error::ApiError;
use crate::state::AppState;

/// Request body for PUT /pick-count.
#[derive(Debug, Deserialize)]
pub struct SetPickCountRequest {
    /// Requested count; clamped to the roster bounds.
    pub pick_count: i64,
}

/// Request body for PUT /hide-mode.
#[derive(Debug, Deserialize)]
pub struct SetHideModeRequest {
    /// Whether drawn names should be masked.
    pub hide_names: bool,
}

/// Request body for POST /reveal.
#[derive(Debug, Deserialize)]
pub struct RevealRequest {
    /// The drawn name to reveal.
    pub name: String,
}

/// Response body for POST /start.
#[derive(Debug, Serialize)]
pub struct StartResponse {
    /// `"started"` or `"ignored"`.
    pub status: &'static str,
    /// The new draw, when one was started.
    pub draw_id: Option<Uuid>,
}

/// Response body for POST /reveal.
#[derive(Debug, Serialize)]
pub struct RevealResponse {
    /// Whether the name was newly revealed.
    pub revealed: bool,
    /// The session after revealing.
    pub view: DrawView,
}

/// GET /
#[instrument(skip(state))]
async fn get_draw(State(state): State<AppState>) -> Result<Json<DrawView>, ApiError> {
    let view = query_handlers::get_draw_view(&state.animator)?;
    Ok(Json(view))
}

/// POST /start
#[instrument(skip(state))]
async fn start_draw(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<StartResponse>), ApiError> {
    let command = commands::StartDraw {
        correlation_id: Uuid::new_v4(),
    };

    // Updates reach HTTP clients through the event stream; the per-draw
    // handle is not needed here.
    match command_handlers::handle_start_draw(&command, &state.animator)? {
        StartOutcome::Started(handle) => Ok((
            StatusCode::ACCEPTED,
            Json(StartResponse {
                status: "started",
                draw_id: Some(handle.draw_id()),
            }),
        )),
        StartOutcome::Ignored => Ok((
            StatusCode::OK,
            Json(StartResponse {
                status: "ignored",
                draw_id: None,
            }),
        )),
    }
}

/// PUT /pick-count
#[instrument(skip(state, request), fields(pick_count = request.pick_count))]
async fn set_pick_count(
    State(state): State<AppState>,
    Json(request): Json<SetPickCountRequest>,
) -> Result<Json<DrawView>, ApiError> {
    let command = commands::SetPickCount {
        correlation_id: Uuid::new_v4(),
        pick_count: usize::try_from(request.pick_count).unwrap_or(0),
    };

    command_handlers::handle_set_pick_count(&command, &state.animator)?;
    let view = query_handlers::get_draw_view(&state.animator)?;

    Ok(Json(view))
}

/// PUT /hide-mode
#[instrument(skip(state, request), fields(hide_names = request.hide_names))]
async fn set_hide_mode(
    State(state): State<AppState>,
    Json(request): Json<SetHideModeRequest>,
) -> Result<Json<DrawView>, ApiError> {
    let command = commands::SetHideMode {
        correlation_id: Uuid::new_v4(),
        hide_names: request.hide_names,
    };

    command_handlers::handle_set_hide_mode(&command, &state.animator)?;
    let view = query_handlers::get_draw_view(&state.animator)?;

    Ok(Json(view))
}

/// POST /reveal
#[instrument(skip(state, request))]
async fn reveal_name(
    State(state): State<AppState>,
    Json(request): Json<RevealRequest>,
) -> Result<Json<RevealResponse>, ApiError> {
    let command = commands::RevealName {
        correlation_id: Uuid::new_v4(),
        name: request.name,
    };

    let revealed = command_handlers::handle_reveal_name(&command, &state.animator)?;
    let view = query_handlers::get_draw_view(&state.animator)?;

    Ok(Json(RevealResponse { revealed, view }))
}

/// Body of one Server-Sent Event: the event envelope plus its payload.
#[derive(Debug, Serialize)]
struct EventFrame<'a> {
    #[serde(flatten)]
    metadata: &'a EventMetadata,
    payload: serde_json::Value,
}

fn sse_event(event: &DrawEvent) -> Option<Event> {
    let metadata = event.metadata();
    let frame = EventFrame {
        metadata,
        payload: event.to_payload(),
    };
    match Event::default()
        .event(event.event_type())
        .id(metadata.sequence_number.to_string())
        .json_data(&frame)
    {
        Ok(sse) => Some(sse),
        Err(e) => {
            warn!(event_type = event.event_type(), error = %e, "failed to encode event");
            None
        }
    }
}

/// GET /events
///
/// Streams every draw event as a Server-Sent Event named after its type,
/// with the sequence number as the event id.
#[instrument(skip(state))]
async fn events(
    State(state): State<AppState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let stream = BroadcastStream::new(state.animator.subscribe()).filter_map(|message| {
        match message {
            Ok(event) => sse_event(&event).map(Ok),
            Err(BroadcastStreamRecvError::Lagged(skipped)) => {
                warn!(skipped, "event stream subscriber lagged");
                None
            }
        }
    });

    Sse::new(stream).keep_alive(KeepAlive::default())
}

/// Returns the router for the draw context.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_draw))
        .route("/start", post(start_draw))
        .route("/pick-count", put(set_pick_count))
        .route("/hide-mode", put(set_hide_mode))
        .route("/reveal", post(reveal_name))
        .route("/events", get(events))
}
