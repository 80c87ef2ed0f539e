//! Shared test helpers for API integration tests.
#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use rollcall_core::roster::Roster;
use rollcall_draw::application::animator::{DrawAnimator, SharedRng};
use rollcall_draw::domain::aggregates::DrawSession;
use rollcall_draw::domain::animation::AnimationConfig;
use rollcall_test_support::{FixedClock, MockRng};
use tower::ServiceExt;
use uuid::Uuid;

use rollcall_api::routes;
use rollcall_api::state::AppState;

/// Build the full app router over `roster` with a fixed clock and an RNG
/// that always picks the first remaining slot. Uses the same route
/// structure as `main.rs`.
pub fn build_test_app(roster: Roster, pick_count: usize, hide_names: bool) -> Router {
    let (app, _) = build_test_app_with_animator(roster, pick_count, hide_names);
    app
}

/// Like `build_test_app`, but also returns the animator so tests can await
/// draws directly.
pub fn build_test_app_with_animator(
    roster: Roster,
    pick_count: usize,
    hide_names: bool,
) -> (Router, Arc<DrawAnimator>) {
    let session = DrawSession::new(Uuid::new_v4(), roster, pick_count, hide_names);
    let rng: SharedRng = Arc::new(Mutex::new(MockRng));
    let animator = Arc::new(DrawAnimator::new(
        session,
        AnimationConfig::default(),
        Arc::new(FixedClock::reference()),
        rng,
    ));
    let app = routes::app_router().with_state(AppState::new(Arc::clone(&animator)));
    (app, animator)
}

/// Send a request with an optional JSON body and return the response.
pub async fn send_json(
    app: Router,
    method: &str,
    uri: &str,
    body: Option<&serde_json::Value>,
) -> (StatusCode, serde_json::Value) {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json");
    let request = match body {
        Some(json) => builder
            .body(Body::from(serde_json::to_vec(json).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}

/// Send a POST request with a JSON body and return the response.
pub async fn post_json(
    app: Router,
    uri: &str,
    body: &serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    send_json(app, "POST", uri, Some(body)).await
}

/// Send a bodiless POST request and return the response.
pub async fn post_empty(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    send_json(app, "POST", uri, None).await
}

/// Send a PUT request with a JSON body and return the response.
pub async fn put_json(
    app: Router,
    uri: &str,
    body: &serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    send_json(app, "PUT", uri, Some(body)).await
}

/// Send a GET request and return the response.
pub async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}
