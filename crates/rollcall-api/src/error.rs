//! Error types for the HTTP surface and server startup.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use rollcall_core::error::DomainError;
use serde::Serialize;
use thiserror::Error;

/// Startup and runtime errors for the API server.
#[derive(Debug, Error)]
pub enum AppError {
    /// A required environment variable is missing or invalid.
    #[error("configuration error: {0}")]
    Config(String),

    /// The roster could not be loaded.
    #[error("roster error: {0}")]
    Roster(#[from] DomainError),

    /// Network binding or I/O error.
    #[error("server error: {0}")]
    Server(#[from] std::io::Error),
}

/// JSON body returned for error responses.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Machine-readable error code.
    pub error: &'static str,
    /// Human-readable error message.
    pub message: String,
}

/// HTTP-layer wrapper around `DomainError` that implements `IntoResponse`.
#[derive(Debug)]
pub struct ApiError(pub DomainError);

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        Self(err)
    }
}

impl ApiError {
    /// HTTP status and machine-readable code for the wrapped error.
    #[must_use]
    pub fn status_and_code(&self) -> (StatusCode, &'static str) {
        match &self.0 {
            DomainError::EmptyRoster => (StatusCode::UNPROCESSABLE_ENTITY, "empty_roster"),
            DomainError::NameNotDrawn(_) => (StatusCode::NOT_FOUND, "name_not_drawn"),
            DomainError::Validation(_) => (StatusCode::BAD_REQUEST, "validation_error"),
            DomainError::Infrastructure(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "infrastructure_error")
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error) = self.status_and_code();

        // Client mistakes are reported in the body only; server faults are logged.
        if status.is_server_error() {
            tracing::error!(error = %self.0, "request failed");
        }

        let body = ErrorBody {
            error,
            message: self.0.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    #[test]
    fn test_status_and_code_cover_every_domain_error() {
        let cases = [
            (
                DomainError::EmptyRoster,
                StatusCode::UNPROCESSABLE_ENTITY,
                "empty_roster",
            ),
            (
                DomainError::NameNotDrawn("Ada".into()),
                StatusCode::NOT_FOUND,
                "name_not_drawn",
            ),
            (
                DomainError::Validation("bad input".into()),
                StatusCode::BAD_REQUEST,
                "validation_error",
            ),
            (
                DomainError::Infrastructure("session mutex poisoned".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
                "infrastructure_error",
            ),
        ];

        for (err, status, code) in cases {
            assert_eq!(ApiError(err).status_and_code(), (status, code));
        }
    }

    #[tokio::test]
    async fn test_response_body_carries_code_and_message() {
        let response = ApiError(DomainError::NameNotDrawn("Grace".into())).into_response();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["error"], "name_not_drawn");
        assert_eq!(json["message"], "name not in current draw: Grace");
    }

    #[test]
    fn test_app_error_wraps_roster_failure() {
        let err = AppError::from(DomainError::EmptyRoster);

        assert_eq!(err.to_string(), "roster error: roster is empty");
    }
}
