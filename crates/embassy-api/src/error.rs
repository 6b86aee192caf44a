//! API error types and their JSON envelope.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

use embassy_browser::BrowserError;

/// Errors a handler can answer with directly.
///
/// Client input errors and missing-session preconditions are 400s; anything
/// the browser layer fails at is a 500 carrying the raw error text. The
/// heuristic flows' soft "not found" outcomes are not errors and build their
/// 404 diagnostic payloads explicitly.
#[derive(Debug, Error)]
pub enum ApiError {
    /// A required request field is absent.
    #[error("{0}")]
    MissingField(&'static str),

    /// The operation needs a live session and none exists.
    #[error("Browser not initialized")]
    NoSession,

    /// Browser-layer failure.
    #[error("{0}")]
    Browser(BrowserError),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::MissingField(_) | ApiError::NoSession => StatusCode::BAD_REQUEST,
            ApiError::Browser(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<BrowserError> for ApiError {
    fn from(e: BrowserError) -> Self {
        match e {
            BrowserError::NotStarted => ApiError::NoSession,
            other => ApiError::Browser(other),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(json!({"error": self.to_string()}))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_field_is_400() {
        let response = ApiError::MissingField("URL is required").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_no_session_is_400_with_message() {
        let err = ApiError::NoSession;
        assert_eq!(err.to_string(), "Browser not initialized");
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_browser_error_is_500() {
        let err: ApiError = BrowserError::ElementNotFound("#missing".to_string()).into();
        assert_eq!(
            err.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_not_started_maps_to_no_session() {
        let err: ApiError = BrowserError::NotStarted.into();
        assert!(matches!(err, ApiError::NoSession));
    }
}
