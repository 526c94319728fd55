//! # HTTP Errors
//!
//! Maps handler failures to status codes and a JSON error body.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::items::ItemError;

/// Errors returned by HTTP handlers
#[derive(Debug, Error)]
pub enum ApiError {
    /// Path id and body id disagree on update
    #[error("Id mismatch: path {path}, body {body}")]
    IdMismatch { path: Uuid, body: Uuid },

    /// Path segment could not be parsed
    #[error("Invalid path: {0}")]
    InvalidPath(String),

    /// Body could not be parsed
    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    /// Failure from the item service
    #[error(transparent)]
    Item(#[from] ItemError),
}

impl ApiError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::IdMismatch { .. } => StatusCode::BAD_REQUEST,
            ApiError::InvalidPath(_) | ApiError::InvalidBody(_) => StatusCode::BAD_REQUEST,
            ApiError::Item(err) => StatusCode::from_u16(err.status_code())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
        }
    }
}

/// Error response body
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // Server faults are logged in full but answered generically.
        let message = if status.is_server_error() {
            tracing::error!(event = "REQUEST_FAILED", status = status.as_u16(), error = %self);
            "Internal server error".to_string()
        } else {
            tracing::info!(event = "REQUEST_REJECTED", status = status.as_u16(), error = %self);
            self.to_string()
        };

        let body = Json(ErrorResponse {
            error: message,
            code: status.as_u16(),
        });
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        let mismatch = ApiError::IdMismatch {
            path: Uuid::new_v4(),
            body: Uuid::new_v4(),
        };
        assert_eq!(mismatch.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ApiError::from(ItemError::NotFound(Uuid::nil())).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::from(ItemError::description_required()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::from(ItemError::Store("disk".into())).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[tokio::test]
    async fn test_invalid_path_body_is_json() {
        let response = ApiError::InvalidPath("bad id".into()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: ErrorResponse = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body.code, 400);
        assert_eq!(body.error, "Invalid path: bad id");
    }

    #[test]
    fn test_validation_message_passes_through() {
        let err = ApiError::from(ItemError::description_exists());
        assert_eq!(err.to_string(), "description already exists");
    }

    #[tokio::test]
    async fn test_store_error_body_is_generic() {
        let response = ApiError::from(ItemError::Store("secret path".into())).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: ErrorResponse = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body.code, 500);
        assert!(!body.error.contains("secret"));
    }
}
