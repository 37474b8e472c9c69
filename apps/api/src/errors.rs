use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::collections::StoreError;
use crate::session::storage::StorageError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unauthorized")]
    Unauthorized,

    /// The simulated transport failure. Carries the endpoint that "failed".
    #[error("Network error")]
    Network(String),

    #[error("Fixture error: {0}")]
    Fixture(String),

    #[error("Document store error: {0}")]
    Store(#[from] StoreError),

    #[error("Local storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "UNAUTHORIZED",
                "Authentication required".to_string(),
            ),
            AppError::Network(endpoint) => {
                tracing::warn!("Simulated network failure on {endpoint}");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "NETWORK_ERROR",
                    "Network error".to_string(),
                )
            }
            AppError::Fixture(msg) => {
                tracing::error!("Fixture error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "FIXTURE_ERROR",
                    "Mock data could not be loaded".to_string(),
                )
            }
            AppError::Store(StoreError::NotFound { collection, id }) => (
                StatusCode::NOT_FOUND,
                "NOT_FOUND",
                format!("{collection}/{id} not found"),
            ),
            AppError::Store(e) => {
                tracing::error!("Document store error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "STORE_ERROR",
                    "A document store error occurred".to_string(),
                )
            }
            AppError::Storage(e) => {
                tracing::error!("Local storage error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "STORAGE_ERROR",
                    "Session state could not be persisted".to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_network_error_is_service_unavailable() {
        let response = AppError::Network("/users/1".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn test_missing_store_document_is_not_found() {
        let err = AppError::from(StoreError::NotFound {
            collection: "goals".to_string(),
            id: "g1".to_string(),
        });
        assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_network_error_message_is_generic() {
        assert_eq!(AppError::Network("/x".to_string()).to_string(), "Network error");
    }
}
