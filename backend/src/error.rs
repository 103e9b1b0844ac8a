//! Unified error handling for the backend API.
//!
//! Handlers return `ApiResult<T>` and use `?`; every variant knows its HTTP
//! status and renders a `{"error": ...}` body.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use novel_shared::api::ErrorResponse;
use thiserror::Error;

use crate::auth::AuthError;
use crate::store::StoreError;

/// Unified error type for API handlers
#[derive(Debug, Error)]
pub enum ApiError {
    /// Resource store failure
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Unexpected internal failure
    #[error("{0}")]
    Internal(#[from] anyhow::Error),

    /// Resource not found
    #[error("{0} not found")]
    NotFound(String),

    /// Invalid request data
    #[error("Invalid request: {0}")]
    BadRequest(String),

    /// Body was not parseable JSON of the expected shape
    #[error("Invalid JSON: {0}")]
    JsonRejection(#[from] JsonRejection),

    /// Request body failed field validation
    #[error("Validation failed: {0}")]
    Validation(#[from] validator::ValidationErrors),

    /// Login-widget payload is structurally invalid
    #[error("Invalid authorization payload: {0}")]
    AuthPayload(#[from] AuthError),

    /// Well-formed request that is not permitted
    #[error("Forbidden: {0}")]
    Forbidden(String),
}

impl ApiError {
    /// Create a not found error with a custom message
    pub fn not_found(resource: impl Into<String>) -> Self {
        ApiError::NotFound(resource.into())
    }

    /// Create a bad request error
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest(message.into())
    }

    /// Create a forbidden error
    pub fn forbidden(message: impl Into<String>) -> Self {
        ApiError::Forbidden(message.into())
    }

    fn status_and_body(&self) -> (StatusCode, ErrorResponse) {
        match self {
            ApiError::Store(StoreError::ConnectionPool(e)) => {
                tracing::error!("Connection pool error: {:?}", e);
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    ErrorResponse::new("Database connection unavailable"),
                )
            }
            ApiError::Store(StoreError::Database(diesel::result::Error::NotFound)) => (
                StatusCode::NOT_FOUND,
                ErrorResponse::new("Resource not found"),
            ),
            ApiError::Store(StoreError::Database(e)) => {
                tracing::error!("Database error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::new("Database operation failed"),
                )
            }
            ApiError::Store(StoreError::NotFound(resource)) => (
                StatusCode::NOT_FOUND,
                ErrorResponse::new(format!("{} not found", resource)),
            ),
            ApiError::Store(StoreError::Conflict(msg)) => {
                (StatusCode::CONFLICT, ErrorResponse::new(msg))
            }
            ApiError::Internal(e) => {
                tracing::error!("Internal error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::new("Internal server error"),
                )
            }
            ApiError::NotFound(resource) => (
                StatusCode::NOT_FOUND,
                ErrorResponse::new(format!("{} not found", resource)),
            ),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, ErrorResponse::new(msg)),
            ApiError::JsonRejection(rejection) => {
                tracing::warn!("JSON rejection: {}", rejection.body_text());
                (
                    StatusCode::BAD_REQUEST,
                    ErrorResponse::new(rejection.body_text()),
                )
            }
            ApiError::Validation(errors) => (
                StatusCode::BAD_REQUEST,
                ErrorResponse::new(format!("Validation failed: {}", errors)),
            ),
            ApiError::AuthPayload(e) => (StatusCode::BAD_REQUEST, ErrorResponse::new(e.to_string())),
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, ErrorResponse::new(msg)),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = self.status_and_body();
        (status, Json(body)).into_response()
    }
}

/// Result type alias for API handlers
pub type ApiResult<T> = Result<T, ApiError>;
