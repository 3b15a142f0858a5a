//! Error handling for the API server

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use formwork::RepositoryError;
use serde_json::json;
use thiserror::Error;

/// Result type for API operations
pub type Result<T> = std::result::Result<T, ApiError>;

/// API error types
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error("access denied: {0}")]
    AccessDenied(String),

    #[error("bad request: {0}")]
    BadRequest(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("internal server error: {0}")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_message) = match &self {
            ApiError::Repository(e) => match e {
                RepositoryError::NotFound { .. } => (StatusCode::NOT_FOUND, self.to_string()),
                RepositoryError::IdentifierNotAllowed
                | RepositoryError::MissingRequiredIdentifier
                | RepositoryError::ConflictingProjectionModes
                | RepositoryError::InvalidLimit(_)
                | RepositoryError::InvalidOffset(_)
                | RepositoryError::LimitExceedsMaximum { .. }
                | RepositoryError::OffsetBeyondTotal { .. }
                | RepositoryError::NotAnObject
                | RepositoryError::Serialization(_) => {
                    (StatusCode::BAD_REQUEST, self.to_string())
                }
                RepositoryError::AccessDenied(_) => (StatusCode::FORBIDDEN, self.to_string()),
                RepositoryError::Storage(_) | RepositoryError::Time(_) => {
                    (StatusCode::INTERNAL_SERVER_ERROR, "Storage error".to_string())
                }
            },
            ApiError::AccessDenied(_) => (StatusCode::FORBIDDEN, self.to_string()),
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, self.to_string()),
            _ => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            ),
        };

        let body = Json(json!({
            "error": error_message,
            "status": status.as_u16()
        }));

        (status, body).into_response()
    }
}

// Convenience constructors for common errors
impl ApiError {
    pub fn bad_request(msg: &str) -> Self {
        Self::BadRequest(msg.to_string())
    }

    pub fn internal(msg: &str) -> Self {
        Self::Internal(msg.to_string())
    }
}
