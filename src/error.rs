//! HTTP-facing error type.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::memory::StoreError;

/// JSON body returned with every error except [`ApiError::NotOwner`].
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

#[derive(Debug, Error)]
pub enum ApiError {
    /// Missing, malformed or rejected bearer token.
    #[error("authentication failed: {0}")]
    Unauthenticated(String),

    /// Bad path parameter or request body. Raised before the store is touched.
    #[error("validation error: {0}")]
    Validation(String),

    #[error("resource not found: {0}")]
    NotFound(String),

    /// The memory exists but the caller may not see or change it.
    /// Answered with a bare 401 so nothing about the record leaks.
    #[error("caller is not allowed to access this memory")]
    NotOwner,

    #[error("internal server error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Unauthenticated(_) | ApiError::NotOwner => StatusCode::UNAUTHORIZED,
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn error_type(&self) -> &'static str {
        match self {
            ApiError::Unauthenticated(_) => "authentication_error",
            ApiError::Validation(_) => "validation_error",
            ApiError::NotFound(_) => "not_found",
            ApiError::NotOwner => "unauthorized",
            ApiError::Internal(_) => "internal_error",
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(id) => ApiError::NotFound(format!("memory with id '{id}' not found")),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        match self {
            ApiError::NotOwner => status.into_response(),
            ApiError::Internal(detail) => {
                tracing::error!(error = %detail, "request failed");
                let body = ErrorResponse {
                    error: "internal_error".into(),
                    message: "internal server error".into(),
                };
                (status, Json(body)).into_response()
            }
            other => {
                let body = ErrorResponse {
                    error: other.error_type().to_string(),
                    message: other.to_string(),
                };
                (status, Json(body)).into_response()
            }
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
