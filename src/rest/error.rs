use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use super::models::ErrorResponse;
use crate::{
    storage::StorageError,
    types::{TodoId, ValidationError},
};

/// Every failure a handler can surface, mapped to a status code and a JSON
/// body in one place.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("todo {0} not found")]
    NotFound(TodoId),
    #[error("endpoint not found")]
    UnknownEndpoint,
    #[error("method not allowed for this endpoint")]
    MethodNotAllowed,
    #[error("request body rejected: {0}")]
    PayloadTooLarge(String),
    #[error("storage failure: {0}")]
    Persistence(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::NotFound(_) | ApiError::UnknownEndpoint => StatusCode::NOT_FOUND,
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::Persistence(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn category(&self) -> &'static str {
        match self {
            ApiError::Validation(_) => "validation_error",
            ApiError::NotFound(_) | ApiError::UnknownEndpoint => "not_found",
            ApiError::MethodNotAllowed => "method_not_allowed",
            ApiError::PayloadTooLarge(_) => "payload_too_large",
            ApiError::Persistence(_) => "persistence_error",
        }
    }
}

impl From<StorageError> for ApiError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::NotFound(id) => ApiError::NotFound(id),
            StorageError::Persistence(err) => ApiError::Persistence(err.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            ApiError::Persistence(detail) => {
                log::error!("Storage failure: {}", detail);
                "internal storage error".to_string()
            }
            other => {
                log::warn!("Rejected request: {}", other);
                other.to_string()
            }
        };
        (
            status,
            Json(ErrorResponse {
                error: self.category().to_string(),
                message,
            }),
        )
            .into_response()
    }
}
