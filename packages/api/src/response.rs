// ABOUTME: Shared API response types and error handling
// ABOUTME: Provides consistent response format across all API endpoints

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json as ResponseJson, Response},
};
use serde::Serialize;
use tracing::error;

use taskmind_context::ContextProcessingError;
use taskmind_storage::StorageError;
use taskmind_tasks::ValidationError;

/// Standard API response wrapper
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        ApiResponse {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: String) -> ApiResponse<()> {
        ApiResponse {
            success: false,
            data: None,
            error: Some(message),
        }
    }
}

/// Wrap data in a success envelope with the given status
pub fn ok<T: Serialize>(status: StatusCode, data: T) -> Response {
    (status, ResponseJson(ApiResponse::success(data))).into_response()
}

#[derive(Debug, Serialize)]
struct ValidationDetails {
    errors: Vec<ValidationError>,
}

/// Handler error carrying its HTTP status
#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    Validation(Vec<ValidationError>),
    NotFound(String),
    Conflict(String),
    BadGateway(String),
    Internal(String),
}

impl From<StorageError> for ApiError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::NotFound => ApiError::NotFound(err.to_string()),
            StorageError::DuplicateName(_) | StorageError::InUse(_) => {
                ApiError::Conflict(err.to_string())
            }
            StorageError::InvalidReference(_) | StorageError::Validation(_) => {
                ApiError::BadRequest(err.to_string())
            }
            other => {
                error!("Storage failure: {}", other);
                ApiError::Internal("Database error".to_string())
            }
        }
    }
}

impl From<ContextProcessingError> for ApiError {
    fn from(err: ContextProcessingError) -> Self {
        match err {
            ContextProcessingError::EmptyContent => ApiError::BadRequest(err.to_string()),
            ContextProcessingError::NotFound(_) => ApiError::NotFound(err.to_string()),
            ContextProcessingError::AlreadyProcessed(_) => ApiError::Conflict(err.to_string()),
            ContextProcessingError::Storage(e) => ApiError::from(e),
            ContextProcessingError::Extraction(_) => ApiError::BadGateway(err.to_string()),
        }
    }
}

impl From<Vec<ValidationError>> for ApiError {
    fn from(errors: Vec<ValidationError>) -> Self {
        ApiError::Validation(errors)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::Validation(errors) => {
                let message = errors
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(", ");
                let body = ApiResponse {
                    success: false,
                    data: Some(ValidationDetails { errors }),
                    error: Some(message),
                };
                return (StatusCode::BAD_REQUEST, ResponseJson(body)).into_response();
            }
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            ApiError::BadGateway(msg) => (StatusCode::BAD_GATEWAY, msg),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        (status, ResponseJson(ApiResponse::<()>::error(message))).into_response()
    }
}
