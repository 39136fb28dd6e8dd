pub mod codes;
pub mod handlers;
pub mod responses;

pub use codes::ErrorCode;

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use sea_orm::DbErr;
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;
use uuid::Error as UuidError;
use validator::ValidationErrors;

/// Body of every error response.
///
/// ```json
/// { "code": 1004, "error": "NOT_FOUND", "message": "Order 'ORD-20250301-1A2B3C4D' not found" }
/// ```
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Integer error code for logging and monitoring
    pub code: i32,
    /// Machine-readable error identifier
    pub error: String,
    /// Human-readable message
    pub message: String,
    /// Structured details, e.g. field validation errors
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code: code.code(),
            error: code.as_str().to_string(),
            message: message.into(),
            details: None,
        }
    }
}

/// Error type every handler ultimately converts into.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] DbErr),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON extraction error: {0}")]
    JsonExtractorRejection(#[from] JsonRejection),

    #[error("Validation error: {0}")]
    ValidationError(#[from] ValidationErrors),

    #[error("UUID error: {0}")]
    UuidError(#[from] UuidError),

    #[error("Bad Request: {0}")]
    BadRequest(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Not Found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Payload Too Large: {0}")]
    PayloadTooLarge(String),

    #[error("Internal Server Error: {0}")]
    InternalServerError(String),

    #[error("Service Unavailable: {0}")]
    ServiceUnavailable(String),
}

impl AppError {
    /// Status, code, client-facing message and optional details.
    ///
    /// Server-side failures never leak their internal message.
    fn parts(self) -> (StatusCode, ErrorCode, String, Option<serde_json::Value>) {
        match self {
            AppError::Database(e) => {
                tracing::error!(error_code = ErrorCode::DatabaseError.code(), error = %e, "Database error");
                internal(ErrorCode::DatabaseError)
            }
            AppError::Io(e) => {
                tracing::error!(error_code = ErrorCode::IoError.code(), error = %e, "I/O error");
                internal(ErrorCode::IoError)
            }
            AppError::InternalServerError(msg) => {
                tracing::error!(error_code = ErrorCode::InternalError.code(), "{}", msg);
                internal(ErrorCode::InternalError)
            }
            AppError::JsonExtractorRejection(e) => {
                tracing::warn!(error_code = ErrorCode::JsonExtraction.code(), error = %e, "JSON extraction error");
                (e.status(), ErrorCode::JsonExtraction, e.body_text(), None)
            }
            AppError::ValidationError(e) => {
                tracing::info!(error_code = ErrorCode::ValidationError.code(), "Validation error: {}", e);
                let details = serde_json::to_value(&e).ok();
                (
                    StatusCode::BAD_REQUEST,
                    ErrorCode::ValidationError,
                    ErrorCode::ValidationError.default_message().to_string(),
                    details,
                )
            }
            AppError::UuidError(e) => {
                tracing::info!(error_code = ErrorCode::InvalidUuid.code(), error = %e, "UUID error");
                client(StatusCode::BAD_REQUEST, ErrorCode::InvalidUuid, ErrorCode::InvalidUuid.default_message())
            }
            AppError::BadRequest(msg) => client(StatusCode::BAD_REQUEST, ErrorCode::BadRequest, msg),
            AppError::Unauthorized(msg) => client(StatusCode::UNAUTHORIZED, ErrorCode::Unauthorized, msg),
            AppError::Forbidden(msg) => client(StatusCode::FORBIDDEN, ErrorCode::Forbidden, msg),
            AppError::NotFound(msg) => client(StatusCode::NOT_FOUND, ErrorCode::NotFound, msg),
            AppError::Conflict(msg) => client(StatusCode::CONFLICT, ErrorCode::Conflict, msg),
            AppError::PayloadTooLarge(msg) => {
                client(StatusCode::PAYLOAD_TOO_LARGE, ErrorCode::PayloadTooLarge, msg)
            }
            AppError::ServiceUnavailable(msg) => {
                tracing::warn!("Service unavailable: {}", msg);
                client(StatusCode::SERVICE_UNAVAILABLE, ErrorCode::ServiceUnavailable, msg)
            }
        }
    }
}

fn internal(code: ErrorCode) -> (StatusCode, ErrorCode, String, Option<serde_json::Value>) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        code,
        code.default_message().to_string(),
        None,
    )
}

fn client(
    status: StatusCode,
    code: ErrorCode,
    message: impl Into<String>,
) -> (StatusCode, ErrorCode, String, Option<serde_json::Value>) {
    let message = message.into();
    tracing::debug!(error_code = code.code(), status = %status, "{}", message);
    (status, code, message, None)
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message, details) = self.parts();
        let body = ErrorResponse {
            details,
            ..ErrorResponse::new(code, message)
        };
        (status, Json(body)).into_response()
    }
}
