use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use super::{ErrorCode, ErrorResponse};

/// Router fallback producing the standard JSON 404 body.
pub async fn not_found() -> Response {
    let body = ErrorResponse::new(ErrorCode::NotFound, "The requested resource was not found");
    (StatusCode::NOT_FOUND, Json(body)).into_response()
}
