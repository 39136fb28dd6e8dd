use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use sea_orm::DbErr;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum OrderError {
    #[error("Order not found: {0}")]
    NotFound(Uuid),

    #[error("Order not found: {0}")]
    NumberNotFound(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Invalid order: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

pub type OrderResult<T> = Result<T, OrderError>;

impl From<OrderError> for AppError {
    fn from(err: OrderError) -> Self {
        match err {
            OrderError::NotFound(id) => AppError::NotFound(format!("Order {} not found", id)),
            OrderError::NumberNotFound(number) => {
                AppError::NotFound(format!("Order {} not found", number))
            }
            OrderError::Forbidden(msg) => AppError::Forbidden(msg),
            OrderError::Validation(msg) => AppError::BadRequest(msg),
            OrderError::Database(e) => AppError::Database(e),
        }
    }
}

impl IntoResponse for OrderError {
    fn into_response(self) -> Response {
        AppError::from(self).into_response()
    }
}
