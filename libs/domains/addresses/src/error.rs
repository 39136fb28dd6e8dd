use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use sea_orm::DbErr;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum AddressError {
    #[error("Address not found: {0}")]
    NotFound(Uuid),

    #[error("No default address")]
    NoDefault,

    #[error("Address {0} belongs to another user")]
    Forbidden(Uuid),

    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

pub type AddressResult<T> = Result<T, AddressError>;

impl From<AddressError> for AppError {
    fn from(err: AddressError) -> Self {
        match err {
            AddressError::NotFound(id) => AppError::NotFound(format!("Address {} not found", id)),
            AddressError::NoDefault => AppError::NotFound("No default address".to_string()),
            AddressError::Forbidden(_) => {
                AppError::Forbidden("Address belongs to another user".to_string())
            }
            AddressError::Database(e) => AppError::Database(e),
        }
    }
}

impl IntoResponse for AddressError {
    fn into_response(self) -> Response {
        AppError::from(self).into_response()
    }
}
