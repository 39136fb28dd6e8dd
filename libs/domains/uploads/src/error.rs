use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use sea_orm::DbErr;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("Upload not found: {0}")]
    NotFound(Uuid),

    #[error("File for upload {0} is missing from storage")]
    FileMissing(Uuid),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("File is {size} bytes, the limit is {limit}")]
    TooLarge { size: usize, limit: usize },

    #[error("Storage error: {0}")]
    Storage(#[from] std::io::Error),

    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

pub type UploadResult<T> = Result<T, UploadError>;

impl From<UploadError> for AppError {
    fn from(err: UploadError) -> Self {
        match err {
            UploadError::NotFound(id) => AppError::NotFound(format!("Upload {} not found", id)),
            UploadError::FileMissing(_) => {
                AppError::NotFound("File not found on server".to_string())
            }
            UploadError::Validation(msg) => AppError::BadRequest(msg),
            e @ UploadError::TooLarge { .. } => AppError::PayloadTooLarge(e.to_string()),
            UploadError::Storage(e) => AppError::Io(e),
            UploadError::Database(e) => AppError::Database(e),
        }
    }
}

impl IntoResponse for UploadError {
    fn into_response(self) -> Response {
        AppError::from(self).into_response()
    }
}
