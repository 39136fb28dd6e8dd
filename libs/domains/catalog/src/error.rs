use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use sea_orm::DbErr;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Category not found: {0}")]
    CategoryNotFound(Uuid),

    #[error("Product not found: {0}")]
    ProductNotFound(Uuid),

    #[error("Product image not found: {0}")]
    ImageNotFound(Uuid),

    #[error("Upload not found: {0}")]
    UploadNotFound(Uuid),

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

pub type CatalogResult<T> = Result<T, CatalogError>;

impl From<CatalogError> for AppError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::CategoryNotFound(id) => {
                AppError::NotFound(format!("Category {} not found", id))
            }
            CatalogError::ProductNotFound(id) => {
                AppError::NotFound(format!("Product {} not found", id))
            }
            CatalogError::ImageNotFound(id) => {
                AppError::NotFound(format!("Product image {} not found", id))
            }
            CatalogError::UploadNotFound(id) => {
                AppError::NotFound(format!("Upload {} not found", id))
            }
            CatalogError::Validation(msg) => AppError::BadRequest(msg),
            CatalogError::Database(e) => AppError::Database(e),
        }
    }
}

impl IntoResponse for CatalogError {
    fn into_response(self) -> Response {
        AppError::from(self).into_response()
    }
}
