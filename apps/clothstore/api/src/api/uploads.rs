use axum::Router;
use domain_uploads::{PgUploadRepository, UploadService, handlers};

pub fn router(state: &crate::state::AppState) -> Router {
    let service = UploadService::new(
        PgUploadRepository::new(state.db.clone()),
        state.storage.clone(),
        state.config.uploads.max_bytes,
    );
    handlers::router(service)
}
