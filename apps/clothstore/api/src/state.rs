//! Shared application state.
//!
//! Cloned into every router that needs it; the connection pool and the
//! JWT keys are cheap to clone.

use axum_helpers::JwtAuth;
use domain_uploads::LocalFileStorage;
use sea_orm::DatabaseConnection;

use crate::config::Config;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub db: DatabaseConnection,
    pub jwt: JwtAuth,
    /// Backing store for uploaded files, rooted at `UPLOAD_DIR`
    pub storage: LocalFileStorage,
}

impl AppState {
    pub fn new(config: Config, db: DatabaseConnection) -> Self {
        let jwt = JwtAuth::new(&config.jwt);
        let storage = LocalFileStorage::new(config.uploads.dir.clone());
        Self {
            config,
            db,
            jwt,
            storage,
        }
    }
}
