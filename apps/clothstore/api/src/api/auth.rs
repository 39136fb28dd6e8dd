use axum::Router;
use domain_users::{PgUserRepository, UserService, handlers};

use crate::state::AppState;

pub fn service(state: &AppState) -> UserService<PgUserRepository> {
    UserService::new(PgUserRepository::new(state.db.clone()), state.jwt.clone())
}

pub fn router(state: &AppState) -> Router {
    handlers::router(service(state))
}
