use axum::{Router, middleware};
use axum_helpers::optional_jwt_auth_middleware;

use crate::state::AppState;

pub mod addresses;
pub mod auth;
pub mod catalog;
pub mod health;
pub mod orders;
pub mod uploads;

/// API routes without the `/api` prefix; `create_router` adds it.
///
/// Every sub-router already carries its own state. Tokens are verified once
/// here, and handlers that need a caller reject anonymous requests with 401.
pub fn routes(state: &AppState) -> Router {
    Router::new()
        .nest("/auth", auth::router(state))
        .nest("/addresses", addresses::router(state))
        .nest("/categories", catalog::categories(state))
        .nest("/products", catalog::products(state))
        .nest("/orders", orders::router(state))
        .nest("/uploads", uploads::router(state))
        .layer(middleware::from_fn_with_state(
            state.jwt.clone(),
            optional_jwt_auth_middleware,
        ))
}

/// `/ready` with real dependency checks, to merge next to the stateless app router.
pub fn ready_router(state: AppState) -> Router {
    use axum::routing::get;

    Router::new()
        .route("/ready", get(health::ready_handler))
        .with_state(state)
}
