//! # Axum Helpers
//!
//! Shared HTTP plumbing for the ClothStore services.
//!
//! - **[`auth`]**: JWT issuing/verification, the auth middleware and the [`Actor`] extractor
//! - **[`server`]**: router assembly, health checks, graceful shutdown
//! - **[`http`]**: CORS and security headers
//! - **[`errors`]**: [`AppError`] and the JSON error body
//! - **[`extractors`]**: [`UuidPath`] and [`ValidatedJson`]
//!
//! ```ignore
//! let router = create_router::<ApiDoc>(api_routes)?;
//! create_production_app(router, &server_config, Duration::from_secs(30), async {}).await?;
//! ```

pub mod auth;
pub mod errors;
pub mod extractors;
pub mod http;
pub mod server;

pub use auth::{
    Actor, JwtAuth, JwtClaims, JwtConfig, Role, jwt_auth_middleware,
    optional_jwt_auth_middleware,
};

pub use server::{
    HealthCheckFuture, HealthResponse, ShutdownCoordinator, create_production_app, create_router,
    health_router, run_health_checks, shutdown_signal,
};

pub use http::{create_cors_layer, security_headers};

pub use errors::{AppError, ErrorCode, ErrorResponse};

pub use extractors::{UuidPath, ValidatedJson};
