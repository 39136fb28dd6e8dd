//! Bearer-token authentication and the two-role authorization model.
//!
//! ```ignore
//! use axum_helpers::auth::{JwtAuth, JwtConfig, jwt_auth_middleware, Actor};
//! use core_config::FromEnv;
//!
//! let auth = JwtAuth::new(&JwtConfig::from_env()?);
//!
//! async fn admin_only(actor: Actor) -> Result<&'static str, AppError> {
//!     actor.require_admin()?;
//!     Ok("hello admin")
//! }
//!
//! let protected = Router::new()
//!     .route("/admin", get(admin_only))
//!     .layer(axum::middleware::from_fn_with_state(auth, jwt_auth_middleware));
//! ```

pub mod config;
pub mod jwt;
pub mod middleware;
pub mod role;

pub use config::JwtConfig;
pub use jwt::{JwtAuth, JwtClaims};
pub use middleware::{jwt_auth_middleware, optional_jwt_auth_middleware};
pub use role::{Actor, Role};
