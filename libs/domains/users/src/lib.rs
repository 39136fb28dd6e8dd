//! Users domain
//!
//! Registration, login and the admin seed. Passwords are stored as Argon2
//! hashes; successful logins receive a bearer token from
//! [`axum_helpers::JwtAuth`].
//!
//! ```rust,no_run
//! use domain_users::{handlers, PgUserRepository, UserService};
//!
//! # fn wire(db: sea_orm::DatabaseConnection, jwt: axum_helpers::JwtAuth) {
//! let service = UserService::new(PgUserRepository::new(db), jwt.clone());
//! let router = handlers::router(service);
//! # }
//! ```

pub mod config;
pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;

pub use config::AdminSeed;
pub use error::{UserError, UserResult};
pub use models::{AuthResponse, LoginRequest, NewUser, RegisterRequest, User, UserResponse};
pub use postgres::PgUserRepository;
pub use repository::UserRepository;
pub use service::UserService;
