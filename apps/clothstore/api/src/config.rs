use axum_helpers::JwtConfig;
use core_config::{AppInfo, FromEnv, app_info, server::ServerConfig};
use database::postgres::PostgresConfig;
use domain_uploads::UploadConfig;
use domain_users::AdminSeed;

pub use core_config::Environment;

/// Everything the store needs at startup, read from the environment
#[derive(Clone)]
pub struct Config {
    pub app: AppInfo,
    pub environment: Environment,
    pub server: ServerConfig,
    pub database: PostgresConfig,
    pub jwt: JwtConfig,
    pub uploads: UploadConfig,
    pub admin: Option<AdminSeed>,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let server = ServerConfig::from_env()?; // HOST=0.0.0.0, PORT=8080 by default
        let database = PostgresConfig::from_env()?; // DATABASE_URL is required
        let jwt = JwtConfig::from_env()?;
        let uploads = UploadConfig::from_env()?;
        let admin = AdminSeed::from_env_optional()?;

        Ok(Self {
            app: app_info!(),
            environment,
            server,
            database,
            jwt,
            uploads,
            admin,
        })
    }
}
