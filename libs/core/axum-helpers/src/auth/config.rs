use core_config::{ConfigError, FromEnv, env_or_default, env_parse_or, env_required};

/// Token signing and validation settings.
///
/// - `JWT_SECRET` (required, at least 32 characters)
/// - `JWT_ISSUER` / `JWT_AUDIENCE` (default `ClothStore`)
/// - `JWT_EXPIRY_MINUTES` (default 60)
#[derive(Clone, Debug)]
pub struct JwtConfig {
    pub secret: String,
    pub issuer: String,
    pub audience: String,
    pub expiry_minutes: i64,
}

pub const DEFAULT_ISSUER: &str = "ClothStore";

impl JwtConfig {
    /// # Panics
    /// If the secret is shorter than 32 characters.
    pub fn new(secret: impl Into<String>) -> Self {
        let secret = secret.into();
        assert!(
            secret.len() >= 32,
            "JWT secret must be at least 32 characters"
        );
        Self {
            secret,
            issuer: DEFAULT_ISSUER.to_string(),
            audience: DEFAULT_ISSUER.to_string(),
            expiry_minutes: 60,
        }
    }
}

impl FromEnv for JwtConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let secret = env_required("JWT_SECRET")?;

        if secret.len() < 32 {
            return Err(ConfigError::ParseError {
                key: "JWT_SECRET".to_string(),
                details: format!(
                    "must be at least 32 characters (got {}). Generate one with: openssl rand -base64 32",
                    secret.len()
                ),
            });
        }

        let expiry_minutes = env_parse_or("JWT_EXPIRY_MINUTES", 60i64)?;
        if expiry_minutes <= 0 {
            return Err(ConfigError::ParseError {
                key: "JWT_EXPIRY_MINUTES".to_string(),
                details: "must be positive".to_string(),
            });
        }

        Ok(Self {
            secret,
            issuer: env_or_default("JWT_ISSUER", DEFAULT_ISSUER),
            audience: env_or_default("JWT_AUDIENCE", DEFAULT_ISSUER),
            expiry_minutes,
        })
    }
}
