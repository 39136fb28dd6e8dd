use core_config::{ConfigError, FromEnv, env_required};

/// Credentials for the administrator account created at startup.
#[derive(Clone)]
pub struct AdminSeed {
    pub username: String,
    pub email: String,
    pub password: String,
}

impl AdminSeed {
    /// `None` when `ADMIN_USERNAME` is unset; otherwise all three variables are required.
    pub fn from_env_optional() -> Result<Option<Self>, ConfigError> {
        match std::env::var("ADMIN_USERNAME") {
            Ok(username) if !username.trim().is_empty() => Self::from_env().map(Some),
            _ => Ok(None),
        }
    }
}

impl FromEnv for AdminSeed {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            username: env_required("ADMIN_USERNAME")?,
            email: env_required("ADMIN_EMAIL")?,
            password: env_required("ADMIN_PASSWORD")?,
        })
    }
}

impl std::fmt::Debug for AdminSeed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminSeed")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password", &"***")
            .finish()
    }
}
