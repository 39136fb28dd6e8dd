use core_config::{ConfigError, FromEnv, env_or_default, env_parse_or};
use std::path::PathBuf;

/// Where uploaded files live and how large they may be.
///
/// - `UPLOAD_DIR` (default `uploads`)
/// - `UPLOAD_MAX_BYTES` (default 10 MiB)
#[derive(Clone, Debug)]
pub struct UploadConfig {
    pub dir: PathBuf,
    pub max_bytes: usize,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("uploads"),
            max_bytes: 10 * 1024 * 1024,
        }
    }
}

impl FromEnv for UploadConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        Ok(Self {
            dir: PathBuf::from(env_or_default("UPLOAD_DIR", "uploads")),
            max_bytes: env_parse_or("UPLOAD_MAX_BYTES", defaults.max_bytes)?,
        })
    }
}
