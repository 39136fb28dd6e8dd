use super::config::JwtConfig;
use super::role::Role;
use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

/// Claims carried by every access token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtClaims {
    pub sub: String, // user id
    pub email: String,
    pub name: String,
    pub roles: Vec<Role>,
    pub iss: String,
    pub aud: String,
    pub exp: i64,
    pub iat: i64,
    pub jti: String,
}

/// HS256 token issuer and verifier
#[derive(Clone)]
pub struct JwtAuth {
    inner: Arc<Inner>,
}

struct Inner {
    encoding: EncodingKey,
    decoding: DecodingKey,
    issuer: String,
    audience: String,
    ttl: Duration,
}

impl JwtAuth {
    pub fn new(config: &JwtConfig) -> Self {
        tracing::info!(issuer = %config.issuer, "JWT auth initialized");
        Self {
            inner: Arc::new(Inner {
                encoding: EncodingKey::from_secret(config.secret.as_bytes()),
                decoding: DecodingKey::from_secret(config.secret.as_bytes()),
                issuer: config.issuer.clone(),
                audience: config.audience.clone(),
                ttl: Duration::minutes(config.expiry_minutes),
            }),
        }
    }

    /// Lifetime of newly issued tokens, in seconds
    pub fn expires_in(&self) -> i64 {
        self.inner.ttl.num_seconds()
    }

    pub fn create_access_token(
        &self,
        user_id: Uuid,
        email: &str,
        name: &str,
        roles: &[Role],
    ) -> eyre::Result<String> {
        self.create_token(user_id, email, name, roles, self.inner.ttl)
    }

    fn create_token(
        &self,
        user_id: Uuid,
        email: &str,
        name: &str,
        roles: &[Role],
        ttl: Duration,
    ) -> eyre::Result<String> {
        let now = Utc::now();
        let claims = JwtClaims {
            sub: user_id.to_string(),
            email: email.to_string(),
            name: name.to_string(),
            roles: roles.to_vec(),
            iss: self.inner.issuer.clone(),
            aud: self.inner.audience.clone(),
            exp: (now + ttl).timestamp(),
            iat: now.timestamp(),
            jti: Uuid::new_v4().to_string(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.inner.encoding)?;
        Ok(token)
    }

    /// Check signature, expiry, issuer and audience, then decode the claims.
    pub fn verify_token(&self, token: &str) -> eyre::Result<JwtClaims> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&self.inner.issuer]);
        validation.set_audience(&[&self.inner.audience]);

        let data = decode::<JwtClaims>(token, &self.inner.decoding, &validation)?;
        Ok(data.claims)
    }
}
