use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use axum_helpers::{JwtAuth, Role};
use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;
use validator::Validate;

use crate::config::AdminSeed;
use crate::error::{UserError, UserResult};
use crate::models::{AuthResponse, LoginRequest, NewUser, RegisterRequest, User, UserResponse};
use crate::repository::UserRepository;

pub(crate) fn hash_password(password: &str) -> UserResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| UserError::PasswordHash(e.to_string()))
}

fn verify_password(password: &str, hash: &str) -> UserResult<bool> {
    let parsed = PasswordHash::new(hash).map_err(|e| UserError::PasswordHash(e.to_string()))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

/// Registration, login and profile lookups
#[derive(Clone)]
pub struct UserService<R: UserRepository> {
    repository: Arc<R>,
    jwt: JwtAuth,
}

impl<R: UserRepository> UserService<R> {
    pub fn new(repository: R, jwt: JwtAuth) -> Self {
        Self {
            repository: Arc::new(repository),
            jwt,
        }
    }

    /// Create a customer account
    #[instrument(skip(self, input), fields(username = %input.username))]
    pub async fn register(&self, input: RegisterRequest) -> UserResult<UserResponse> {
        input
            .validate()
            .map_err(|e| UserError::Validation(e.to_string()))?;

        self.ensure_available(&input.username, &input.email).await?;

        let user = self
            .repository
            .create(NewUser {
                username: input.username,
                email: input.email,
                password_hash: hash_password(&input.password)?,
                first_name: input.first_name,
                last_name: input.last_name,
                role: Role::Customer,
            })
            .await?;

        Ok(user.into())
    }

    /// Check credentials and issue an access token
    #[instrument(skip(self, input), fields(username = %input.username))]
    pub async fn login(&self, input: LoginRequest) -> UserResult<AuthResponse> {
        let Some(user) = self.repository.get_by_username(&input.username).await? else {
            tracing::info!("Login for unknown user");
            return Err(UserError::InvalidCredentials);
        };

        if !verify_password(&input.password, &user.password_hash)? {
            tracing::info!(user_id = %user.id, "Login with wrong password");
            return Err(UserError::InvalidCredentials);
        }

        self.issue_token(user)
    }

    #[instrument(skip(self))]
    pub async fn me(&self, user_id: Uuid) -> UserResult<UserResponse> {
        self.repository
            .get_by_id(user_id)
            .await?
            .map(Into::into)
            .ok_or(UserError::NotFound(user_id))
    }

    /// Create the configured administrator unless that username already exists.
    ///
    /// Returns `true` when an account was created.
    #[instrument(skip(self, seed), fields(username = %seed.username))]
    pub async fn ensure_admin(&self, seed: &AdminSeed) -> UserResult<bool> {
        if self.repository.username_exists(&seed.username).await? {
            tracing::debug!("Admin account already present");
            return Ok(false);
        }

        let admin = self
            .repository
            .create(NewUser {
                username: seed.username.clone(),
                email: seed.email.clone(),
                password_hash: hash_password(&seed.password)?,
                first_name: None,
                last_name: None,
                role: Role::Admin,
            })
            .await?;

        tracing::info!(user_id = %admin.id, "Seeded admin account");
        Ok(true)
    }

    async fn ensure_available(&self, username: &str, email: &str) -> UserResult<()> {
        if self.repository.username_exists(username).await? {
            return Err(UserError::Conflict(format!(
                "Username '{}' is already taken",
                username
            )));
        }
        if self.repository.email_exists(email).await? {
            return Err(UserError::Conflict(format!(
                "Email '{}' is already registered",
                email
            )));
        }
        Ok(())
    }

    fn issue_token(&self, user: User) -> UserResult<AuthResponse> {
        let token = self
            .jwt
            .create_access_token(user.id, &user.email, &user.display_name(), &[user.role])
            .map_err(|e| UserError::Token(e.to_string()))?;

        Ok(AuthResponse {
            token,
            expires_in: self.jwt.expires_in(),
            user: user.into(),
        })
    }
}
