use async_trait::async_trait;
use uuid::Uuid;

use crate::error::UserResult;
use crate::models::{NewUser, User};

/// Persistence for user accounts. Lookups ignore soft-deleted rows.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a user; a taken username or email is a `Conflict`
    async fn create(&self, input: NewUser) -> UserResult<User>;

    async fn get_by_id(&self, id: Uuid) -> UserResult<Option<User>>;

    async fn get_by_username(&self, username: &str) -> UserResult<Option<User>>;

    async fn username_exists(&self, username: &str) -> UserResult<bool>;

    async fn email_exists(&self, email: &str) -> UserResult<bool>;
}
