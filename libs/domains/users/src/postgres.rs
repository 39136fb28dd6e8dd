use async_trait::async_trait;
use database::BaseRepository;
use sea_orm::{
    ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait, QueryFilter, SqlErr,
};
use uuid::Uuid;

use crate::{
    entity,
    error::{UserError, UserResult},
    models::{NewUser, User},
    repository::UserRepository,
};

#[derive(Clone)]
pub struct PgUserRepository {
    base: BaseRepository<entity::Entity>,
}

impl PgUserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }
}

fn map_unique_violation(err: DbErr, username: &str) -> UserError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => {
            UserError::Conflict(format!("User '{}' already exists", username))
        }
        _ => UserError::Database(err),
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn create(&self, input: NewUser) -> UserResult<User> {
        let username = input.username.clone();
        let model = self
            .base
            .insert(input.into())
            .await
            .map_err(|e| map_unique_violation(e, &username))?;

        tracing::info!(user_id = %model.id, username = %model.username, "Created user");
        Ok(model.into())
    }

    async fn get_by_id(&self, id: Uuid) -> UserResult<Option<User>> {
        Ok(self.base.find_by_id(id).await?.map(Into::into))
    }

    async fn get_by_username(&self, username: &str) -> UserResult<Option<User>> {
        let model = self
            .base
            .query()
            .filter(entity::Column::Username.eq(username))
            .one(self.base.db())
            .await?;
        Ok(model.map(Into::into))
    }

    async fn username_exists(&self, username: &str) -> UserResult<bool> {
        // Uniqueness holds across deleted rows too, the index does not know about soft delete
        let count = entity::Entity::find()
            .filter(entity::Column::Username.eq(username))
            .count(self.base.db())
            .await?;
        Ok(count > 0)
    }

    async fn email_exists(&self, email: &str) -> UserResult<bool> {
        let count = entity::Entity::find()
            .filter(entity::Column::Email.eq(email))
            .count(self.base.db())
            .await?;
        Ok(count > 0)
    }
}
