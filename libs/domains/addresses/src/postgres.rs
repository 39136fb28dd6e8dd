use async_trait::async_trait;
use database::{BaseRepository, NotDeleted, repository};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveValue::Set, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    IntoActiveModel, QueryFilter, QueryOrder, TransactionTrait,
};
use uuid::Uuid;

use crate::{
    entity,
    error::AddressResult,
    models::{Address, AddressInput},
    repository::AddressRepository,
};

/// Clear `is_default` on the user's live addresses, except `keep`.
async fn clear_defaults<C: ConnectionTrait>(
    conn: &C,
    user_id: Uuid,
    keep: Option<Uuid>,
) -> Result<u64, DbErr> {
    let mut update = entity::Entity::update_many()
        .col_expr(entity::Column::IsDefault, Expr::value(false))
        .col_expr(entity::Column::UpdatedAt, Expr::value(repository::now()))
        .filter(entity::Column::UserId.eq(user_id))
        .filter(entity::Column::IsDefault.eq(true))
        .not_deleted();
    if let Some(id) = keep {
        update = update.filter(entity::Column::Id.ne(id));
    }
    Ok(update.exec(conn).await?.rows_affected)
}

#[derive(Clone)]
pub struct PgAddressRepository {
    base: BaseRepository<entity::Entity>,
}

impl PgAddressRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }
}

#[async_trait]
impl AddressRepository for PgAddressRepository {
    async fn create(&self, user_id: Uuid, input: AddressInput) -> AddressResult<Address> {
        let txn = self.base.db().begin().await?;
        if input.is_default {
            clear_defaults(&txn, user_id, None).await?;
        }
        let model = repository::insert(&txn, entity::ActiveModel::new(user_id, input)).await?;
        txn.commit().await?;

        tracing::info!(address_id = %model.id, %user_id, is_default = model.is_default, "Created address");
        Ok(model.into())
    }

    async fn get_by_id(&self, id: Uuid) -> AddressResult<Option<Address>> {
        Ok(self.base.find_by_id(id).await?.map(Into::into))
    }

    async fn list_by_user(&self, user_id: Uuid) -> AddressResult<Vec<Address>> {
        let models = self
            .base
            .query()
            .filter(entity::Column::UserId.eq(user_id))
            .order_by_desc(entity::Column::IsDefault)
            .order_by_desc(entity::Column::CreatedAt)
            .all(self.base.db())
            .await?;
        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn get_default(&self, user_id: Uuid) -> AddressResult<Option<Address>> {
        let model = self
            .base
            .query()
            .filter(entity::Column::UserId.eq(user_id))
            .filter(entity::Column::IsDefault.eq(true))
            .one(self.base.db())
            .await?;
        Ok(model.map(Into::into))
    }

    async fn update(&self, id: Uuid, input: AddressInput) -> AddressResult<Option<Address>> {
        let txn = self.base.db().begin().await?;
        let Some(model) = repository::find_by_id::<entity::Entity, _>(&txn, id).await? else {
            return Ok(None);
        };

        if input.is_default {
            clear_defaults(&txn, model.user_id, Some(id)).await?;
        }
        let mut active = model.into_active_model();
        active.apply(input);
        let model = repository::update(&txn, active).await?;
        txn.commit().await?;

        tracing::info!(address_id = %id, "Updated address");
        Ok(Some(model.into()))
    }

    async fn delete(&self, id: Uuid) -> AddressResult<bool> {
        let deleted = self.base.soft_delete(id).await?;
        if deleted {
            tracing::info!(address_id = %id, "Deleted address");
        }
        Ok(deleted)
    }

    async fn set_default(&self, id: Uuid, user_id: Uuid) -> AddressResult<Option<Address>> {
        let txn = self.base.db().begin().await?;
        let target = repository::find_by_id::<entity::Entity, _>(&txn, id).await?;
        let Some(model) = target.filter(|m| m.user_id == user_id) else {
            tracing::warn!(address_id = %id, %user_id, "Refused to set default on missing or foreign address");
            return Ok(None);
        };

        let cleared = clear_defaults(&txn, user_id, Some(id)).await?;
        let mut active = model.into_active_model();
        active.is_default = Set(true);
        let model = repository::update(&txn, active).await?;
        txn.commit().await?;

        tracing::info!(address_id = %id, %user_id, cleared, "Set default address");
        Ok(Some(model.into()))
    }
}
