use async_trait::async_trait;
use database::{BaseRepository, NotDeleted, repository};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveValue::Set, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait,
    IntoActiveModel, QueryFilter, QueryOrder, TransactionTrait,
};
use uuid::Uuid;

use super::loader::load_images;
use crate::{
    entity::{product, product_image},
    error::CatalogResult,
    models::{ProductImage, ProductImageDetails},
    repository::ProductImageRepository,
};

/// Clear `is_primary` on the product's live images, except `keep`.
async fn demote_primaries<C: ConnectionTrait>(
    conn: &C,
    product_id: Uuid,
    keep: Option<Uuid>,
) -> Result<u64, DbErr> {
    let mut update = product_image::Entity::update_many()
        .col_expr(product_image::Column::IsPrimary, Expr::value(false))
        .col_expr(product_image::Column::UpdatedAt, Expr::value(repository::now()))
        .filter(product_image::Column::ProductId.eq(product_id))
        .filter(product_image::Column::IsPrimary.eq(true))
        .not_deleted();
    if let Some(id) = keep {
        update = update.filter(product_image::Column::Id.ne(id));
    }
    Ok(update.exec(conn).await?.rows_affected)
}

#[derive(Clone)]
pub struct PgProductImageRepository {
    base: BaseRepository<product_image::Entity>,
}

impl PgProductImageRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }
}

#[async_trait]
impl ProductImageRepository for PgProductImageRepository {
    async fn list_by_product(&self, product_id: Uuid) -> CatalogResult<Vec<ProductImageDetails>> {
        let images = self
            .base
            .query()
            .filter(product_image::Column::ProductId.eq(product_id))
            .order_by_asc(product_image::Column::SortOrder)
            .order_by_asc(product_image::Column::CreatedAt)
            .all(self.base.db())
            .await?;
        Ok(load_images(self.base.db(), images).await?)
    }

    async fn create(
        &self,
        product_id: Uuid,
        upload_id: Uuid,
        sort_order: i32,
        is_primary: bool,
    ) -> CatalogResult<ProductImage> {
        let txn = self.base.db().begin().await?;

        let existing = product_image::Entity::find()
            .not_deleted()
            .filter(product_image::Column::ProductId.eq(product_id))
            .filter(product_image::Column::UploadId.eq(upload_id))
            .one(&txn)
            .await?;
        if let Some(existing) = existing {
            txn.commit().await?;
            return Ok(existing.into());
        }

        if is_primary {
            demote_primaries(&txn, product_id, None).await?;
        }
        let model = repository::insert(
            &txn,
            product_image::ActiveModel {
                id: Set(Uuid::now_v7()),
                product_id: Set(product_id),
                upload_id: Set(upload_id),
                sort_order: Set(sort_order),
                is_primary: Set(is_primary),
                ..Default::default()
            },
        )
        .await?;
        txn.commit().await?;

        tracing::info!(image_id = %model.id, %product_id, %upload_id, is_primary, "Added product image");
        Ok(model.into())
    }

    async fn delete(&self, id: Uuid) -> CatalogResult<bool> {
        let deleted = self.base.soft_delete(id).await?;
        if deleted {
            tracing::info!(image_id = %id, "Deleted product image");
        }
        Ok(deleted)
    }

    async fn set_primary(&self, id: Uuid) -> CatalogResult<Option<ProductImage>> {
        let txn = self.base.db().begin().await?;

        let Some(model) = repository::find_by_id::<product_image::Entity, _>(&txn, id).await?
        else {
            return Ok(None);
        };
        let demoted = demote_primaries(&txn, model.product_id, Some(id)).await?;

        let mut active = model.into_active_model();
        active.is_primary = Set(true);
        let model = repository::update(&txn, active).await?;
        txn.commit().await?;

        tracing::info!(image_id = %id, product_id = %model.product_id, demoted, "Set primary image");
        Ok(Some(model.into()))
    }

    async fn update_order(
        &self,
        id: Uuid,
        sort_order: i32,
    ) -> CatalogResult<Option<ProductImage>> {
        let Some(model) = self.base.find_by_id(id).await? else {
            return Ok(None);
        };

        let mut active = model.into_active_model();
        active.sort_order = Set(sort_order);
        Ok(Some(self.base.update(active).await?.into()))
    }

    async fn product_exists(&self, product_id: Uuid) -> CatalogResult<bool> {
        Ok(
            repository::find_by_id::<product::Entity, _>(self.base.db(), product_id)
                .await?
                .is_some(),
        )
    }

    async fn upload_exists(&self, upload_id: Uuid) -> CatalogResult<bool> {
        Ok(
            repository::find_by_id::<domain_uploads::entity::Entity, _>(self.base.db(), upload_id)
                .await?
                .is_some(),
        )
    }
}
