use async_trait::async_trait;
use database::BaseRepository;
use sea_orm::{ColumnTrait, DatabaseConnection, IntoActiveModel, QueryFilter, QueryOrder, Select};
use uuid::Uuid;

use crate::{
    entity::category,
    error::CatalogResult,
    models::{Category, CategoryInput},
    repository::CategoryRepository,
};

#[derive(Clone)]
pub struct PgCategoryRepository {
    base: BaseRepository<category::Entity>,
}

impl PgCategoryRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    async fn sorted(&self, query: Select<category::Entity>) -> CatalogResult<Vec<Category>> {
        let models = query
            .order_by_asc(category::Column::SortOrder)
            .order_by_asc(category::Column::Name)
            .all(self.base.db())
            .await?;
        Ok(models.into_iter().map(Into::into).collect())
    }

    fn active(&self) -> Select<category::Entity> {
        self.base
            .query()
            .filter(category::Column::IsActive.eq(true))
    }
}

#[async_trait]
impl CategoryRepository for PgCategoryRepository {
    async fn create(&self, input: CategoryInput) -> CatalogResult<Category> {
        let model = self.base.insert(input.into()).await?;
        tracing::info!(category_id = %model.id, name = %model.name, "Created category");
        Ok(model.into())
    }

    async fn get_by_id(&self, id: Uuid) -> CatalogResult<Option<Category>> {
        Ok(self.base.find_by_id(id).await?.map(Into::into))
    }

    async fn list_all(&self) -> CatalogResult<Vec<Category>> {
        self.sorted(self.base.query()).await
    }

    async fn list_active(&self) -> CatalogResult<Vec<Category>> {
        self.sorted(self.active()).await
    }

    async fn list_root(&self) -> CatalogResult<Vec<Category>> {
        self.sorted(self.active().filter(category::Column::ParentId.is_null()))
            .await
    }

    async fn list_children(&self, parent_id: Uuid) -> CatalogResult<Vec<Category>> {
        self.sorted(self.active().filter(category::Column::ParentId.eq(parent_id)))
            .await
    }

    async fn update(&self, id: Uuid, input: CategoryInput) -> CatalogResult<Option<Category>> {
        let Some(model) = self.base.find_by_id(id).await? else {
            return Ok(None);
        };

        let mut active = model.into_active_model();
        active.apply(input);
        let model = self.base.update(active).await?;
        tracing::info!(category_id = %id, "Updated category");
        Ok(Some(model.into()))
    }

    async fn delete(&self, id: Uuid) -> CatalogResult<bool> {
        let deleted = self.base.soft_delete(id).await?;
        if deleted {
            tracing::info!(category_id = %id, "Deleted category");
        }
        Ok(deleted)
    }
}
