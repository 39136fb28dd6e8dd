use async_trait::async_trait;
use database::BaseRepository;
use sea_orm::{DatabaseConnection, QueryOrder};
use uuid::Uuid;

use crate::{
    entity,
    error::UploadResult,
    models::{NewUpload, Upload},
    repository::UploadRepository,
};

#[derive(Clone)]
pub struct PgUploadRepository {
    base: BaseRepository<entity::Entity>,
}

impl PgUploadRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }
}

#[async_trait]
impl UploadRepository for PgUploadRepository {
    async fn create(&self, input: NewUpload) -> UploadResult<Upload> {
        let model = self.base.insert(input.into()).await?;
        tracing::info!(upload_id = %model.id, name = %model.name, "Created upload");
        Ok(model.into())
    }

    async fn get_by_id(&self, id: Uuid) -> UploadResult<Option<Upload>> {
        Ok(self.base.find_by_id(id).await?.map(Into::into))
    }

    async fn list(&self) -> UploadResult<Vec<Upload>> {
        let models = self
            .base
            .query()
            .order_by_desc(entity::Column::CreatedAt)
            .all(self.base.db())
            .await?;
        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn delete(&self, id: Uuid) -> UploadResult<bool> {
        let deleted = self.base.soft_delete(id).await?;
        if deleted {
            tracing::info!(upload_id = %id, "Deleted upload");
        }
        Ok(deleted)
    }
}
