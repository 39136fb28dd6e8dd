use async_trait::async_trait;
use uuid::Uuid;

use crate::error::UploadResult;
use crate::models::{NewUpload, Upload};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UploadRepository: Send + Sync {
    async fn create(&self, input: NewUpload) -> UploadResult<Upload>;

    async fn get_by_id(&self, id: Uuid) -> UploadResult<Option<Upload>>;

    /// Newest first
    async fn list(&self) -> UploadResult<Vec<Upload>>;

    /// Soft delete; `false` when no live row has this id
    async fn delete(&self, id: Uuid) -> UploadResult<bool>;
}
