use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;

use crate::error::{CatalogError, CatalogResult};
use crate::models::{AddProductImage, ProductImage, ProductImageDetails};
use crate::repository::ProductImageRepository;

/// Image gallery of a product: at most one live primary image, ordered by `sort_order`
#[derive(Clone)]
pub struct ProductImageService<R: ProductImageRepository> {
    repository: Arc<R>,
}

impl<R: ProductImageRepository> ProductImageService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    #[instrument(skip(self))]
    pub async fn list_by_product(&self, product_id: Uuid) -> CatalogResult<Vec<ProductImageDetails>> {
        self.ensure_product(product_id).await?;
        self.repository.list_by_product(product_id).await
    }

    /// Attach an upload to a product. Re-adding the same upload returns the
    /// existing image unchanged.
    #[instrument(skip(self, input), fields(upload_id = %input.upload_id))]
    pub async fn add(&self, product_id: Uuid, input: AddProductImage) -> CatalogResult<ProductImage> {
        self.ensure_product(product_id).await?;
        if !self.repository.upload_exists(input.upload_id).await? {
            return Err(CatalogError::UploadNotFound(input.upload_id));
        }

        self.repository
            .create(
                product_id,
                input.upload_id,
                input.sort_order.unwrap_or(0),
                input.is_primary.unwrap_or(false),
            )
            .await
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: Uuid) -> CatalogResult<()> {
        if self.repository.delete(id).await? {
            Ok(())
        } else {
            Err(CatalogError::ImageNotFound(id))
        }
    }

    #[instrument(skip(self))]
    pub async fn set_primary(&self, id: Uuid) -> CatalogResult<ProductImage> {
        self.repository
            .set_primary(id)
            .await?
            .ok_or(CatalogError::ImageNotFound(id))
    }

    #[instrument(skip(self))]
    pub async fn update_order(&self, id: Uuid, sort_order: i32) -> CatalogResult<ProductImage> {
        self.repository
            .update_order(id, sort_order)
            .await?
            .ok_or(CatalogError::ImageNotFound(id))
    }

    async fn ensure_product(&self, product_id: Uuid) -> CatalogResult<()> {
        if self.repository.product_exists(product_id).await? {
            Ok(())
        } else {
            Err(CatalogError::ProductNotFound(product_id))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MockProductImageRepository;
    use chrono::Utc;

    fn image(product_id: Uuid, upload_id: Uuid, sort_order: i32, is_primary: bool) -> ProductImage {
        ProductImage {
            id: Uuid::now_v7(),
            product_id,
            upload_id,
            sort_order,
            is_primary,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_add_defaults_order_and_primary() {
        let mut repo = MockProductImageRepository::new();
        repo.expect_product_exists().returning(|_| Ok(true));
        repo.expect_upload_exists().returning(|_| Ok(true));
        repo.expect_create()
            .withf(|_, _, sort_order, is_primary| *sort_order == 0 && !*is_primary)
            .times(1)
            .returning(|p, u, o, primary| Ok(image(p, u, o, primary)));

        let service = ProductImageService::new(repo);
        let added = service
            .add(
                Uuid::now_v7(),
                AddProductImage {
                    upload_id: Uuid::now_v7(),
                    sort_order: None,
                    is_primary: None,
                },
            )
            .await
            .unwrap();
        assert!(!added.is_primary);
    }

    #[tokio::test]
    async fn test_add_requires_upload() {
        let mut repo = MockProductImageRepository::new();
        repo.expect_product_exists().returning(|_| Ok(true));
        repo.expect_upload_exists().returning(|_| Ok(false));
        repo.expect_create().never();

        let service = ProductImageService::new(repo);
        let upload_id = Uuid::now_v7();
        let result = service
            .add(
                Uuid::now_v7(),
                AddProductImage {
                    upload_id,
                    sort_order: Some(1),
                    is_primary: Some(true),
                },
            )
            .await;
        assert!(matches!(result, Err(CatalogError::UploadNotFound(id)) if id == upload_id));
    }

    #[tokio::test]
    async fn test_list_for_missing_product() {
        let mut repo = MockProductImageRepository::new();
        repo.expect_product_exists().returning(|_| Ok(false));
        repo.expect_list_by_product().never();

        let service = ProductImageService::new(repo);
        assert!(matches!(
            service.list_by_product(Uuid::now_v7()).await,
            Err(CatalogError::ProductNotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_missing_image_operations_are_not_found() {
        let mut repo = MockProductImageRepository::new();
        repo.expect_set_primary().returning(|_| Ok(None));
        repo.expect_update_order().returning(|_, _| Ok(None));
        repo.expect_delete().returning(|_| Ok(false));

        let service = ProductImageService::new(repo);
        let id = Uuid::now_v7();
        assert!(matches!(
            service.set_primary(id).await,
            Err(CatalogError::ImageNotFound(_))
        ));
        assert!(matches!(
            service.update_order(id, 3).await,
            Err(CatalogError::ImageNotFound(_))
        ));
        assert!(matches!(
            service.delete(id).await,
            Err(CatalogError::ImageNotFound(_))
        ));
    }
}
