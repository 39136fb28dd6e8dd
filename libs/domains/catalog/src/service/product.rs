use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;

use crate::error::{CatalogError, CatalogResult};
use crate::models::{Product, ProductDetails, ProductInput};
use crate::repository::ProductRepository;

#[derive(Clone)]
pub struct ProductService<R: ProductRepository> {
    repository: Arc<R>,
}

impl<R: ProductRepository> ProductService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    #[instrument(skip(self, input), fields(name = %input.name))]
    pub async fn create(&self, input: ProductInput) -> CatalogResult<Product> {
        self.ensure_category(input.category_id).await?;
        self.repository.create(input).await
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: Uuid) -> CatalogResult<ProductDetails> {
        self.repository
            .get_details(id)
            .await?
            .ok_or(CatalogError::ProductNotFound(id))
    }

    #[instrument(skip(self))]
    pub async fn list_all(&self) -> CatalogResult<Vec<ProductDetails>> {
        self.repository.list_all().await
    }

    #[instrument(skip(self))]
    pub async fn list_active(&self) -> CatalogResult<Vec<ProductDetails>> {
        self.repository.list_active().await
    }

    #[instrument(skip(self))]
    pub async fn list_featured(&self) -> CatalogResult<Vec<ProductDetails>> {
        self.repository.list_featured().await
    }

    #[instrument(skip(self))]
    pub async fn list_by_category(&self, category_id: Uuid) -> CatalogResult<Vec<ProductDetails>> {
        self.repository.list_by_category(category_id).await
    }

    /// Blank terms are rejected rather than matching everything
    #[instrument(skip(self))]
    pub async fn search(&self, term: &str) -> CatalogResult<Vec<ProductDetails>> {
        let term = term.trim();
        if term.is_empty() {
            return Err(CatalogError::Validation(
                "Search term must not be empty".to_string(),
            ));
        }
        self.repository.search(term).await
    }

    #[instrument(skip(self, input))]
    pub async fn update(&self, id: Uuid, input: ProductInput) -> CatalogResult<Product> {
        self.ensure_category(input.category_id).await?;
        self.repository
            .update(id, input)
            .await?
            .ok_or(CatalogError::ProductNotFound(id))
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: Uuid) -> CatalogResult<()> {
        if self.repository.delete(id).await? {
            Ok(())
        } else {
            Err(CatalogError::ProductNotFound(id))
        }
    }

    async fn ensure_category(&self, category_id: Uuid) -> CatalogResult<()> {
        if self.repository.category_exists(category_id).await? {
            Ok(())
        } else {
            Err(CatalogError::CategoryNotFound(category_id))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MockProductRepository;
    use chrono::Utc;
    use rust_decimal::Decimal;

    fn input(category_id: Uuid) -> ProductInput {
        ProductInput {
            name: "Chelsea boot".into(),
            description: None,
            price: Decimal::new(8999, 2),
            discount_price: None,
            stock_quantity: 4,
            sku: Some("BOOT-1".into()),
            category_id,
            is_active: true,
            is_featured: false,
        }
    }

    fn from_input(id: Uuid, input: ProductInput) -> Product {
        Product {
            id,
            name: input.name,
            description: input.description,
            price: input.price,
            discount_price: input.discount_price,
            stock_quantity: input.stock_quantity,
            sku: input.sku,
            category_id: input.category_id,
            is_active: input.is_active,
            is_featured: input.is_featured,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_search_rejects_blank_terms() {
        let mut repo = MockProductRepository::new();
        repo.expect_search().never();

        let service = ProductService::new(repo);
        for term in ["", "   ", "\t\n"] {
            assert!(matches!(
                service.search(term).await,
                Err(CatalogError::Validation(_))
            ));
        }
    }

    #[tokio::test]
    async fn test_search_passes_trimmed_term() {
        let mut repo = MockProductRepository::new();
        repo.expect_search()
            .withf(|term| term.trim() == "boot")
            .times(1)
            .returning(|_| Ok(vec![]));

        let service = ProductService::new(repo);
        assert!(service.search("  boot ").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_requires_existing_category() {
        let mut repo = MockProductRepository::new();
        repo.expect_category_exists().returning(|_| Ok(false));
        repo.expect_create().never();

        let service = ProductService::new(repo);
        let category_id = Uuid::now_v7();
        let result = service.create(input(category_id)).await;
        assert!(matches!(result, Err(CatalogError::CategoryNotFound(id)) if id == category_id));
    }

    #[tokio::test]
    async fn test_create_persists_input() {
        let mut repo = MockProductRepository::new();
        repo.expect_category_exists().returning(|_| Ok(true));
        repo.expect_create()
            .times(1)
            .returning(|input| Ok(from_input(Uuid::now_v7(), input)));

        let service = ProductService::new(repo);
        let product = service.create(input(Uuid::now_v7())).await.unwrap();
        assert_eq!(product.price, Decimal::new(8999, 2));
        assert_eq!(product.sku.as_deref(), Some("BOOT-1"));
    }

    #[tokio::test]
    async fn test_update_missing_product() {
        let mut repo = MockProductRepository::new();
        repo.expect_category_exists().returning(|_| Ok(true));
        repo.expect_update().returning(|_, _| Ok(None));

        let service = ProductService::new(repo);
        let result = service.update(Uuid::now_v7(), input(Uuid::now_v7())).await;
        assert!(matches!(result, Err(CatalogError::ProductNotFound(_))));
    }

    #[tokio::test]
    async fn test_get_missing_product() {
        let mut repo = MockProductRepository::new();
        repo.expect_get_details().returning(|_| Ok(None));

        let service = ProductService::new(repo);
        assert!(matches!(
            service.get(Uuid::now_v7()).await,
            Err(CatalogError::ProductNotFound(_))
        ));
    }
}
