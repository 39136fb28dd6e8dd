use async_trait::async_trait;
use uuid::Uuid;

use crate::error::CatalogResult;
use crate::models::{
    Category, CategoryInput, Product, ProductDetails, ProductImage, ProductImageDetails,
    ProductInput,
};

/// Category persistence. Every read excludes soft-deleted rows.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    async fn create(&self, input: CategoryInput) -> CatalogResult<Category>;

    async fn get_by_id(&self, id: Uuid) -> CatalogResult<Option<Category>>;

    async fn list_all(&self) -> CatalogResult<Vec<Category>>;

    /// Active categories by sort order
    async fn list_active(&self) -> CatalogResult<Vec<Category>>;

    /// Active categories without a parent, by sort order
    async fn list_root(&self) -> CatalogResult<Vec<Category>>;

    /// Active direct children of `parent_id`, by sort order
    async fn list_children(&self, parent_id: Uuid) -> CatalogResult<Vec<Category>>;

    async fn update(&self, id: Uuid, input: CategoryInput) -> CatalogResult<Option<Category>>;

    async fn delete(&self, id: Uuid) -> CatalogResult<bool>;
}

/// Product persistence. Listing methods resolve category and images.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    async fn create(&self, input: ProductInput) -> CatalogResult<Product>;

    async fn get_by_id(&self, id: Uuid) -> CatalogResult<Option<Product>>;

    async fn get_details(&self, id: Uuid) -> CatalogResult<Option<ProductDetails>>;

    async fn list_all(&self) -> CatalogResult<Vec<ProductDetails>>;

    async fn list_active(&self) -> CatalogResult<Vec<ProductDetails>>;

    async fn list_by_category(&self, category_id: Uuid) -> CatalogResult<Vec<ProductDetails>>;

    async fn list_featured(&self) -> CatalogResult<Vec<ProductDetails>>;

    /// Case-insensitive substring match on name, description and SKU among
    /// active products. `term` must already be trimmed and non-empty.
    async fn search(&self, term: &str) -> CatalogResult<Vec<ProductDetails>>;

    async fn update(&self, id: Uuid, input: ProductInput) -> CatalogResult<Option<Product>>;

    async fn delete(&self, id: Uuid) -> CatalogResult<bool>;

    async fn category_exists(&self, category_id: Uuid) -> CatalogResult<bool>;
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductImageRepository: Send + Sync {
    /// Images of one product by sort order, each with its upload
    async fn list_by_product(&self, product_id: Uuid) -> CatalogResult<Vec<ProductImageDetails>>;

    /// Returns the existing live row for `(product_id, upload_id)` untouched,
    /// otherwise inserts one. A primary insert demotes the product's other
    /// images in the same transaction.
    async fn create(
        &self,
        product_id: Uuid,
        upload_id: Uuid,
        sort_order: i32,
        is_primary: bool,
    ) -> CatalogResult<ProductImage>;

    async fn delete(&self, id: Uuid) -> CatalogResult<bool>;

    async fn set_primary(&self, id: Uuid) -> CatalogResult<Option<ProductImage>>;

    async fn update_order(&self, id: Uuid, sort_order: i32)
    -> CatalogResult<Option<ProductImage>>;

    async fn product_exists(&self, product_id: Uuid) -> CatalogResult<bool>;

    async fn upload_exists(&self, upload_id: Uuid) -> CatalogResult<bool>;
}
