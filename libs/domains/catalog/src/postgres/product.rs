use async_trait::async_trait;
use database::{BaseRepository, NotDeleted};
use sea_orm::sea_query::{Expr, ExprTrait, Func, LikeExpr};
use sea_orm::{
    ColumnTrait, Condition, DatabaseConnection, EntityTrait, IntoActiveModel, PaginatorTrait,
    QueryFilter, QueryOrder, Select,
};
use uuid::Uuid;

use super::loader::load_details;
use crate::{
    entity::{category, product},
    error::CatalogResult,
    models::{Product, ProductDetails, ProductInput},
    repository::ProductRepository,
};

const LIKE_ESCAPE: char = '\\';

/// `%term%`, with LIKE wildcards in `term` matched literally.
fn like_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | LIKE_ESCAPE) {
            pattern.push(LIKE_ESCAPE);
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

fn lower_like(column: product::Column, pattern: &str) -> Expr {
    Expr::expr(Func::lower(Expr::col(column)))
        .like(LikeExpr::new(pattern).escape(LIKE_ESCAPE))
}

fn exact_like(column: product::Column, pattern: &str) -> Expr {
    Expr::col(column).like(LikeExpr::new(pattern).escape(LIKE_ESCAPE))
}

/// Case-insensitive substring match on `column`.
///
/// `LOWER()` folds only ASCII on SQLite but all of Unicode on Postgres, so
/// the term as typed is matched too: a non-ASCII term always finds its exact
/// spelling, and finds other casings only where the backend folds them.
fn contains(column: product::Column, term: &str) -> Condition {
    Condition::any()
        .add(lower_like(column, &like_pattern(&term.to_lowercase())))
        .add(exact_like(column, &like_pattern(term)))
}

#[derive(Clone)]
pub struct PgProductRepository {
    base: BaseRepository<product::Entity>,
}

impl PgProductRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    fn active(&self) -> Select<product::Entity> {
        self.base
            .query()
            .filter(product::Column::IsActive.eq(true))
    }

    /// Newest first, with relatives resolved
    async fn details(&self, query: Select<product::Entity>) -> CatalogResult<Vec<ProductDetails>> {
        let models = query
            .order_by_desc(product::Column::CreatedAt)
            .all(self.base.db())
            .await?;
        Ok(load_details(self.base.db(), models).await?)
    }
}

#[async_trait]
impl ProductRepository for PgProductRepository {
    async fn create(&self, input: ProductInput) -> CatalogResult<Product> {
        let model = self.base.insert(input.into()).await?;
        tracing::info!(product_id = %model.id, name = %model.name, "Created product");
        Ok(model.into())
    }

    async fn get_by_id(&self, id: Uuid) -> CatalogResult<Option<Product>> {
        Ok(self.base.find_by_id(id).await?.map(Into::into))
    }

    async fn get_details(&self, id: Uuid) -> CatalogResult<Option<ProductDetails>> {
        let Some(model) = self.base.find_by_id(id).await? else {
            return Ok(None);
        };
        Ok(load_details(self.base.db(), vec![model]).await?.pop())
    }

    async fn list_all(&self) -> CatalogResult<Vec<ProductDetails>> {
        self.details(self.base.query()).await
    }

    async fn list_active(&self) -> CatalogResult<Vec<ProductDetails>> {
        self.details(self.active()).await
    }

    async fn list_by_category(&self, category_id: Uuid) -> CatalogResult<Vec<ProductDetails>> {
        self.details(
            self.active()
                .filter(product::Column::CategoryId.eq(category_id)),
        )
        .await
    }

    async fn list_featured(&self) -> CatalogResult<Vec<ProductDetails>> {
        self.details(self.active().filter(product::Column::IsFeatured.eq(true)))
            .await
    }

    async fn search(&self, term: &str) -> CatalogResult<Vec<ProductDetails>> {
        let matches = Condition::any()
            .add(contains(product::Column::Name, term))
            .add(contains(product::Column::Description, term))
            .add(contains(product::Column::Sku, term));

        self.details(self.active().filter(matches)).await
    }

    async fn update(&self, id: Uuid, input: ProductInput) -> CatalogResult<Option<Product>> {
        let Some(model) = self.base.find_by_id(id).await? else {
            return Ok(None);
        };

        let mut active = model.into_active_model();
        active.apply(input);
        let model = self.base.update(active).await?;
        tracing::info!(product_id = %id, "Updated product");
        Ok(Some(model.into()))
    }

    async fn delete(&self, id: Uuid) -> CatalogResult<bool> {
        let deleted = self.base.soft_delete(id).await?;
        if deleted {
            tracing::info!(product_id = %id, "Deleted product");
        }
        Ok(deleted)
    }

    async fn category_exists(&self, category_id: Uuid) -> CatalogResult<bool> {
        let count = category::Entity::find()
            .not_deleted()
            .filter(category::Column::Id.eq(category_id))
            .count(self.base.db())
            .await?;
        Ok(count > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_like_pattern_keeps_case_and_wraps() {
        assert_eq!(like_pattern("Boot"), "%Boot%");
        assert_eq!(like_pattern("Mütze"), "%Mütze%");
    }

    #[test]
    fn test_like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("50%_off"), "%50\\%\\_off%");
        assert_eq!(like_pattern("a\\b"), "%a\\\\b%");
    }
}
