//! Categories and products share the catalog crate but mount separately.

use axum::Router;
use domain_catalog::{
    CategoryService, PgCategoryRepository, PgProductImageRepository, PgProductRepository,
    ProductImageService, ProductService, handlers,
};

use crate::state::AppState;

pub fn categories(state: &AppState) -> Router {
    let service = CategoryService::new(PgCategoryRepository::new(state.db.clone()));
    handlers::categories::router(service)
}

pub fn products(state: &AppState) -> Router {
    let products = ProductService::new(PgProductRepository::new(state.db.clone()));
    let images = ProductImageService::new(PgProductImageRepository::new(state.db.clone()));
    handlers::products::router(products, images)
}
