//! Catalog domain: categories, products and product images
//!
//! Categories form a tree through `parent_id`; parent assignment is checked
//! for cycles. Products belong to one category and are listed with their
//! category and ordered images resolved. Each product has at most one live
//! primary image.

pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;

pub use error::{CatalogError, CatalogResult};
pub use models::{
    AddProductImage, Category, CategoryInput, Product, ProductDetails, ProductImage,
    ProductImageDetails, ProductInput, SearchQuery, UpdateImageOrder,
};
pub use postgres::{
    PgCategoryRepository, PgProductImageRepository, PgProductRepository, load_details,
};
pub use repository::{CategoryRepository, ProductImageRepository, ProductRepository};
pub use service::{CategoryService, ProductImageService, ProductService};
