//! sea-orm implementations of the catalog repositories

mod category;
mod image;
mod loader;
mod product;

pub use category::PgCategoryRepository;
pub use image::PgProductImageRepository;
pub use loader::{load_details, load_images};
pub use product::PgProductRepository;
