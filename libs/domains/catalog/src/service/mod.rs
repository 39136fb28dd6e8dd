mod category;
mod image;
mod product;

pub use category::{CategoryService, MAX_CATEGORY_DEPTH};
pub use image::ProductImageService;
pub use product::ProductService;
