//! Uploads domain
//!
//! File bytes go to a [`FileStorage`] backend; the metadata row (original
//! name, size in MB, relative path, content type, extension, uploader) goes
//! to the `uploads` table. Product images reference uploads by id.

pub mod config;
pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;
pub mod storage;

pub use config::UploadConfig;
pub use error::{UploadError, UploadResult};
pub use models::{NewUpload, Upload};
pub use postgres::PgUploadRepository;
pub use repository::UploadRepository;
pub use service::UploadService;
pub use storage::{FileStorage, LocalFileStorage};
