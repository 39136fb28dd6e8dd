use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Metadata of a stored file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Upload {
    pub id: Uuid,
    /// Original file name as sent by the client
    pub name: String,
    pub size_mb: f64,
    /// Path relative to the storage root
    pub file_path: String,
    pub content_type: String,
    /// Lowercased, with the leading dot (`.jpg`)
    pub extension: String,
    pub uploader_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewUpload {
    pub name: String,
    pub size_mb: f64,
    pub file_path: String,
    pub content_type: String,
    pub extension: String,
    pub uploader_id: Option<Uuid>,
}

/// Bytes to megabytes, as stored in `size_mb`.
pub fn size_in_mb(len: usize) -> f64 {
    len as f64 / 1024.0 / 1024.0
}
