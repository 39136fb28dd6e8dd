use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;

use crate::error::{UploadError, UploadResult};
use crate::models::{NewUpload, Upload, size_in_mb};
use crate::repository::UploadRepository;
use crate::storage::{FileStorage, extension_of};

const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

#[derive(Clone)]
pub struct UploadService<R: UploadRepository, S: FileStorage> {
    repository: Arc<R>,
    storage: Arc<S>,
    max_bytes: usize,
}

impl<R: UploadRepository, S: FileStorage> UploadService<R, S> {
    pub fn new(repository: R, storage: S, max_bytes: usize) -> Self {
        Self {
            repository: Arc::new(repository),
            storage: Arc::new(storage),
            max_bytes,
        }
    }

    pub fn max_bytes(&self) -> usize {
        self.max_bytes
    }

    /// Store the bytes, then record their metadata.
    #[instrument(skip(self, bytes), fields(size = bytes.len()))]
    pub async fn upload(
        &self,
        uploader_id: Option<Uuid>,
        file_name: &str,
        content_type: Option<&str>,
        bytes: &[u8],
    ) -> UploadResult<Upload> {
        if bytes.is_empty() {
            return Err(UploadError::Validation("No file uploaded".to_string()));
        }
        if bytes.len() > self.max_bytes {
            return Err(UploadError::TooLarge {
                size: bytes.len(),
                limit: self.max_bytes,
            });
        }

        let file_path = self.storage.save(file_name, bytes).await?;

        self.repository
            .create(NewUpload {
                name: file_name.to_string(),
                size_mb: size_in_mb(bytes.len()),
                file_path,
                content_type: content_type
                    .filter(|ct| !ct.is_empty())
                    .unwrap_or(DEFAULT_CONTENT_TYPE)
                    .to_string(),
                extension: extension_of(file_name),
                uploader_id,
            })
            .await
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: Uuid) -> UploadResult<Upload> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or(UploadError::NotFound(id))
    }

    #[instrument(skip(self))]
    pub async fn list(&self) -> UploadResult<Vec<Upload>> {
        self.repository.list().await
    }

    /// Metadata plus file contents. A row whose file is gone is reported as not found.
    #[instrument(skip(self))]
    pub async fn download(&self, id: Uuid) -> UploadResult<(Upload, Vec<u8>)> {
        let upload = self.get(id).await?;

        match self.storage.read(&upload.file_path).await {
            Ok(bytes) => Ok((upload, bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::warn!(upload_id = %id, path = %upload.file_path, "Stored file is missing");
                Err(UploadError::FileMissing(id))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Soft delete. The file itself stays in storage.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: Uuid) -> UploadResult<()> {
        if !self.repository.delete(id).await? {
            return Err(UploadError::NotFound(id));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MockUploadRepository;
    use crate::storage::MockFileStorage;
    use chrono::Utc;
    use std::io;

    fn echo_create(repo: &mut MockUploadRepository) {
        repo.expect_create().returning(|input| {
            Ok(Upload {
                id: Uuid::now_v7(),
                name: input.name,
                size_mb: input.size_mb,
                file_path: input.file_path,
                content_type: input.content_type,
                extension: input.extension,
                uploader_id: input.uploader_id,
                created_at: Utc::now(),
                updated_at: Utc::now(),
            })
        });
    }

    fn sample(id: Uuid) -> Upload {
        Upload {
            id,
            name: "shirt.jpg".into(),
            size_mb: 0.5,
            file_path: "abc.jpg".into(),
            content_type: "image/jpeg".into(),
            extension: ".jpg".into(),
            uploader_id: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_upload_derives_metadata() {
        let mut repo = MockUploadRepository::new();
        echo_create(&mut repo);
        let mut storage = MockFileStorage::new();
        storage
            .expect_save()
            .returning(|_, _| Ok("0190-stored.jpg".to_string()));

        let service = UploadService::new(repo, storage, 4 * 1024 * 1024);
        let uploader = Uuid::now_v7();
        let bytes = vec![7u8; 1024 * 1024 + 512 * 1024];

        let upload = service
            .upload(Some(uploader), "Summer Shirt.JPG", Some("image/jpeg"), &bytes)
            .await
            .unwrap();

        assert_eq!(upload.name, "Summer Shirt.JPG");
        assert_eq!(upload.extension, ".jpg");
        assert_eq!(upload.size_mb, 1.5);
        assert_eq!(upload.file_path, "0190-stored.jpg");
        assert_eq!(upload.uploader_id, Some(uploader));
    }

    #[tokio::test]
    async fn test_empty_file_is_rejected_without_storing() {
        let repo = MockUploadRepository::new();
        let mut storage = MockFileStorage::new();
        storage.expect_save().never();

        let service = UploadService::new(repo, storage, 1024);
        let result = service.upload(None, "a.png", None, &[]).await;

        assert!(matches!(result, Err(UploadError::Validation(_))));
    }

    #[tokio::test]
    async fn test_oversized_file_is_rejected() {
        let service = UploadService::new(MockUploadRepository::new(), MockFileStorage::new(), 4);
        let result = service.upload(None, "a.png", None, b"12345").await;

        assert!(matches!(result, Err(UploadError::TooLarge { size: 5, limit: 4 })));
    }

    #[tokio::test]
    async fn test_missing_content_type_falls_back() {
        let mut repo = MockUploadRepository::new();
        echo_create(&mut repo);
        let mut storage = MockFileStorage::new();
        storage.expect_save().returning(|_, _| Ok("x".to_string()));

        let service = UploadService::new(repo, storage, 1024);
        let upload = service.upload(None, "notes", Some(""), b"hi").await.unwrap();

        assert_eq!(upload.content_type, DEFAULT_CONTENT_TYPE);
        assert_eq!(upload.extension, "");
    }

    #[tokio::test]
    async fn test_download_with_missing_file_is_not_found() {
        let id = Uuid::now_v7();
        let mut repo = MockUploadRepository::new();
        repo.expect_get_by_id().returning(move |id| Ok(Some(sample(id))));
        let mut storage = MockFileStorage::new();
        storage
            .expect_read()
            .returning(|_| Err(io::Error::from(io::ErrorKind::NotFound)));

        let service = UploadService::new(repo, storage, 1024);

        assert!(matches!(
            service.download(id).await,
            Err(UploadError::FileMissing(missing)) if missing == id
        ));
    }

    #[tokio::test]
    async fn test_delete_unknown_is_not_found() {
        let mut repo = MockUploadRepository::new();
        repo.expect_delete().returning(|_| Ok(false));

        let service = UploadService::new(repo, MockFileStorage::new(), 1024);

        assert!(matches!(
            service.delete(Uuid::now_v7()).await,
            Err(UploadError::NotFound(_))
        ));
    }
}
