use async_trait::async_trait;
use std::io;
use std::path::{Component, Path, PathBuf};
use uuid::Uuid;

/// Byte storage for uploaded files.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FileStorage: Send + Sync {
    /// Store `bytes` and return the path to persist, relative to the storage root.
    async fn save(&self, file_name: &str, bytes: &[u8]) -> io::Result<String>;

    /// Read back a file previously returned by [`save`](Self::save).
    async fn read(&self, path: &str) -> io::Result<Vec<u8>>;
}

/// Files on the local disk, named `<uuid><ext>` under `root`.
#[derive(Clone, Debug)]
pub struct LocalFileStorage {
    root: PathBuf,
}

impl LocalFileStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, relative: &str) -> io::Result<PathBuf> {
        let path = Path::new(relative);
        let escapes = path
            .components()
            .any(|c| !matches!(c, Component::Normal(_)));
        if escapes || relative.is_empty() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("invalid storage path '{relative}'"),
            ));
        }
        Ok(self.root.join(path))
    }
}

/// Lowercased extension with its leading dot, or an empty string.
pub fn extension_of(file_name: &str) -> String {
    Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| format!(".{}", ext.to_lowercase()))
        .unwrap_or_default()
}

#[async_trait]
impl FileStorage for LocalFileStorage {
    async fn save(&self, file_name: &str, bytes: &[u8]) -> io::Result<String> {
        tokio::fs::create_dir_all(&self.root).await?;

        let stored_name = format!("{}{}", Uuid::new_v4(), extension_of(file_name));
        tokio::fs::write(self.root.join(&stored_name), bytes).await?;

        tracing::debug!(path = %stored_name, size = bytes.len(), "Stored file");
        Ok(stored_name)
    }

    async fn read(&self, path: &str) -> io::Result<Vec<u8>> {
        tokio::fs::read(self.resolve(path)?).await
    }
}
