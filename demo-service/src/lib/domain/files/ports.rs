use async_trait::async_trait;

use crate::domain::files::errors::FileError;

/// Blob storage for uploaded files. Implementations store flat names under
/// a configured root (a directory on disk, a key prefix in a bucket).
#[async_trait]
pub trait FileStore: Send + Sync + 'static {
    /// Store a blob under `name`, returning its storage location
    /// (a filesystem path or an object key).
    async fn put(&self, name: &str, bytes: &[u8]) -> Result<String, FileError>;

    /// Retrieve a blob by name (`None` if absent).
    async fn get(&self, name: &str) -> Result<Option<Vec<u8>>, FileError>;

    /// List stored blob names.
    async fn list(&self) -> Result<Vec<String>, FileError>;
}
