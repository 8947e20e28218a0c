use std::io::ErrorKind;
use std::path::PathBuf;

use async_trait::async_trait;

use crate::domain::files::errors::FileError;
use crate::domain::files::ports::FileStore;

/// File store backed by a local directory. The service layer guarantees
/// names are flat, so joining onto the root cannot escape it.
pub struct DiskFileStore {
    root: PathBuf,
}

impl DiskFileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

#[async_trait]
impl FileStore for DiskFileStore {
    async fn put(&self, name: &str, bytes: &[u8]) -> Result<String, FileError> {
        tokio::fs::create_dir_all(&self.root)
            .await
            .map_err(|e| FileError::Storage(e.to_string()))?;

        let path = self.root.join(name);
        tokio::fs::write(&path, bytes)
            .await
            .map_err(|e| FileError::Storage(e.to_string()))?;

        tracing::debug!(path = %path.display(), bytes = bytes.len(), "File written");

        Ok(path.display().to_string())
    }

    async fn get(&self, name: &str) -> Result<Option<Vec<u8>>, FileError> {
        let path = self.root.join(name);

        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(FileError::Storage(e.to_string())),
        }
    }

    async fn list(&self) -> Result<Vec<String>, FileError> {
        let mut entries = match tokio::fs::read_dir(&self.root).await {
            Ok(entries) => entries,
            // A store that was never written to lists as empty
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(FileError::Storage(e.to_string())),
        };

        let mut names = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| FileError::Storage(e.to_string()))?
        {
            if let Ok(name) = entry.file_name().into_string() {
                names.push(name);
            }
        }

        names.sort();
        Ok(names)
    }
}
