use std::sync::Arc;

use crate::domain::files::errors::FileError;
use crate::domain::files::ports::FileStore;

/// Maximum accepted upload size.
pub const MAX_UPLOAD_BYTES: usize = 2 * 1024 * 1024;

const ALLOWED_EXTENSIONS: [&str; 5] = ["txt", "csv", "jpg", "png", "pdf"];

/// Validates uploads and delegates storage to the injected store.
pub struct FileService {
    store: Arc<dyn FileStore>,
}

impl FileService {
    pub fn new(store: Arc<dyn FileStore>) -> Self {
        Self { store }
    }

    /// Validate and store an uploaded file.
    ///
    /// # Errors
    /// * `InvalidFilename` - Name is empty or contains path separators
    /// * `UnsupportedExtension` - Extension not in the allow-list
    /// * `TooLarge` - Content exceeds `MAX_UPLOAD_BYTES`
    /// * `Storage` - Store operation failed
    pub async fn upload(&self, filename: &str, bytes: &[u8]) -> Result<String, FileError> {
        validate_filename(filename)?;

        let extension = filename.rsplit('.').next().unwrap_or_default();
        if !ALLOWED_EXTENSIONS.contains(&extension) {
            return Err(FileError::UnsupportedExtension);
        }

        if bytes.len() > MAX_UPLOAD_BYTES {
            return Err(FileError::TooLarge {
                limit: MAX_UPLOAD_BYTES,
                actual: bytes.len(),
            });
        }

        self.store.put(filename, bytes).await
    }

    /// Retrieve a stored file.
    ///
    /// # Errors
    /// * `InvalidFilename` - Name is empty or contains path separators
    /// * `NotFound` - No file stored under this name
    /// * `Storage` - Store operation failed
    pub async fn download(&self, filename: &str) -> Result<Vec<u8>, FileError> {
        validate_filename(filename)?;

        self.store
            .get(filename)
            .await?
            .ok_or_else(|| FileError::NotFound(filename.to_string()))
    }

    /// List stored file names.
    pub async fn list(&self) -> Result<Vec<String>, FileError> {
        self.store.list().await
    }
}

// Names are flat: anything that could escape the storage root is rejected
// before it reaches a store.
fn validate_filename(filename: &str) -> Result<(), FileError> {
    if filename.is_empty() {
        return Err(FileError::InvalidFilename("empty filename".to_string()));
    }

    if filename.contains('/') || filename.contains('\\') || filename.contains("..") {
        return Err(FileError::InvalidFilename(filename.to_string()));
    }

    Ok(())
}
