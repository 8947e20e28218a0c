use thiserror::Error;

/// Error for file upload/download operations
#[derive(Debug, Clone, Error)]
pub enum FileError {
    #[error("Unsupported file extension.")]
    UnsupportedExtension,

    #[error("File size too large (up to {limit} bytes).")]
    TooLarge { limit: usize, actual: usize },

    #[error("Invalid filename: {0}")]
    InvalidFilename(String),

    #[error("File not found: {0}")]
    NotFound(String),

    #[error("Storage error: {0}")]
    Storage(String),
}
