use thiserror::Error;

/// Error for dummy resource operations
#[derive(Debug, Clone, Error)]
pub enum DummyError {
    #[error("Dummy not found: {0}")]
    NotFound(i64),

    #[error("Record including name '{0}' already exists")]
    NameTaken(String),

    #[error("Database error: {0}")]
    Database(String),
}
