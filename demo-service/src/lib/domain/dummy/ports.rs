use async_trait::async_trait;

use crate::domain::dummy::errors::DummyError;
use crate::domain::dummy::models::Dummy;
use crate::domain::dummy::models::NewDummy;

/// Persistence operations for the dummy resource.
#[async_trait]
pub trait DummyRepository: Send + Sync + 'static {
    /// Retrieve all dummies ordered by id.
    async fn list(&self) -> Result<Vec<Dummy>, DummyError>;

    /// Retrieve a dummy by id (`None` if absent).
    async fn find_by_id(&self, id: i64) -> Result<Option<Dummy>, DummyError>;

    /// Retrieve a dummy by name (`None` if absent).
    async fn find_by_name(&self, name: &str) -> Result<Option<Dummy>, DummyError>;

    /// Persist a new dummy, assigning its id.
    async fn insert(&self, dummy: NewDummy) -> Result<Dummy, DummyError>;

    /// Overwrite an existing dummy.
    ///
    /// # Errors
    /// * `NotFound` - No dummy with this id
    async fn update(&self, dummy: Dummy) -> Result<Dummy, DummyError>;

    /// Remove a dummy.
    ///
    /// # Errors
    /// * `NotFound` - No dummy with this id
    async fn delete(&self, id: i64) -> Result<(), DummyError>;
}
