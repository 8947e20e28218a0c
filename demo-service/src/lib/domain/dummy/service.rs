use std::sync::Arc;

use crate::domain::dummy::errors::DummyError;
use crate::domain::dummy::models::Dummy;
use crate::domain::dummy::models::DummyPatch;
use crate::domain::dummy::models::NewDummy;
use crate::domain::dummy::ports::DummyRepository;

/// Domain service for the dummy resource.
pub struct DummyService {
    repository: Arc<dyn DummyRepository>,
}

impl DummyService {
    pub fn new(repository: Arc<dyn DummyRepository>) -> Self {
        Self { repository }
    }

    /// List all dummies. An empty table is an empty list, not an error.
    pub async fn list(&self) -> Result<Vec<Dummy>, DummyError> {
        self.repository.list().await
    }

    /// Retrieve one dummy.
    ///
    /// # Errors
    /// * `NotFound` - No dummy with this id
    pub async fn get(&self, id: i64) -> Result<Dummy, DummyError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(DummyError::NotFound(id))
    }

    /// Create a new dummy.
    ///
    /// # Errors
    /// * `NameTaken` - A dummy with this name already exists
    pub async fn create(&self, dummy: NewDummy) -> Result<Dummy, DummyError> {
        if let Some(existing) = self.repository.find_by_name(&dummy.name).await? {
            return Err(DummyError::NameTaken(existing.name));
        }

        self.repository.insert(dummy).await
    }

    /// Replace every field of an existing dummy.
    ///
    /// # Errors
    /// * `NotFound` - No dummy with this id
    pub async fn replace(&self, id: i64, fields: NewDummy) -> Result<Dummy, DummyError> {
        let existing = self.get(id).await?;

        self.repository
            .update(Dummy {
                id: existing.id,
                name: fields.name,
                description: fields.description,
                optional_field: fields.optional_field,
            })
            .await
    }

    /// Apply a partial update to an existing dummy.
    ///
    /// # Errors
    /// * `NotFound` - No dummy with this id
    pub async fn update(&self, id: i64, patch: DummyPatch) -> Result<Dummy, DummyError> {
        let mut dummy = self.get(id).await?;

        if let Some(name) = patch.name {
            dummy.name = name;
        }
        if let Some(description) = patch.description {
            dummy.description = description;
        }
        if let Some(optional_field) = patch.optional_field {
            dummy.optional_field = Some(optional_field);
        }

        self.repository.update(dummy).await
    }

    /// Delete an existing dummy.
    ///
    /// # Errors
    /// * `NotFound` - No dummy with this id
    pub async fn delete(&self, id: i64) -> Result<(), DummyError> {
        self.get(id).await?;
        self.repository.delete(id).await
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use mockall::mock;

    use super::*;

    mock! {
        pub TestDummyRepository {}

        #[async_trait]
        impl DummyRepository for TestDummyRepository {
            async fn list(&self) -> Result<Vec<Dummy>, DummyError>;
            async fn find_by_id(&self, id: i64) -> Result<Option<Dummy>, DummyError>;
            async fn find_by_name(&self, name: &str) -> Result<Option<Dummy>, DummyError>;
            async fn insert(&self, dummy: NewDummy) -> Result<Dummy, DummyError>;
            async fn update(&self, dummy: Dummy) -> Result<Dummy, DummyError>;
            async fn delete(&self, id: i64) -> Result<(), DummyError>;
        }
    }

    fn sample(id: i64) -> Dummy {
        Dummy {
            id,
            name: format!("dummy{}", id),
            description: "a dummy".to_string(),
            optional_field: None,
        }
    }

    #[tokio::test]
    async fn test_create_duplicate_name() {
        let mut repository = MockTestDummyRepository::new();
        repository
            .expect_find_by_name()
            .withf(|name| name == "dummy1")
            .times(1)
            .returning(|_| Ok(Some(sample(1))));
        repository.expect_insert().times(0);

        let service = DummyService::new(Arc::new(repository));

        let result = service
            .create(NewDummy {
                name: "dummy1".to_string(),
                description: "duplicate".to_string(),
                optional_field: None,
            })
            .await;

        assert!(matches!(result, Err(DummyError::NameTaken(_))));
    }

    #[tokio::test]
    async fn test_get_not_found() {
        let mut repository = MockTestDummyRepository::new();
        repository
            .expect_find_by_id()
            .times(1)
            .returning(|_| Ok(None));

        let service = DummyService::new(Arc::new(repository));

        let result = service.get(42).await;
        assert!(matches!(result, Err(DummyError::NotFound(42))));
    }

    #[tokio::test]
    async fn test_update_applies_only_set_fields() {
        let mut repository = MockTestDummyRepository::new();
        repository
            .expect_find_by_id()
            .times(1)
            .returning(|_| Ok(Some(sample(1))));
        repository
            .expect_update()
            .withf(|dummy| dummy.name == "renamed" && dummy.description == "a dummy")
            .times(1)
            .returning(|dummy| Ok(dummy));

        let service = DummyService::new(Arc::new(repository));

        let patch = DummyPatch {
            name: Some("renamed".to_string()),
            ..DummyPatch::default()
        };

        let dummy = service.update(1, patch).await.unwrap();
        assert_eq!(dummy.name, "renamed");
        assert_eq!(dummy.description, "a dummy");
    }

    #[tokio::test]
    async fn test_delete_not_found() {
        let mut repository = MockTestDummyRepository::new();
        repository
            .expect_find_by_id()
            .times(1)
            .returning(|_| Ok(None));
        repository.expect_delete().times(0);

        let service = DummyService::new(Arc::new(repository));

        let result = service.delete(42).await;
        assert!(matches!(result, Err(DummyError::NotFound(42))));
    }
}
