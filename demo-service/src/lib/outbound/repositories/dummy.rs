use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use sqlx::Row;

use crate::domain::dummy::errors::DummyError;
use crate::domain::dummy::models::Dummy;
use crate::domain::dummy::models::NewDummy;
use crate::domain::dummy::ports::DummyRepository;

pub struct PostgresDummyRepository {
    pool: PgPool,
}

impl PostgresDummyRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn dummy_from_row(row: &PgRow) -> Result<Dummy, DummyError> {
    Ok(Dummy {
        id: row
            .try_get("id")
            .map_err(|e| DummyError::Database(e.to_string()))?,
        name: row
            .try_get("name")
            .map_err(|e| DummyError::Database(e.to_string()))?,
        description: row
            .try_get("description")
            .map_err(|e| DummyError::Database(e.to_string()))?,
        optional_field: row
            .try_get("optional_field")
            .map_err(|e| DummyError::Database(e.to_string()))?,
    })
}

#[async_trait]
impl DummyRepository for PostgresDummyRepository {
    async fn list(&self) -> Result<Vec<Dummy>, DummyError> {
        let rows = sqlx::query(
            r#"
            SELECT id, name, description, optional_field
            FROM dummies
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DummyError::Database(e.to_string()))?;

        rows.iter().map(dummy_from_row).collect()
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Dummy>, DummyError> {
        let row = sqlx::query(
            r#"
            SELECT id, name, description, optional_field
            FROM dummies
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DummyError::Database(e.to_string()))?;

        row.as_ref().map(dummy_from_row).transpose()
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Dummy>, DummyError> {
        let row = sqlx::query(
            r#"
            SELECT id, name, description, optional_field
            FROM dummies
            WHERE name = $1
            "#,
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DummyError::Database(e.to_string()))?;

        row.as_ref().map(dummy_from_row).transpose()
    }

    async fn insert(&self, dummy: NewDummy) -> Result<Dummy, DummyError> {
        let row = sqlx::query(
            r#"
            INSERT INTO dummies (name, description, optional_field)
            VALUES ($1, $2, $3)
            RETURNING id
            "#,
        )
        .bind(&dummy.name)
        .bind(&dummy.description)
        .bind(dummy.optional_field.as_deref())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation()
                    && db_err.constraint() == Some("dummies_name_key")
                {
                    return DummyError::NameTaken(dummy.name.clone());
                }
            }
            DummyError::Database(e.to_string())
        })?;

        let id: i64 = row
            .try_get("id")
            .map_err(|e| DummyError::Database(e.to_string()))?;

        Ok(Dummy {
            id,
            name: dummy.name,
            description: dummy.description,
            optional_field: dummy.optional_field,
        })
    }

    async fn update(&self, dummy: Dummy) -> Result<Dummy, DummyError> {
        let result = sqlx::query(
            r#"
            UPDATE dummies
            SET name = $2, description = $3, optional_field = $4
            WHERE id = $1
            "#,
        )
        .bind(dummy.id)
        .bind(&dummy.name)
        .bind(&dummy.description)
        .bind(dummy.optional_field.as_deref())
        .execute(&self.pool)
        .await
        .map_err(|e| DummyError::Database(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(DummyError::NotFound(dummy.id));
        }

        Ok(dummy)
    }

    async fn delete(&self, id: i64) -> Result<(), DummyError> {
        let result = sqlx::query(
            r#"
            DELETE FROM dummies
            WHERE id = $1
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| DummyError::Database(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(DummyError::NotFound(id));
        }

        Ok(())
    }
}
