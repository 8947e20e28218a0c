use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use sqlx::Row;

use crate::domain::account::errors::AccountError;
use crate::domain::account::models::Account;
use crate::domain::account::models::EmailAddress;
use crate::domain::account::models::Username;
use crate::domain::account::ports::AccountRepository;

pub struct PostgresAccountRepository {
    pool: PgPool,
}

impl PostgresAccountRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn account_from_row(row: &PgRow) -> Result<Account, AccountError> {
    let username: String = row
        .try_get("username")
        .map_err(|e| AccountError::Database(e.to_string()))?;
    let email: Option<String> = row
        .try_get("email")
        .map_err(|e| AccountError::Database(e.to_string()))?;
    let full_name: Option<String> = row
        .try_get("full_name")
        .map_err(|e| AccountError::Database(e.to_string()))?;
    let password_hash: String = row
        .try_get("password_hash")
        .map_err(|e| AccountError::Database(e.to_string()))?;
    let disabled: bool = row
        .try_get("disabled")
        .map_err(|e| AccountError::Database(e.to_string()))?;

    Ok(Account {
        username: Username::new(username)?,
        email: email.map(EmailAddress::new).transpose()?,
        full_name,
        password_hash,
        disabled,
    })
}

#[async_trait]
impl AccountRepository for PostgresAccountRepository {
    async fn insert(&self, account: Account) -> Result<Account, AccountError> {
        sqlx::query(
            r#"
            INSERT INTO accounts (username, email, full_name, password_hash, disabled)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(account.username.as_str())
        .bind(account.email.as_ref().map(|e| e.as_str()))
        .bind(account.full_name.as_deref())
        .bind(&account.password_hash)
        .bind(account.disabled)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    if db_err.constraint() == Some("accounts_pkey") {
                        return AccountError::UsernameTaken(
                            account.username.as_str().to_string(),
                        );
                    }
                    if db_err.constraint() == Some("accounts_email_key") {
                        let email = account
                            .email
                            .as_ref()
                            .map(|e| e.as_str().to_string())
                            .unwrap_or_default();
                        return AccountError::EmailTaken(email);
                    }
                }
            }
            AccountError::Database(e.to_string())
        })?;

        Ok(account)
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<Account>, AccountError> {
        let row = sqlx::query(
            r#"
            SELECT username, email, full_name, password_hash, disabled
            FROM accounts
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AccountError::Database(e.to_string()))?;

        row.as_ref().map(account_from_row).transpose()
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, AccountError> {
        let row = sqlx::query(
            r#"
            SELECT username, email, full_name, password_hash, disabled
            FROM accounts
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AccountError::Database(e.to_string()))?;

        row.as_ref().map(account_from_row).transpose()
    }

    async fn set_disabled(&self, username: &str, disabled: bool) -> Result<(), AccountError> {
        let result = sqlx::query(
            r#"
            UPDATE accounts
            SET disabled = $2
            WHERE username = $1
            "#,
        )
        .bind(username)
        .bind(disabled)
        .execute(&self.pool)
        .await
        .map_err(|e| AccountError::Database(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(AccountError::NotFound(username.to_string()));
        }

        Ok(())
    }
}
