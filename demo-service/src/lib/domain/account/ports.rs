use async_trait::async_trait;

use crate::domain::account::errors::AccountError;
use crate::domain::account::models::Account;

/// Persistence operations for the account directory.
///
/// Lookups take the raw username string and match exactly, case-sensitively.
/// Absence is a normal outcome and is reported as `None`, never as an
/// error; `AccountError::Database` is reserved for infrastructure failure.
#[async_trait]
pub trait AccountRepository: Send + Sync + 'static {
    /// Persist a new account.
    ///
    /// # Errors
    /// * `UsernameTaken` - Username is already registered
    /// * `EmailTaken` - Email is already registered
    /// * `Database` - Database operation failed
    async fn insert(&self, account: Account) -> Result<Account, AccountError>;

    /// Retrieve an account by username.
    ///
    /// # Errors
    /// * `Database` - Database operation failed
    async fn find_by_username(&self, username: &str) -> Result<Option<Account>, AccountError>;

    /// Retrieve an account by email address.
    ///
    /// # Errors
    /// * `Database` - Database operation failed
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, AccountError>;

    /// Set the disabled flag of an existing account.
    ///
    /// # Errors
    /// * `NotFound` - Account does not exist
    /// * `Database` - Database operation failed
    async fn set_disabled(&self, username: &str, disabled: bool) -> Result<(), AccountError>;
}
