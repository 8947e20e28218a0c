use std::sync::Arc;

use auth::Authenticator;
use chrono::Duration;

use crate::domain::account::errors::AccountError;
use crate::domain::account::models::Account;
use crate::domain::account::models::AuthenticatedAccount;
use crate::domain::account::models::RegisterAccountCommand;
use crate::domain::account::ports::AccountRepository;

/// Domain service for account registration, login, and request authorization.
///
/// Stateless across requests: every operation is a pure function over its
/// inputs plus a read through the injected repository, so concurrent
/// invocations need no coordination.
pub struct AccountService {
    repository: Arc<dyn AccountRepository>,
    authenticator: Arc<Authenticator>,
    access_token_ttl: Duration,
}

impl AccountService {
    /// Create a new account service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - Account persistence implementation
    /// * `authenticator` - Password hashing and token handling
    /// * `access_token_ttl` - Lifetime of tokens issued at login
    pub fn new(
        repository: Arc<dyn AccountRepository>,
        authenticator: Arc<Authenticator>,
        access_token_ttl: Duration,
    ) -> Self {
        Self {
            repository,
            authenticator,
            access_token_ttl,
        }
    }

    /// Register a new account.
    ///
    /// The plaintext password is hashed before anything is persisted; it is
    /// dropped with the command on return.
    ///
    /// # Errors
    /// * `Password` - Empty password or hashing failure
    /// * `UsernameTaken` / `EmailTaken` - Duplicate registration
    /// * `Database` - Database operation failed
    pub async fn register(
        &self,
        command: RegisterAccountCommand,
    ) -> Result<Account, AccountError> {
        if let Some(ref email) = command.email {
            if self
                .repository
                .find_by_email(email.as_str())
                .await?
                .is_some()
            {
                return Err(AccountError::EmailTaken(email.as_str().to_string()));
            }
        }

        let password_hash = self.authenticator.hash_password(&command.password)?;

        let account = Account {
            username: command.username,
            email: command.email,
            full_name: command.full_name,
            password_hash,
            disabled: false,
        };

        self.repository.insert(account).await
    }

    /// Turn credentials into an account, or a rejection.
    ///
    /// Does NOT consult `disabled`: a disabled account can still
    /// authenticate and obtain a token, and is rejected at `authorize`
    /// instead. This keeps wrong-password failures and disabled-account
    /// failures distinguishable to the caller.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown username or wrong password; the two
    ///   are deliberately indistinguishable
    /// * `Database` - Database operation failed
    pub async fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Account, AccountError> {
        let account = self
            .repository
            .find_by_username(username)
            .await?
            .ok_or(AccountError::InvalidCredentials)?;

        let is_valid = self
            .authenticator
            .verify_password(password, &account.password_hash)?;

        if !is_valid {
            return Err(AccountError::InvalidCredentials);
        }

        Ok(account)
    }

    /// Turn a login request into a bearer token.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Authentication failed
    /// * `Token` - Token minting failed
    /// * `Database` - Database operation failed
    pub async fn login(&self, username: &str, password: &str) -> Result<String, AccountError> {
        let account = self.authenticate(username, password).await?;

        self.authenticator
            .mint_token(account.username.as_str(), Some(self.access_token_ttl))
            .map_err(|e| AccountError::Token(e.to_string()))
    }

    /// Turn an inbound bearer token into a verified, active account.
    ///
    /// Terminal states:
    /// 1. token parses, subject resolves, account active -> the account
    /// 2. parse failure or unresolved subject -> `InvalidToken`
    /// 3. resolved but disabled -> `Inactive`
    ///
    /// # Errors
    /// * `InvalidToken` - Expired, tampered, or malformed token, or a
    ///   subject no account matches
    /// * `Inactive` - Account exists but is disabled
    /// * `Database` - Database operation failed
    pub async fn authorize(&self, token: &str) -> Result<AuthenticatedAccount, AccountError> {
        let claims = self
            .authenticator
            .validate_token(token)
            .map_err(|e| AccountError::InvalidToken(e.to_string()))?;

        let account = self
            .repository
            .find_by_username(&claims.sub)
            .await?
            .ok_or_else(|| AccountError::InvalidToken("unknown subject".to_string()))?;

        if account.disabled {
            return Err(AccountError::Inactive);
        }

        Ok(AuthenticatedAccount::from(&account))
    }

    /// Disable an account after re-proving its current password.
    ///
    /// # Errors
    /// * `NotFound` - Account does not exist
    /// * `PasswordMismatch` - Re-submitted password is wrong; the account
    ///   is left untouched
    /// * `Database` - Database operation failed
    pub async fn disable(
        &self,
        username: &str,
        password: &str,
    ) -> Result<AuthenticatedAccount, AccountError> {
        let account = self
            .repository
            .find_by_username(username)
            .await?
            .ok_or_else(|| AccountError::NotFound(username.to_string()))?;

        let is_valid = self
            .authenticator
            .verify_password(password, &account.password_hash)?;

        if !is_valid {
            return Err(AccountError::PasswordMismatch);
        }

        self.repository.set_disabled(username, true).await?;

        Ok(AuthenticatedAccount {
            disabled: true,
            ..AuthenticatedAccount::from(&account)
        })
    }
}
