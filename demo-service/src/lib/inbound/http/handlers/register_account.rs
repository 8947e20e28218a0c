use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use thiserror::Error;

use super::ApiError;
use crate::domain::account::errors::EmailError;
use crate::domain::account::errors::UsernameError;
use crate::domain::account::models::AuthenticatedAccount;
use crate::domain::account::models::EmailAddress;
use crate::domain::account::models::RegisterAccountCommand;
use crate::domain::account::models::Username;
use crate::inbound::http::router::AppState;

pub async fn register_account(
    State(state): State<AppState>,
    Json(body): Json<RegisterAccountRequest>,
) -> Result<(StatusCode, Json<AuthenticatedAccount>), ApiError> {
    let account = state
        .account_service
        .register(body.try_into_command()?)
        .await
        .map_err(ApiError::from)?;

    Ok((
        StatusCode::CREATED,
        Json(AuthenticatedAccount::from(&account)),
    ))
}

/// HTTP request body for registering an account (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RegisterAccountRequest {
    username: String,
    email: Option<String>,
    full_name: Option<String>,
    password: String,
}

#[derive(Debug, Clone, Error)]
enum ParseRegisterAccountRequestError {
    #[error("Invalid username: {0}")]
    Username(#[from] UsernameError),

    #[error("Invalid email: {0}")]
    Email(#[from] EmailError),
}

impl RegisterAccountRequest {
    fn try_into_command(
        self,
    ) -> Result<RegisterAccountCommand, ParseRegisterAccountRequestError> {
        let username = Username::new(self.username)?;
        let email = self.email.map(EmailAddress::new).transpose()?;

        Ok(RegisterAccountCommand {
            username,
            email,
            full_name: self.full_name,
            password: self.password,
        })
    }
}

impl From<ParseRegisterAccountRequestError> for ApiError {
    fn from(err: ParseRegisterAccountRequestError) -> Self {
        ApiError::UnprocessableEntity(err.to_string())
    }
}
