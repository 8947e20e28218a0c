use axum::extract::State;
use axum::Extension;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use crate::domain::account::models::AuthenticatedAccount;
use crate::inbound::http::router::AppState;

/// Disable the calling account. Possession of a valid token is not enough:
/// the current password must be re-proven, and a mismatch leaves the
/// account untouched.
pub async fn disable_account(
    State(state): State<AppState>,
    Extension(account): Extension<AuthenticatedAccount>,
    Json(body): Json<DisableAccountRequest>,
) -> Result<Json<AuthenticatedAccount>, ApiError> {
    state
        .account_service
        .disable(&account.username, &body.password)
        .await
        .map(Json)
        .map_err(ApiError::from)
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DisableAccountRequest {
    password: String,
}
