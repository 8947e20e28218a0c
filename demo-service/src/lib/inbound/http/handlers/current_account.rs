use axum::Extension;
use axum::Json;

use crate::domain::account::models::AuthenticatedAccount;

/// Identity probe. The Access Gate middleware has already validated the
/// token and resolved the account; it arrives here as a request extension.
pub async fn current_account(
    Extension(account): Extension<AuthenticatedAccount>,
) -> Json<AuthenticatedAccount> {
    Json(account)
}
