use axum::extract::Request;
use axum::extract::State;
use axum::http::{self};
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;

use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::UNAUTHORIZED_MESSAGE;
use crate::inbound::http::router::AppState;

/// Access Gate middleware for protected routes.
///
/// Extracts the bearer token, resolves it to a verified, active account,
/// and stores the account in request extensions for handlers to take as an
/// explicit `Extension` parameter.
///
/// Rejections are two-tier: anything identity-related (missing header,
/// malformed header, bad/expired token, unknown subject) is the same
/// generic 401 with a Bearer challenge, while a resolved-but-disabled
/// account gets the specific 400 "Inactive user" - the caller already
/// proved possession of a valid token.
pub async fn require_account(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, Response> {
    let token = extract_bearer_token(&req)?;

    let account = state.account_service.authorize(token).await.map_err(|e| {
        tracing::warn!(error = %e, "Request authorization failed");
        ApiError::from(e).into_response()
    })?;

    req.extensions_mut().insert(account);

    Ok(next.run(req).await)
}

// Every failure mode here is deliberately the same response as a bad
// token: the header's absence or shape must not be distinguishable from a
// signature failure.
fn extract_bearer_token(req: &Request) -> Result<&str, Response> {
    let auth_header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .ok_or_else(unauthorized)?;

    let auth_str = auth_header.to_str().map_err(|_| unauthorized())?;

    let token = auth_str.strip_prefix("Bearer ").ok_or_else(unauthorized)?;

    Ok(token)
}

fn unauthorized() -> Response {
    ApiError::Unauthorized(UNAUTHORIZED_MESSAGE.to_string()).into_response()
}
