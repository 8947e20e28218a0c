use thiserror::Error;

/// Error type for token operations.
///
/// Callers gating requests treat `Expired` and `Invalid` identically; the
/// split exists for logging and tests, not for the wire.
#[derive(Debug, Clone, Error)]
pub enum TokenError {
    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),

    #[error("Token is expired")]
    Expired,

    #[error("Token is invalid: {0}")]
    Invalid(String),
}
