use thiserror::Error;

/// Error for Username validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UsernameError {
    #[error("Username too short: minimum {min} characters, got {actual}")]
    TooShort { min: usize, actual: usize },

    #[error("Username too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },

    #[error(
        "Username contains invalid characters (only alphanumeric, underscore, and hyphen allowed)"
    )]
    InvalidCharacters,
}

/// Error for EmailAddress validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EmailError {
    #[error("Invalid email format: {0}")]
    InvalidFormat(String),
}

/// Top-level error for all account and authentication operations
#[derive(Debug, Clone, Error)]
pub enum AccountError {
    // Value object validation errors (automatically converted via #[from])
    #[error("Invalid username: {0}")]
    InvalidUsername(#[from] UsernameError),

    #[error("Invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    #[error("Password error: {0}")]
    Password(#[from] auth::PasswordError),

    // Login rejection. Unknown username and wrong password both collapse
    // into this variant so the two are indistinguishable to callers.
    #[error("Invalid credentials")]
    InvalidCredentials,

    // Access Gate rejections. `InvalidToken` covers expired, tampered, and
    // malformed tokens as well as tokens whose subject resolves to no
    // account; the payload is for logs only and never reaches the wire.
    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Inactive account")]
    Inactive,

    // Disable-account rejection: identity was already proven by the gate,
    // but the re-submitted password does not match.
    #[error("Password mismatch")]
    PasswordMismatch,

    #[error("Account not found: {0}")]
    NotFound(String),

    #[error("Username already exists: {0}")]
    UsernameTaken(String),

    #[error("Email already exists: {0}")]
    EmailTaken(String),

    // Infrastructure errors
    #[error("Token error: {0}")]
    Token(String),

    #[error("Database error: {0}")]
    Database(String),
}
