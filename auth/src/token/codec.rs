use chrono::Duration;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::Claims;
use super::errors::TokenError;

/// Default token lifetime when the caller does not request one.
const DEFAULT_TTL_MINUTES: i64 = 15;

/// Mints and parses signed, time-bounded bearer tokens.
///
/// Uses HS256 (HMAC with SHA-256). The signing secret is supplied by the
/// caller, loaded once from configuration at process start; there is no
/// compiled-in default.
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
}

impl TokenCodec {
    /// Create a new codec with a secret key.
    ///
    /// # Arguments
    /// * `secret` - Secret key for signing tokens; at least 32 bytes for HS256
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm: Algorithm::HS256,
        }
    }

    /// Mint a token vouching for `subject`.
    ///
    /// The expiry is absolute: current UTC time plus `ttl`, defaulting to
    /// 15 minutes when `ttl` is `None`.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token encoding failed
    pub fn mint(&self, subject: &str, ttl: Option<Duration>) -> Result<String, TokenError> {
        let ttl = ttl.unwrap_or_else(|| Duration::minutes(DEFAULT_TTL_MINUTES));
        let claims = Claims::new(subject, ttl);
        let header = Header::new(self.algorithm);

        encode(&header, &claims, &self.encoding_key)
            .map_err(|e| TokenError::EncodingFailed(e.to_string()))
    }

    /// Decode and validate a token, returning its claims.
    ///
    /// Verifies the signature and the expiry with zero leeway: a token is
    /// valid strictly before its `exp` timestamp. A missing subject claim
    /// fails the same way as a malformed token.
    ///
    /// # Errors
    /// * `Expired` - Expiry is in the past
    /// * `Invalid` - Signature mismatch, malformed structure, or missing claim
    pub fn parse(&self, token: &str) -> Result<Claims, TokenError> {
        let mut validation = Validation::new(self.algorithm);
        validation.leeway = 0;

        let token_data =
            decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
                match e.kind() {
                    ErrorKind::ExpiredSignature => TokenError::Expired,
                    _ => TokenError::Invalid(e.to_string()),
                }
            })?;

        Ok(token_data.claims)
    }
}
