mod claims;

use crate::users::UserId;
use anyhow::Context;
use jsonwebtoken::{
    DecodingKey, EncodingKey, Header, Validation, decode, encode, errors::ErrorKind,
};
use time::{Duration, OffsetDateTime};

pub use self::claims::Claims;

/// Describes why a session token failed verification. `Expired` is kept
/// distinct so that callers can prompt for re-login instead of rejecting
/// the request outright.
#[derive(thiserror::Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum TokenVerificationError {
    #[error("Token expired.")]
    Expired,
    #[error("Invalid token.")]
    Invalid,
    #[error("Malformed token.")]
    Malformed,
}

/// Issues a signed (HS256), self-contained session token with an absolute
/// expiry `ttl` from now.
pub fn issue(
    secret: &str,
    user_id: UserId,
    username: &str,
    ttl: Duration,
) -> anyhow::Result<String> {
    let claims = Claims {
        sub: user_id,
        username: username.to_string(),
        exp: OffsetDateTime::now_utc() + ttl,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .with_context(|| "Failed to issue a session token.")
}

/// Verifies the token signature and expiry, and extracts the embedded claims.
pub fn verify(secret: &str, token: &str) -> Result<Claims, TokenVerificationError> {
    // No expiry leeway: a token is either valid now or it is not.
    let mut validation = Validation::default();
    validation.leeway = 0;

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map(|token_data| token_data.claims)
    .map_err(|err| match err.kind() {
        ErrorKind::ExpiredSignature => TokenVerificationError::Expired,
        ErrorKind::InvalidToken
        | ErrorKind::Base64(_)
        | ErrorKind::Json(_)
        | ErrorKind::Utf8(_) => TokenVerificationError::Malformed,
        _ => TokenVerificationError::Invalid,
    })
}
