use crate::users::UserId;
use serde::{Deserialize, Serialize};
use serde_with::{TimestampSeconds, serde_as};
use time::OffsetDateTime;

/// Identity claims embedded into a session token. Never persisted, always
/// reconstructed from a verified token.
#[serde_as]
#[derive(Debug, Serialize, Deserialize, Eq, PartialEq)]
pub struct Claims {
    /// ID of the user the token was issued for.
    pub sub: UserId,
    /// Username of the user the token was issued for.
    pub username: String,
    /// Token expiration time (UTC timestamp).
    #[serde_as(as = "TimestampSeconds<i64>")]
    pub exp: OffsetDateTime,
}
