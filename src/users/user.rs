use crate::users::UserId;
use serde::Serialize;
use time::OffsetDateTime;

/// Represents an application user. The password hash is an opaque blob
/// produced by the password hashing service and is never serialized.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct User {
    /// Unique user identifier.
    pub id: UserId,
    /// Unique username used for login.
    pub username: String,
    /// Salted one-way hash of the user password.
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Optional user email.
    pub email: Option<String>,
    /// When the user was created.
    #[serde(with = "time::serde::timestamp")]
    pub created_at: OffsetDateTime,
}

impl AsRef<User> for User {
    fn as_ref(&self) -> &User {
        self
    }
}
