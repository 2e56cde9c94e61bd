use crate::users::{User, UserId};
use anyhow::Context;
use time::OffsetDateTime;
use uuid::Uuid;

/// Database representation of a user row. Timestamps are stored as unix
/// seconds so that range queries and ordering are plain integer operations.
#[derive(Debug, sqlx::FromRow)]
pub(super) struct RawUser {
    pub id: Uuid,
    pub username: String,
    pub password_hash: String,
    pub email: Option<String>,
    pub created_at: i64,
}

impl TryFrom<RawUser> for User {
    type Error = anyhow::Error;

    fn try_from(raw_user: RawUser) -> Result<Self, Self::Error> {
        Ok(User {
            id: UserId::from(raw_user.id),
            username: raw_user.username,
            password_hash: raw_user.password_hash,
            email: raw_user.email,
            created_at: OffsetDateTime::from_unix_timestamp(raw_user.created_at)
                .with_context(|| "Cannot convert user creation timestamp.")?,
        })
    }
}

impl From<&User> for RawUser {
    fn from(user: &User) -> Self {
        Self {
            id: *user.id,
            username: user.username.clone(),
            password_hash: user.password_hash.clone(),
            email: user.email.clone(),
            created_at: user.created_at.unix_timestamp(),
        }
    }
}
