use crate::{users::UserId, vault::StoredVaultEntry};
use anyhow::Context;
use time::OffsetDateTime;
use uuid::Uuid;

/// Database representation of a vault entry row. The secret value is stored
/// as an opaque encrypted blob, timestamps as unix seconds.
#[derive(Debug, sqlx::FromRow)]
pub(super) struct RawVaultEntry {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub username: Option<String>,
    pub encrypted_password: Vec<u8>,
    pub url: Option<String>,
    pub notes: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

impl TryFrom<RawVaultEntry> for StoredVaultEntry {
    type Error = anyhow::Error;

    fn try_from(raw_entry: RawVaultEntry) -> Result<Self, Self::Error> {
        Ok(StoredVaultEntry {
            id: raw_entry.id,
            user_id: UserId::from(raw_entry.user_id),
            title: raw_entry.title,
            username: raw_entry.username,
            encrypted_password: raw_entry.encrypted_password,
            url: raw_entry.url,
            notes: raw_entry.notes,
            created_at: OffsetDateTime::from_unix_timestamp(raw_entry.created_at)
                .with_context(|| "Cannot convert vault entry creation timestamp.")?,
            updated_at: OffsetDateTime::from_unix_timestamp(raw_entry.updated_at)
                .with_context(|| "Cannot convert vault entry modification timestamp.")?,
        })
    }
}
