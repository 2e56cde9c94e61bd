mod raw_vault_entry;

use self::raw_vault_entry::RawVaultEntry;
use crate::{database::Database, error::Error, users::UserId};
use time::OffsetDateTime;
use uuid::Uuid;

/// A vault entry as it lives in the database, with the secret value still
/// encrypted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredVaultEntry {
    pub id: Uuid,
    pub user_id: UserId,
    pub title: String,
    pub username: Option<String>,
    pub encrypted_password: Vec<u8>,
    pub url: Option<String>,
    pub notes: Option<String>,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

/// Extends the primary database with the vault entries-related methods.
impl Database {
    /// Retrieves all vault entries that belong to the specified user, most
    /// recently modified first.
    pub async fn get_vault_entries(&self, user_id: UserId) -> Result<Vec<StoredVaultEntry>, Error> {
        let raw_entries: Vec<RawVaultEntry> = sqlx::query_as(
            r#"
SELECT id, user_id, title, username, encrypted_password, url, notes, created_at, updated_at
FROM vault_entries
WHERE user_id = ?1
ORDER BY updated_at DESC
            "#,
        )
        .bind(*user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(raw_entries
            .into_iter()
            .map(StoredVaultEntry::try_from)
            .collect::<Result<_, _>>()?)
    }

    /// Inserts a new vault entry for the specified user and returns it as
    /// stored. The secret value must already be encrypted by the caller.
    pub async fn insert_vault_entry(
        &self,
        user_id: UserId,
        title: &str,
        username: Option<&str>,
        encrypted_password: &[u8],
        url: Option<&str>,
        notes: Option<&str>,
    ) -> Result<StoredVaultEntry, Error> {
        let id = Uuid::now_v7();
        // Truncated to whole seconds to match the database precision.
        let now = OffsetDateTime::from_unix_timestamp(OffsetDateTime::now_utc().unix_timestamp())
            .map_err(anyhow::Error::from)?;

        sqlx::query(
            r#"
INSERT INTO vault_entries (id, user_id, title, username, encrypted_password, url, notes, created_at, updated_at)
VALUES ( ?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9 )
            "#,
        )
        .bind(id)
        .bind(*user_id)
        .bind(title)
        .bind(username)
        .bind(encrypted_password)
        .bind(url)
        .bind(notes)
        .bind(now.unix_timestamp())
        .bind(now.unix_timestamp())
        .execute(&self.pool)
        .await?;

        Ok(StoredVaultEntry {
            id,
            user_id,
            title: title.to_string(),
            username: username.map(ToString::to_string),
            encrypted_password: encrypted_password.to_vec(),
            url: url.map(ToString::to_string),
            notes: notes.map(ToString::to_string),
            created_at: now,
            updated_at: now,
        })
    }
}
