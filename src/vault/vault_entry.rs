use crate::users::UserId;
use serde::Serialize;
use time::OffsetDateTime;
use uuid::Uuid;

/// A fully decrypted vault entry, as returned to the entry owner. Only ever
/// materialized inside a request for an authenticated user, never persisted
/// in this form.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct VaultEntry {
    /// Unique ID of the entry.
    pub id: Uuid,
    /// ID of the user the entry belongs to.
    #[serde(skip_serializing)]
    pub user_id: UserId,
    /// Human readable label, e.g. the name of the service the secret is for.
    pub title: String,
    /// Username or login associated with the secret, if any.
    pub username: Option<String>,
    /// The decrypted secret value.
    pub password: String,
    /// URL of the service the secret is for, if any.
    pub url: Option<String>,
    /// Free-form notes, if any.
    pub notes: Option<String>,
    /// Timestamp indicating when the entry was created.
    #[serde(with = "time::serde::timestamp")]
    pub created_at: OffsetDateTime,
    /// Timestamp indicating when the entry was last modified.
    #[serde(with = "time::serde::timestamp")]
    pub updated_at: OffsetDateTime,
}
