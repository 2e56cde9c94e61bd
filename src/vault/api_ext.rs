use crate::{
    api::Api,
    error::Error,
    users::User,
    vault::{StoredVaultEntry, VaultEntry},
};
use anyhow::anyhow;
use serde::Deserialize;
use tracing::info;

/// The maximum length of a vault entry title.
const MAX_TITLE_LENGTH: usize = 255;
/// The maximum length of a vault entry URL.
const MAX_URL_LENGTH: usize = 500;
/// The maximum size of a vault entry secret value, in bytes.
const MAX_PASSWORD_SIZE: usize = 10 * 1024;

/// Parameters for creating a new vault entry.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateVaultEntryParams {
    pub title: String,
    pub username: Option<String>,
    pub password: String,
    pub url: Option<String>,
    pub notes: Option<String>,
}

/// Vault controller for a specific user: stores secrets encrypted, returns
/// them decrypted, and never lets one user's entries leak into another's view.
pub struct VaultApiExt<'a, 'u> {
    api: &'a Api,
    user: &'u User,
}

impl<'a, 'u> VaultApiExt<'a, 'u> {
    /// Instantiates vault API extension scoped to the given user.
    pub fn new(api: &'a Api, user: &'u User) -> Self {
        Self { api, user }
    }

    /// Retrieves and decrypts all vault entries of the user, most recently
    /// modified first. A single entry that fails to decrypt fails the whole
    /// call: a partial listing would mask data corruption or a key mismatch.
    pub async fn list_entries(&self) -> Result<Vec<VaultEntry>, Error> {
        let stored_entries = self.api.db.get_vault_entries(self.user.id).await?;
        stored_entries
            .into_iter()
            .map(|entry| self.decrypt_entry(entry))
            .collect()
    }

    /// Validates, encrypts and stores a new vault entry, returning it in
    /// decrypted form. Nothing is written if validation fails.
    pub async fn create_entry(&self, params: CreateVaultEntryParams) -> Result<VaultEntry, Error> {
        if params.title.is_empty() {
            return Err(Error::validation("Vault entry title cannot be empty."));
        }
        if params.title.len() > MAX_TITLE_LENGTH {
            return Err(Error::validation(format!(
                "Vault entry title cannot be longer than {MAX_TITLE_LENGTH} characters."
            )));
        }
        if params.password.is_empty() {
            return Err(Error::validation("Vault entry password cannot be empty."));
        }
        if params.password.len() > MAX_PASSWORD_SIZE {
            return Err(Error::validation(format!(
                "Vault entry password cannot be larger than {MAX_PASSWORD_SIZE} bytes."
            )));
        }
        if let Some(ref url) = params.url
            && url.len() > MAX_URL_LENGTH
        {
            return Err(Error::validation(format!(
                "Vault entry URL cannot be longer than {MAX_URL_LENGTH} characters."
            )));
        }

        let encrypted_password = self.api.encryption.encrypt(params.password.as_bytes())?;
        let stored_entry = self
            .api
            .db
            .insert_vault_entry(
                self.user.id,
                &params.title,
                params.username.as_deref(),
                &encrypted_password,
                params.url.as_deref(),
                params.notes.as_deref(),
            )
            .await?;

        info!(
            user.id = %self.user.id,
            vault.entry_id = %stored_entry.id,
            "Created a new vault entry."
        );

        Ok(VaultEntry {
            id: stored_entry.id,
            user_id: stored_entry.user_id,
            title: stored_entry.title,
            username: stored_entry.username,
            password: params.password,
            url: stored_entry.url,
            notes: stored_entry.notes,
            created_at: stored_entry.created_at,
            updated_at: stored_entry.updated_at,
        })
    }

    fn decrypt_entry(&self, entry: StoredVaultEntry) -> Result<VaultEntry, Error> {
        let password_bytes = self.api.encryption.decrypt(&entry.encrypted_password)?;
        let password = String::from_utf8(password_bytes).map_err(|_| {
            Error::decryption(anyhow!(
                "Decrypted vault entry value is not valid UTF-8 (entry ID: {}).",
                entry.id
            ))
        })?;

        Ok(VaultEntry {
            id: entry.id,
            user_id: entry.user_id,
            title: entry.title,
            username: entry.username,
            password,
            url: entry.url,
            notes: entry.notes,
            created_at: entry.created_at,
            updated_at: entry.updated_at,
        })
    }
}

impl Api {
    /// Returns an API to work with the vault of the specified user.
    pub fn vault<'a, 'u>(&'a self, user: &'u User) -> VaultApiExt<'a, 'u> {
        VaultApiExt::new(self, user)
    }
}
