mod api_ext;
mod database_ext;
mod encryption;
mod vault_entry;

pub use self::{
    api_ext::CreateVaultEntryParams, database_ext::StoredVaultEntry, encryption::VaultEncryption,
    vault_entry::VaultEntry,
};
