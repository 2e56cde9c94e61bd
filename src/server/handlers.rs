mod security_login;
mod status_get;
mod vault_entries_create;
mod vault_entries_list;

pub use self::{
    security_login::security_login, status_get::status_get,
    vault_entries_create::vault_entries_create, vault_entries_list::vault_entries_list,
};
