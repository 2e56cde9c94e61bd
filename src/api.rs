use crate::{config::Config, database::Database, vault::VaultEncryption};

/// Collection of the application APIs and the process-wide immutable state
/// they share: resolved configuration, database pool, and the vault cipher.
#[derive(Clone)]
pub struct Api {
    pub config: Config,
    pub db: Database,
    pub(crate) encryption: VaultEncryption,
}

impl Api {
    /// Instantiates APIs collection with the specified config, database and cipher.
    pub fn new(config: Config, db: Database, encryption: VaultEncryption) -> Self {
        Self {
            config,
            db,
            encryption,
        }
    }
}

impl AsRef<Api> for Api {
    fn as_ref(&self) -> &Self {
        self
    }
}
