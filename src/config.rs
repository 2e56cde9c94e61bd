mod database_config;
mod raw_config;
mod security_config;

use anyhow::Context;
use time::Duration;

pub use self::{
    database_config::DatabaseConfig, raw_config::RawConfig, security_config::SecurityConfig,
};

/// Main server config, resolved from `RawConfig` at startup. Immutable for
/// the process lifetime.
#[derive(Clone, Debug)]
pub struct Config {
    /// Database configuration.
    pub db: DatabaseConfig,
    /// Security configuration (token signing, secret value encryption).
    pub security: SecurityConfig,
}

impl TryFrom<RawConfig> for Config {
    type Error = anyhow::Error;

    /// Resolves the raw configuration, failing fast if any of the required
    /// secrets is missing. Running with an ephemeral or default key would
    /// silently make previously stored data unreadable after a restart.
    fn try_from(raw_config: RawConfig) -> Result<Self, Self::Error> {
        let jwt_secret = raw_config
            .security
            .jwt_secret
            .with_context(|| "Security configuration must specify `jwt_secret`.")?;
        let vault_encryption_key = raw_config.security.vault_encryption_key.with_context(|| {
            "Security configuration must specify `vault_encryption_key` (hex-encoded 32 bytes)."
        })?;

        Ok(Self {
            db: raw_config.db,
            security: SecurityConfig {
                jwt_secret,
                vault_encryption_key,
                token_ttl: Duration::seconds(raw_config.security.token_ttl_secs as i64),
            },
        })
    }
}

impl AsRef<Config> for Config {
    fn as_ref(&self) -> &Config {
        self
    }
}
