use serde_derive::{Deserialize, Serialize};

/// Default session token lifetime (24 hours), in seconds.
const DEFAULT_TOKEN_TTL_SECS: u64 = 86400;

/// Raw security configuration as read from the file or environment. Secrets
/// are optional here so that the application can report their absence with a
/// dedicated error at startup instead of a deserialization failure.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct RawSecurityConfig {
    /// Secret key used to sign session tokens (JWT, HS256).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jwt_secret: Option<String>,
    /// Hex-encoded 32-byte key used to encrypt vault entry secret values.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vault_encryption_key: Option<String>,
    /// Lifetime of issued session tokens, in seconds.
    #[serde(default = "default_token_ttl_secs")]
    pub token_ttl_secs: u64,
}

fn default_token_ttl_secs() -> u64 {
    DEFAULT_TOKEN_TTL_SECS
}

impl Default for RawSecurityConfig {
    fn default() -> Self {
        Self {
            jwt_secret: None,
            vault_encryption_key: None,
            token_ttl_secs: DEFAULT_TOKEN_TTL_SECS,
        }
    }
}

/// Resolved security configuration with all required secrets present.
#[derive(Debug, Clone)]
pub struct SecurityConfig {
    /// Secret key used to sign session tokens.
    pub jwt_secret: String,
    /// Hex-encoded 32-byte key used to encrypt vault entry secret values.
    pub vault_encryption_key: String,
    /// Lifetime of issued session tokens.
    pub token_ttl: time::Duration,
}
