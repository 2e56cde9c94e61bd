use crate::error::Error;
use anyhow::anyhow;
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier, password_hash::SaltString};
use rand_core::OsRng;

/// Generates a salted Argon2id hash of the given password. The resulting
/// string is opaque to callers and is the only form in which passwords are
/// ever persisted.
pub fn hash_password(password: &str) -> Result<String, Error> {
    if password.is_empty() {
        return Err(Error::validation("Password cannot be empty."));
    }

    Argon2::default()
        .hash_password(password.as_bytes(), &SaltString::generate(&mut OsRng))
        .map(|hash| hash.to_string())
        .map_err(|err| anyhow!("Failed to generate a password hash: {}", err).into())
}

/// Verifies the given password against a stored hash. A malformed or
/// corrupted stored hash is treated as a verification failure, not an error.
pub fn verify_password(password: &str, password_hash: &str) -> bool {
    PasswordHash::new(password_hash)
        .map(|parsed_hash| {
            Argon2::default()
                .verify_password(password.as_bytes(), &parsed_hash)
                .is_ok()
        })
        .unwrap_or(false)
}
