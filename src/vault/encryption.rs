use crate::error::Error;
use anyhow::{Context, anyhow, bail};
use openssl::symm::{Cipher, Crypter, Mode};

/// AES-256-GCM nonce size in bytes.
const NONCE_SIZE: usize = 12;
/// AES-256-GCM authentication tag size in bytes.
const TAG_SIZE: usize = 16;

/// Handles encryption/decryption of stored vault secrets using AES-256-GCM.
/// Constructed once at startup so that a bad key fails the process instead of
/// the first request.
#[derive(Clone)]
pub struct VaultEncryption {
    key: Vec<u8>,
}

impl VaultEncryption {
    /// Creates a new instance from a hex-encoded 32-byte key.
    pub fn new(hex_key: &str) -> anyhow::Result<Self> {
        let key = hex::decode(hex_key).with_context(|| "Vault encryption key is not valid hex.")?;
        if key.len() != 32 {
            bail!(
                "Vault encryption key must be 32 bytes (256 bits), got {} bytes.",
                key.len()
            );
        }
        Ok(Self { key })
    }

    /// Encrypts plaintext using AES-256-GCM with a fresh random nonce.
    /// Returns `nonce || ciphertext || tag`.
    pub fn encrypt(&self, plaintext: &[u8]) -> anyhow::Result<Vec<u8>> {
        let cipher = Cipher::aes_256_gcm();
        let nonce = Self::random_nonce()?;

        let mut crypter = Crypter::new(cipher, Mode::Encrypt, &self.key, Some(&nonce))?;
        let mut ciphertext = vec![0u8; plaintext.len() + cipher.block_size()];
        let mut count = crypter.update(plaintext, &mut ciphertext)?;
        count += crypter.finalize(&mut ciphertext[count..])?;
        ciphertext.truncate(count);

        let mut tag = vec![0u8; TAG_SIZE];
        crypter.get_tag(&mut tag)?;

        let mut output = Vec::with_capacity(NONCE_SIZE + ciphertext.len() + TAG_SIZE);
        output.extend_from_slice(&nonce);
        output.extend_from_slice(&ciphertext);
        output.extend_from_slice(&tag);

        Ok(output)
    }

    /// Decrypts data previously produced by [`Self::encrypt`]. Expects the
    /// `nonce || ciphertext || tag` layout. A truncated blob, a wrong key or
    /// any tampering surfaces as a decryption error.
    pub fn decrypt(&self, data: &[u8]) -> Result<Vec<u8>, Error> {
        if data.len() < NONCE_SIZE + TAG_SIZE {
            return Err(Error::decryption(anyhow!(
                "Encrypted data is too short to contain nonce and tag."
            )));
        }

        let cipher = Cipher::aes_256_gcm();
        let nonce = &data[..NONCE_SIZE];
        let tag = &data[data.len() - TAG_SIZE..];
        let ciphertext = &data[NONCE_SIZE..data.len() - TAG_SIZE];

        self.decrypt_raw(cipher, nonce, tag, ciphertext)
            .map_err(Error::decryption)
    }

    fn decrypt_raw(
        &self,
        cipher: Cipher,
        nonce: &[u8],
        tag: &[u8],
        ciphertext: &[u8],
    ) -> anyhow::Result<Vec<u8>> {
        let mut crypter = Crypter::new(cipher, Mode::Decrypt, &self.key, Some(nonce))?;
        crypter.set_tag(tag)?;

        let mut plaintext = vec![0u8; ciphertext.len() + cipher.block_size()];
        let mut count = crypter.update(ciphertext, &mut plaintext)?;
        count += crypter.finalize(&mut plaintext[count..])?;
        plaintext.truncate(count);

        Ok(plaintext)
    }

    fn random_nonce() -> anyhow::Result<[u8; NONCE_SIZE]> {
        let mut nonce = [0u8; NONCE_SIZE];
        openssl::rand::rand_bytes(&mut nonce)
            .with_context(|| "Failed to generate a random nonce.")?;
        Ok(nonce)
    }
}
