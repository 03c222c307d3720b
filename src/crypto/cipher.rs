//! AES-256-GCM cipher with versioned ciphertext strings

use super::digest::{constant_time_eq, hmac_sha256_hex, salted_sha256_hex};
use super::keys::{default_salt, derive_keys, DerivedKeys, DEFAULT_KDF_ITERATIONS, SALT_LEN};
use super::{FieldCipher, CIPHERTEXT_PREFIX, CIPHERTEXT_VERSION, MIN_KDF_ITERATIONS};
use crate::config::EncryptionConfig;
use crate::domain::{PhiGuardError, Result};
use aes_gcm::{
    aead::{Aead, KeyInit, Payload},
    Aes256Gcm, Nonce,
};
use base64::{engine::general_purpose::URL_SAFE, Engine};
use rand::rngs::OsRng;
use rand::RngCore;
use secrecy::ExposeSecret;
use std::fmt;

const NONCE_LEN: usize = 12;
const TAG_LEN: usize = 16;

/// Symmetric confidentiality and integrity primitive
///
/// Keys are derived once at construction and never change afterwards, so a
/// single instance can be shared across threads behind an `Arc`.
pub struct CipherCore {
    keys: DerivedKeys,
}

impl CipherCore {
    /// Create a cipher from a secret with the default key derivation settings
    ///
    /// # Errors
    ///
    /// Returns [`PhiGuardError::Key`] if the secret is empty.
    pub fn initialize(secret: &str) -> Result<Self> {
        Self::with_options(secret, None, DEFAULT_KDF_ITERATIONS)
    }

    /// Create a cipher with an explicit salt and iteration count
    ///
    /// When `salt` is `None` the salt is derived from the secret.
    pub fn with_options(secret: &str, salt: Option<&[u8]>, iterations: u32) -> Result<Self> {
        if secret.is_empty() {
            return Err(PhiGuardError::Key(
                "Encryption secret is missing or empty".to_string(),
            ));
        }

        if iterations < MIN_KDF_ITERATIONS {
            return Err(PhiGuardError::Key(format!(
                "Key derivation requires at least {MIN_KDF_ITERATIONS} iterations, got {iterations}"
            )));
        }

        let keys = match salt {
            Some([]) => {
                return Err(PhiGuardError::Key("Encryption salt cannot be empty".to_string()));
            }
            Some(salt) => derive_keys(secret.as_bytes(), salt, iterations),
            None => derive_keys(secret.as_bytes(), &default_salt(secret.as_bytes()), iterations),
        };

        tracing::debug!(iterations, "Cipher keys derived");

        Ok(Self { keys })
    }

    /// Create a cipher from the `[encryption]` configuration section
    pub fn from_config(config: &EncryptionConfig) -> Result<Self> {
        let secret = config
            .secret
            .as_ref()
            .ok_or_else(|| PhiGuardError::Key("Encryption secret is not configured".to_string()))?;

        let salt = config
            .salt
            .as_ref()
            .map(|s| s.expose_secret().as_str().as_bytes());

        Self::with_options(secret.expose_secret().as_str(), salt, config.kdf_iterations)
    }

    /// Encrypt bytes into a `v1:` ciphertext string
    ///
    /// Empty input yields an empty string so absent values stay absent.
    pub fn encrypt(&self, plaintext: &[u8]) -> Result<String> {
        if plaintext.is_empty() {
            return Ok(String::new());
        }

        let cipher = Aes256Gcm::new_from_slice(&self.keys.encryption)
            .map_err(|e| PhiGuardError::Encryption(format!("Invalid key: {e}")))?;

        let mut nonce_bytes = [0u8; NONCE_LEN];
        OsRng.fill_bytes(&mut nonce_bytes);

        let sealed = cipher
            .encrypt(
                Nonce::from_slice(&nonce_bytes),
                Payload {
                    msg: plaintext,
                    aad: CIPHERTEXT_VERSION.as_bytes(),
                },
            )
            .map_err(|_| PhiGuardError::Encryption("AEAD encryption failed".to_string()))?;

        let mut payload = Vec::with_capacity(NONCE_LEN + sealed.len());
        payload.extend_from_slice(&nonce_bytes);
        payload.extend_from_slice(&sealed);

        Ok(format!("{CIPHERTEXT_PREFIX}{}", URL_SAFE.encode(payload)))
    }

    /// Decrypt a `v1:` ciphertext string
    ///
    /// An empty string decrypts to empty bytes. A value without a recognized
    /// version prefix is not ciphertext and is returned unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`PhiGuardError::Decryption`] for malformed encoding, a wrong
    /// key or tampered data alike.
    pub fn decrypt(&self, ciphertext: &str) -> Result<Vec<u8>> {
        let Some(encoded) = ciphertext.strip_prefix(CIPHERTEXT_PREFIX) else {
            return Ok(ciphertext.as_bytes().to_vec());
        };

        let payload = URL_SAFE
            .decode(encoded)
            .map_err(|_| PhiGuardError::Decryption)?;

        if payload.len() < NONCE_LEN + TAG_LEN {
            return Err(PhiGuardError::Decryption);
        }

        let cipher =
            Aes256Gcm::new_from_slice(&self.keys.encryption).map_err(|_| PhiGuardError::Decryption)?;
        let (nonce, sealed) = payload.split_at(NONCE_LEN);

        cipher
            .decrypt(
                Nonce::from_slice(nonce),
                Payload {
                    msg: sealed,
                    aad: CIPHERTEXT_VERSION.as_bytes(),
                },
            )
            .map_err(|_| PhiGuardError::Decryption)
    }

    /// Encrypt a UTF-8 string
    pub fn encrypt_str(&self, plaintext: &str) -> Result<String> {
        self.encrypt(plaintext.as_bytes())
    }

    /// Decrypt into a UTF-8 string
    pub fn decrypt_str(&self, ciphertext: &str) -> Result<String> {
        let bytes = self.decrypt(ciphertext)?;
        String::from_utf8(bytes).map_err(|_| PhiGuardError::Decryption)
    }

    /// Salted one-way hash for values that must be comparable but never recovered
    ///
    /// Returns the hex digest and the random salt that produced it.
    pub fn hash(&self, data: &str) -> (String, Vec<u8>) {
        let mut salt = vec![0u8; SALT_LEN];
        OsRng.fill_bytes(&mut salt);
        let digest = salted_sha256_hex(&salt, data.as_bytes());
        (digest, salt)
    }

    /// Check `data` against a digest produced by [`hash`](Self::hash)
    pub fn verify_hash(&self, data: &str, digest: &str, salt: &[u8]) -> bool {
        let expected = salted_sha256_hex(salt, data.as_bytes());
        constant_time_eq(expected.as_bytes(), digest.as_bytes())
    }

    /// Keyed integrity tag (hex HMAC-SHA256)
    pub fn hmac(&self, data: &str) -> Result<String> {
        hmac_sha256_hex(&self.keys.mac, data.as_bytes())
    }

    /// Check an integrity tag produced by [`hmac`](Self::hmac)
    pub fn verify_hmac(&self, data: &str, tag: &str) -> bool {
        match self.hmac(data) {
            Ok(expected) => constant_time_eq(expected.as_bytes(), tag.as_bytes()),
            Err(_) => false,
        }
    }
}

impl FieldCipher for CipherCore {
    fn encrypt(&self, plaintext: &[u8]) -> Result<String> {
        CipherCore::encrypt(self, plaintext)
    }

    fn decrypt(&self, ciphertext: &str) -> Result<Vec<u8>> {
        CipherCore::decrypt(self, ciphertext)
    }
}

impl fmt::Debug for CipherCore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CipherCore")
            .field("version", &CIPHERTEXT_VERSION)
            .finish_non_exhaustive()
    }
}
