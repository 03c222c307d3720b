//! Key derivation for the `v1` ciphertext scheme

use sha2::{Digest, Sha256};
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

/// Length of the AES-256 and HMAC-SHA256 keys
pub const KEY_LEN: usize = 32;

/// Length of the derived or random salts
pub const SALT_LEN: usize = 16;

/// PBKDF2 iteration count used when none is configured
pub const DEFAULT_KDF_ITERATIONS: u32 = 100_000;

/// Lowest accepted PBKDF2 iteration count
pub const MIN_KDF_ITERATIONS: u32 = 1_000;

const SALT_DOMAIN: &[u8] = b"phiguard/v1/salt:";

/// Working keys derived from the configured secret
#[derive(Zeroize, ZeroizeOnDrop)]
pub(crate) struct DerivedKeys {
    pub(crate) encryption: [u8; KEY_LEN],
    pub(crate) mac: [u8; KEY_LEN],
}

/// Derive the salt for a secret when none is configured
///
/// The same secret always yields the same salt so data written by one process
/// can be decrypted by the next one.
pub(crate) fn default_salt(secret: &[u8]) -> [u8; SALT_LEN] {
    let mut hasher = Sha256::new();
    hasher.update(SALT_DOMAIN);
    hasher.update(secret);
    let digest = hasher.finalize();

    let mut salt = [0u8; SALT_LEN];
    salt.copy_from_slice(&digest[..SALT_LEN]);
    salt
}

/// Derive the encryption and MAC keys with PBKDF2-HMAC-SHA256
pub(crate) fn derive_keys(secret: &[u8], salt: &[u8], iterations: u32) -> DerivedKeys {
    let mut okm = Zeroizing::new([0u8; KEY_LEN * 2]);
    pbkdf2::pbkdf2_hmac::<Sha256>(secret, salt, iterations, okm.as_mut());

    let mut keys = DerivedKeys {
        encryption: [0u8; KEY_LEN],
        mac: [0u8; KEY_LEN],
    };
    keys.encryption.copy_from_slice(&okm[..KEY_LEN]);
    keys.mac.copy_from_slice(&okm[KEY_LEN..]);
    keys
}
