//! [`SecretKey`]: the 32-byte AES key derived from an operator-supplied secret.

use sha2::{Digest, Sha256};
use zeroize::Zeroizing;

use super::cipher::CodecError;

/// Byte length of an AES-256 key (32 bytes = 256 bits).
pub const KEY_LEN: usize = 32;

/// Number of digest bytes rendered into a [`SecretKey::fingerprint`].
const FINGERPRINT_LEN: usize = 4;

/// Fixed-size key buffer holding exactly [`KEY_LEN`] bytes.
///
/// The key is the first [`KEY_LEN`] bytes of the secret's UTF-8 encoding.
/// Secrets that share those bytes therefore produce the same key. The buffer is
/// overwritten with zeroes on drop.
#[derive(Clone)]
pub struct SecretKey(Zeroizing<[u8; KEY_LEN]>);

impl SecretKey {
    /// Derive a key from `secret`.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::InvalidKeyLength`] if the UTF-8 encoding of
    /// `secret` is shorter than [`KEY_LEN`] bytes. Short secrets are never
    /// padded or repeated.
    pub fn from_secret(secret: &str) -> Result<Self, CodecError> {
        let bytes = secret.as_bytes();
        if bytes.len() < KEY_LEN {
            return Err(CodecError::InvalidKeyLength(bytes.len()));
        }
        let mut key = Zeroizing::new([0u8; KEY_LEN]);
        key.copy_from_slice(&bytes[..KEY_LEN]);
        Ok(Self(key))
    }

    pub(crate) fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.0
    }

    /// Short, non-reversible identifier for this key.
    ///
    /// Lowercase hex of the first four bytes of SHA-256 over the derived key.
    /// Safe to log; two deployments with different fingerprints will not be
    /// able to read each other's tokens.
    pub fn fingerprint(&self) -> String {
        let digest = Sha256::digest(self.0.as_slice());
        digest[..FINGERPRINT_LEN]
            .iter()
            .map(|b| format!("{b:02x}"))
            .collect()
    }
}

impl std::fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Never print key material — not even in debug builds.
        f.write_str("SecretKey([REDACTED])")
    }
}
