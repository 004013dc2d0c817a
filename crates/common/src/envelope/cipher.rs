//! AES-256-CBC encryption and decryption of short secrets.
//!
//! **Algorithm choice:** AES-256-CBC with PKCS#7 padding and a random 128-bit
//! IV per call, matching the token format already deployed between independent
//! producers and consumers. CBC provides confidentiality only; a flipped
//! ciphertext bit is not detected unless it breaks the padding.

use std::fmt;
use std::str::FromStr;

use aes::Aes256;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use cbc::cipher::{block_padding::Pkcs7, BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use rand::{rngs::OsRng, RngCore};
use thiserror::Error;
use tracing::debug;

use super::key::{SecretKey, KEY_LEN};

type Aes256CbcEnc = cbc::Encryptor<Aes256>;
type Aes256CbcDec = cbc::Decryptor<Aes256>;

/// Byte length of the CBC initialisation vector (16 bytes = one AES block).
pub const IV_LEN: usize = 16;

/// Separator between the IV and ciphertext segments of a token.
pub const DELIMITER: char = ':';

/// Errors produced by the codec.
///
/// Messages are safe to return to callers: they never include key material,
/// secret bytes, or plaintext.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    /// The token did not split into exactly two `:`-delimited segments.
    #[error("malformed token: expected 2 ':'-delimited segments, found {0}")]
    MalformedToken(usize),

    /// A token segment is not valid padded base64.
    #[error("invalid base64 encoding in {0} segment")]
    InvalidEncoding(&'static str),

    /// The decoded IV is not [`IV_LEN`] bytes.
    #[error("invalid IV: expected {IV_LEN} bytes, got {0}")]
    InvalidIv(usize),

    /// The secret is too short to supply [`KEY_LEN`] key bytes.
    #[error("invalid key length: secret must be at least {KEY_LEN} bytes, got {0}")]
    InvalidKeyLength(usize),

    /// Padding check failed or the plaintext was not UTF-8: wrong secret or
    /// corrupted token.
    #[error("decryption failed: wrong secret or corrupted token")]
    DecryptionFailed,
}

impl CodecError {
    /// Short machine-readable code for this error kind.
    pub fn code(&self) -> &'static str {
        match self {
            CodecError::MalformedToken(_) => "malformed_token",
            CodecError::InvalidEncoding(_) => "invalid_encoding",
            CodecError::InvalidIv(_) => "invalid_iv",
            CodecError::InvalidKeyLength(_) => "invalid_key_length",
            CodecError::DecryptionFailed => "decryption_failed",
        }
    }
}

/// A parsed envelope token.
///
/// The string representation is `<base64(iv)>:<base64(ciphertext)>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncryptedToken {
    /// Raw IV bytes.
    pub iv: [u8; IV_LEN],
    /// Raw PKCS#7-padded ciphertext bytes.
    pub ciphertext: Vec<u8>,
}

impl EncryptedToken {
    /// Encrypt `plaintext` under `key` with a freshly generated IV.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::InvalidKeyLength`] if the cipher rejects the key
    /// (unreachable for a [`SecretKey`] built through
    /// [`SecretKey::from_secret`]).
    pub fn seal(plaintext: &[u8], key: &SecretKey) -> Result<Self, CodecError> {
        let mut iv = [0u8; IV_LEN];
        OsRng.fill_bytes(&mut iv);
        Self::seal_with_iv(plaintext, key, iv)
    }

    fn seal_with_iv(
        plaintext: &[u8],
        key: &SecretKey,
        iv: [u8; IV_LEN],
    ) -> Result<Self, CodecError> {
        let cipher = Aes256CbcEnc::new_from_slices(key.as_bytes(), &iv)
            .map_err(|_| CodecError::InvalidKeyLength(key.as_bytes().len()))?;
        let ciphertext = cipher.encrypt_padded_vec_mut::<Pkcs7>(plaintext);

        Ok(Self { iv, ciphertext })
    }

    /// Decrypt this token under `key`, returning the unpadded plaintext bytes.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::DecryptionFailed`] if the ciphertext is not a whole
    /// number of blocks or its padding is invalid under `key`.
    pub fn open(&self, key: &SecretKey) -> Result<Vec<u8>, CodecError> {
        let cipher = Aes256CbcDec::new_from_slices(key.as_bytes(), &self.iv)
            .map_err(|_| CodecError::InvalidKeyLength(key.as_bytes().len()))?;
        cipher
            .decrypt_padded_vec_mut::<Pkcs7>(&self.ciphertext)
            .map_err(|_| CodecError::DecryptionFailed)
    }

    /// Parse a token string back into an [`EncryptedToken`].
    ///
    /// # Errors
    ///
    /// - [`CodecError::MalformedToken`] unless there are exactly two segments.
    /// - [`CodecError::InvalidEncoding`] if either segment's length is not a
    ///   multiple of 4, or a segment fails to decode.
    /// - [`CodecError::InvalidIv`] if the IV does not decode to [`IV_LEN`] bytes.
    ///
    /// Checks run in that order: both segment lengths before any decoding, and
    /// the IV is decoded and sized before the ciphertext is decoded.
    pub fn parse(s: &str) -> Result<Self, CodecError> {
        let parts: Vec<&str> = s.split(DELIMITER).collect();
        let [iv_part, ciphertext_part] = parts.as_slice() else {
            return Err(CodecError::MalformedToken(parts.len()));
        };

        check_segment_len(iv_part, "iv")?;
        check_segment_len(ciphertext_part, "ciphertext")?;

        let iv_bytes = decode_segment(iv_part, "iv")?;
        let iv: [u8; IV_LEN] = iv_bytes
            .as_slice()
            .try_into()
            .map_err(|_| CodecError::InvalidIv(iv_bytes.len()))?;
        let ciphertext = decode_segment(ciphertext_part, "ciphertext")?;

        Ok(Self { iv, ciphertext })
    }
}

impl fmt::Display for EncryptedToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{DELIMITER}{}",
            STANDARD.encode(self.iv),
            STANDARD.encode(&self.ciphertext),
        )
    }
}

impl FromStr for EncryptedToken {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

// Truncated tokens are rejected up front rather than left to the decoder.
fn check_segment_len(segment: &str, name: &'static str) -> Result<(), CodecError> {
    if segment.len() % 4 == 0 {
        Ok(())
    } else {
        Err(CodecError::InvalidEncoding(name))
    }
}

fn decode_segment(segment: &str, name: &'static str) -> Result<Vec<u8>, CodecError> {
    STANDARD
        .decode(segment)
        .map_err(|_| CodecError::InvalidEncoding(name))
}

/// Encrypt `plaintext` under a pre-derived key and render the token string.
///
/// # Errors
///
/// See [`EncryptedToken::seal`].
pub fn encrypt_with_key(plaintext: &str, key: &SecretKey) -> Result<String, CodecError> {
    Ok(EncryptedToken::seal(plaintext.as_bytes(), key)?.to_string())
}

/// Parse and decrypt `token` under a pre-derived key.
///
/// # Errors
///
/// Any parse error from [`EncryptedToken::parse`], or
/// [`CodecError::DecryptionFailed`] if the padding is invalid or the recovered
/// bytes are not UTF-8.
pub fn decrypt_with_key(token: &str, key: &SecretKey) -> Result<String, CodecError> {
    let result = EncryptedToken::parse(token)
        .and_then(|parsed| parsed.open(key))
        .and_then(|bytes| String::from_utf8(bytes).map_err(|_| CodecError::DecryptionFailed));
    if let Err(e) = &result {
        debug!(code = e.code(), key_fingerprint = %key.fingerprint(), "token rejected");
    }
    result
}

/// Encrypt `plaintext` with the key derived from `secret`.
///
/// Every call draws a new IV, so repeated calls with the same inputs return
/// different tokens that all decrypt to `plaintext`.
///
/// # Errors
///
/// Returns [`CodecError::InvalidKeyLength`] if `secret` is shorter than
/// [`KEY_LEN`] bytes.
pub fn encrypt(plaintext: &str, secret: &str) -> Result<String, CodecError> {
    let key = SecretKey::from_secret(secret)?;
    encrypt_with_key(plaintext, &key)
}

/// Decrypt `token` with the key derived from `secret`.
///
/// # Errors
///
/// [`CodecError::InvalidKeyLength`] for a short secret, otherwise see
/// [`decrypt_with_key`].
pub fn decrypt(token: &str, secret: &str) -> Result<String, CodecError> {
    let key = SecretKey::from_secret(secret)?;
    decrypt_with_key(token, &key)
}
