//! AES-256-CBC key envelope codec.
//!
//! This module is intentionally free of HTTP and runtime dependencies. Both the
//! service and the CLI call into it; neither carries its own copy of the
//! algorithm.
//!
//! # Token format
//!
//! ```text
//! <base64(iv)>:<base64(ciphertext)>
//! ```
//!
//! Standard base64 alphabet with `=` padding. The IV is 16 random bytes drawn
//! fresh for every encryption; the ciphertext is PKCS#7-padded AES-256-CBC.
//!
//! The format carries no integrity tag. It is kept bit-exact so that tokens
//! produced by already-deployed encryptors remain readable.

pub mod cipher;
pub mod key;

pub use cipher::{
    decrypt, decrypt_with_key, encrypt, encrypt_with_key, CodecError, EncryptedToken, IV_LEN,
};
pub use key::{SecretKey, KEY_LEN};
