//! Common types, the key envelope codec, and errors shared across `key-envelope` crates.

pub mod envelope;
pub mod error;
pub mod protocol;
pub mod secret;

pub use envelope::{CodecError, EncryptedToken, SecretKey};
pub use error::ServiceError;
