//! Shared application state injected into every Axum handler.

use std::sync::Arc;

use common::SecretKey;

/// Application state shared across all request handlers.
///
/// The key is derived once at startup and never changes for the life of the
/// process. Both fields are `Arc`-backed so cloning per request is cheap.
#[derive(Clone, Debug)]
pub struct AppState {
    /// Master key used for every encrypt/decrypt call.
    pub key: Arc<SecretKey>,
    /// Precomputed fingerprint of `key`, attached to log events.
    pub key_fingerprint: Arc<str>,
}

impl AppState {
    /// Create a new [`AppState`] around a derived key.
    pub fn new(key: SecretKey) -> Self {
        let key_fingerprint = key.fingerprint().into();
        Self {
            key: Arc::new(key),
            key_fingerprint,
        }
    }
}
