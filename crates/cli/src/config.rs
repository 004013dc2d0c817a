//! Configuration loading for the `envelope` CLI.
//!
//! The secret is read from the same environment variables the service uses,
//! so a token produced by one can be checked with the other.

use anyhow::{Context, Result};
use common::{secret, SecretKey};
use serde::Deserialize;

/// CLI configuration drawn from the environment.
#[derive(Clone, Default, Deserialize)]
pub struct Config {
    /// Master secret (preferred name).
    #[serde(default)]
    pub encrypt_secret: Option<String>,

    /// Master secret (alternate name).
    #[serde(default)]
    pub encryption_master_secret: Option<String>,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        let cfg = config::Config::builder()
            .add_source(config::Environment::default())
            .build()
            .context("failed to build envelope configuration")?;

        cfg.try_deserialize()
            .context("failed to deserialise envelope configuration")
    }

    /// Derive the master key, failing if no usable secret is set.
    pub fn master_key(&self) -> Result<SecretKey> {
        Ok(secret::resolve_master_key(
            self.encrypt_secret.as_deref(),
            self.encryption_master_secret.as_deref(),
        )?)
    }
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let redact = |v: &Option<String>| v.as_ref().map(|_| "[REDACTED]");
        f.debug_struct("Config")
            .field("encrypt_secret", &redact(&self.encrypt_secret))
            .field(
                "encryption_master_secret",
                &redact(&self.encryption_master_secret),
            )
            .finish()
    }
}
