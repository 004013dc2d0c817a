//! Resolution of the master secret from its configured environment names.
//!
//! Both the service and the CLI accept the secret under either
//! `ENCRYPT_SECRET` or `ENCRYPTION_MASTER_SECRET`. The first non-blank value
//! wins.

use crate::envelope::{CodecError, SecretKey, KEY_LEN};
use crate::error::ServiceError;

/// Preferred environment variable carrying the master secret.
pub const PRIMARY_SECRET_VAR: &str = "ENCRYPT_SECRET";

/// Alternate environment variable, consulted when the primary is absent.
pub const FALLBACK_SECRET_VAR: &str = "ENCRYPTION_MASTER_SECRET";

/// Pick the master secret from the two configured values and derive its key.
///
/// # Errors
///
/// Returns [`ServiceError::Configuration`] if neither value is set to a
/// non-blank string, or if the chosen secret is shorter than [`KEY_LEN`] bytes.
pub fn resolve_master_key(
    encrypt_secret: Option<&str>,
    encryption_master_secret: Option<&str>,
) -> Result<SecretKey, ServiceError> {
    let candidates = [
        (PRIMARY_SECRET_VAR, encrypt_secret),
        (FALLBACK_SECRET_VAR, encryption_master_secret),
    ];
    let (name, secret) = candidates
        .into_iter()
        .find_map(|(name, value)| {
            value
                .filter(|v| !v.trim().is_empty())
                .map(|v| (name, v))
        })
        .ok_or_else(|| {
            ServiceError::Configuration(format!(
                "{PRIMARY_SECRET_VAR} or {FALLBACK_SECRET_VAR} is required and must not be empty"
            ))
        })?;

    SecretKey::from_secret(secret).map_err(|e| match e {
        CodecError::InvalidKeyLength(len) => ServiceError::Configuration(format!(
            "{name} must be at least {KEY_LEN} bytes, got {len}"
        )),
        other => ServiceError::Configuration(format!("{name} is unusable: {other}")),
    })
}
