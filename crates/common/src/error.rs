//! Common error types shared across crates.

use thiserror::Error;

use crate::envelope::CodecError;

/// Top-level service error type.
///
/// Variants map to HTTP status codes returned to callers:
/// - [`ServiceError::InvalidInput`] → 400
/// - [`ServiceError::Decryption`] → 400
/// - [`ServiceError::Encryption`] → 500
/// - [`ServiceError::Configuration`] → 500
/// - [`ServiceError::Internal`] → 500
#[derive(Debug, Error)]
pub enum ServiceError {
    /// A required setting is missing or invalid. Raised at startup only; a
    /// process in this state never serves requests.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The request was malformed — missing field, empty value, or invalid JSON.
    #[error("{0}")]
    InvalidInput(String),

    /// The token could not be decrypted under the configured secret.
    #[error("decryption failed: {0}")]
    Decryption(#[source] CodecError),

    /// Encryption failed in the codec.
    #[error("encryption failed: {0}")]
    Encryption(#[source] CodecError),

    /// An unexpected internal error occurred.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ServiceError {
    /// Returns the HTTP status code that should be sent for this error.
    pub fn http_status(&self) -> u16 {
        match self {
            ServiceError::InvalidInput(_) => 400,
            ServiceError::Decryption(_) => 400,
            ServiceError::Encryption(_) => 500,
            ServiceError::Configuration(_) => 500,
            ServiceError::Internal(_) => 500,
        }
    }

    /// Short machine-readable error code.
    ///
    /// Codec failures report the codec's own code so callers can tell a
    /// malformed token from a secret mismatch.
    pub fn code(&self) -> &'static str {
        match self {
            ServiceError::Configuration(_) => "configuration_error",
            ServiceError::InvalidInput(_) => "invalid_input",
            ServiceError::Decryption(e) | ServiceError::Encryption(e) => e.code(),
            ServiceError::Internal(_) => "internal_error",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_status_codes() {
        assert_eq!(ServiceError::InvalidInput("x".into()).http_status(), 400);
        assert_eq!(
            ServiceError::Decryption(CodecError::DecryptionFailed).http_status(),
            400
        );
        assert_eq!(
            ServiceError::Encryption(CodecError::InvalidKeyLength(0)).http_status(),
            500
        );
        assert_eq!(ServiceError::Configuration("x".into()).http_status(), 500);
        assert_eq!(ServiceError::Internal("x".into()).http_status(), 500);
    }

    #[test]
    fn codec_errors_keep_their_code() {
        let e = ServiceError::Decryption(CodecError::MalformedToken(1));
        assert_eq!(e.code(), "malformed_token");
        let e = ServiceError::Decryption(CodecError::DecryptionFailed);
        assert_eq!(e.code(), "decryption_failed");
        assert_eq!(ServiceError::InvalidInput("x".into()).code(), "invalid_input");
    }

    #[test]
    fn display_includes_message() {
        let e = ServiceError::Configuration("ENCRYPT_SECRET is required".into());
        assert!(e.to_string().contains("ENCRYPT_SECRET is required"));
        let e = ServiceError::InvalidInput("Missing key".into());
        assert_eq!(e.to_string(), "Missing key");
    }
}
