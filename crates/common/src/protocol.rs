//! Request and response types exchanged with callers of the HTTP service.
//!
//! Field names are camelCase on the wire to match the clients already
//! deployed against `/encrypt-key` and `/decrypt-key`.

use serde::{Deserialize, Serialize};

use crate::error::ServiceError;

// ---------------------------------------------------------------------------
// Encrypt endpoint
// ---------------------------------------------------------------------------

/// Request body for `POST /encrypt-key`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EncryptKeyRequest {
    /// Plaintext key to protect. Absent, `null`, and `""` are all rejected.
    #[serde(default)]
    pub key: Option<String>,
}

/// Successful response body for `POST /encrypt-key`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EncryptKeyResponse {
    /// `<base64(iv)>:<base64(ciphertext)>` token.
    pub encrypted_key: String,
}

// ---------------------------------------------------------------------------
// Decrypt endpoint
// ---------------------------------------------------------------------------

/// Request body for `POST /decrypt-key`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecryptKeyRequest {
    /// Token previously returned by `/encrypt-key`.
    #[serde(default)]
    pub encrypted_key: Option<String>,
}

/// Successful response body for `POST /decrypt-key`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecryptKeyResponse {
    /// Recovered plaintext key.
    pub key: String,
}

// ---------------------------------------------------------------------------
// Error response
// ---------------------------------------------------------------------------

/// Standard error response body returned on any non-2xx status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Human-readable summary safe to expose to callers.
    pub error: String,
    /// Short machine-readable error code (e.g. `"malformed_token"`).
    pub code: String,
    /// Additional detail, present only for decryption failures.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ErrorResponse {
    /// Construct an [`ErrorResponse`] from a message and code, without details.
    pub fn new(error: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            code: code.into(),
            details: None,
        }
    }

    /// Attach a details string.
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

impl From<&ServiceError> for ErrorResponse {
    fn from(err: &ServiceError) -> Self {
        match err {
            ServiceError::InvalidInput(msg) => Self::new(msg.clone(), err.code()),
            ServiceError::Decryption(e) => {
                Self::new("Decryption failed", err.code()).with_details(e.to_string())
            }
            ServiceError::Encryption(_) => Self::new("Encryption failed", err.code()),
            ServiceError::Configuration(_) | ServiceError::Internal(_) => {
                Self::new("Internal server error", err.code())
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Health check
// ---------------------------------------------------------------------------

/// Response body for `GET /health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    /// Overall service status; always `"ok"` once the server is accepting requests.
    pub status: String,
    /// Crate version of the running service.
    pub version: String,
    /// Fingerprint of the configured key, for comparing deployments.
    pub key_fingerprint: String,
}
