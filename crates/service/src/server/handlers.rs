//! Axum request handlers for all service endpoints.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use common::envelope::{decrypt_with_key, encrypt_with_key};
use common::protocol::{
    DecryptKeyRequest, DecryptKeyResponse, EncryptKeyRequest, EncryptKeyResponse, ErrorResponse,
    HealthResponse,
};
use common::ServiceError;
use tracing::{error, info, warn};

use super::state::AppState;

/// `POST /encrypt-key` — wrap a plaintext key in an envelope token.
///
/// Responds `200 {"encryptedKey": "<iv>:<ciphertext>"}`, or `400` with
/// `"Missing key"` when the field is absent or empty.
pub async fn encrypt_key(
    State(state): State<AppState>,
    body: Result<Json<EncryptKeyRequest>, JsonRejection>,
) -> Response {
    let req = match body {
        Ok(Json(req)) => req,
        Err(rejection) => return json_rejection(rejection),
    };

    let Some(key) = req.key.filter(|k| !k.is_empty()) else {
        return error_response(&ServiceError::InvalidInput("Missing key".into()));
    };

    match encrypt_with_key(&key, &state.key) {
        Ok(encrypted_key) => {
            info!(key_fingerprint = %state.key_fingerprint, "key encrypted");
            (StatusCode::OK, Json(EncryptKeyResponse { encrypted_key })).into_response()
        }
        Err(e) => {
            let err = ServiceError::Encryption(e);
            error!(code = err.code(), key_fingerprint = %state.key_fingerprint, "encryption failed");
            error_response(&err)
        }
    }
}

/// `POST /decrypt-key` — recover the plaintext key from an envelope token.
///
/// Responds `200 {"key": "<plaintext>"}`. Codec failures respond `400` with
/// `"Decryption failed"`, the codec error code, and a safe `details` message.
pub async fn decrypt_key(
    State(state): State<AppState>,
    body: Result<Json<DecryptKeyRequest>, JsonRejection>,
) -> Response {
    let req = match body {
        Ok(Json(req)) => req,
        Err(rejection) => return json_rejection(rejection),
    };

    let Some(token) = req.encrypted_key.filter(|t| !t.is_empty()) else {
        return error_response(&ServiceError::InvalidInput("Missing encryptedKey".into()));
    };

    match decrypt_with_key(&token, &state.key) {
        Ok(key) => {
            info!(key_fingerprint = %state.key_fingerprint, "key decrypted");
            (StatusCode::OK, Json(DecryptKeyResponse { key })).into_response()
        }
        Err(e) => {
            let err = ServiceError::Decryption(e);
            warn!(
                code = err.code(),
                key_fingerprint = %state.key_fingerprint,
                token_len = token.len(),
                "decryption failed"
            );
            error_response(&err)
        }
    }
}

/// `GET /health` — liveness check.
///
/// The process refuses to start without a valid key, so a running server is
/// always ready.
pub async fn health(State(state): State<AppState>) -> Response {
    let body = HealthResponse {
        status: "ok".into(),
        version: env!("CARGO_PKG_VERSION").into(),
        key_fingerprint: state.key_fingerprint.to_string(),
    };
    (StatusCode::OK, Json(body)).into_response()
}

/// Catch-all 404 handler.
pub async fn not_found() -> impl IntoResponse {
    let err = ErrorResponse::new("Not found", "not_found");
    (StatusCode::NOT_FOUND, Json(err))
}

fn error_response(err: &ServiceError) -> Response {
    let status =
        StatusCode::from_u16(err.http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(ErrorResponse::from(err))).into_response()
}

fn json_rejection(rejection: JsonRejection) -> Response {
    // The rejection text can echo parts of the body, so only the status is logged.
    let status = rejection.status();
    warn!(status = status.as_u16(), "rejected request body");
    if status == StatusCode::PAYLOAD_TOO_LARGE {
        let err = ErrorResponse::new("Request body too large", "payload_too_large");
        return (status, Json(err)).into_response();
    }
    error_response(&ServiceError::InvalidInput("Invalid JSON body".into()))
}
