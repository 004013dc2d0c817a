//! End-to-end tests of the HTTP contract against the fully layered router.

use axum::http::StatusCode;
use axum_test::TestServer;
use common::envelope;
use common::SecretKey;
use envelope_svc::server::{router, state::AppState};
use serde_json::{json, Value};

const SECRET: &str = "12345678901234567890123456789012";
const OTHER_SECRET: &str = "abcdefghijklmnopqrstuvwxyz012345";

fn server_with(secret: &str) -> TestServer {
    let state = AppState::new(SecretKey::from_secret(secret).unwrap());
    TestServer::new(router::build(state)).unwrap()
}

async fn encrypt_via(server: &TestServer, key: &str) -> String {
    let resp = server
        .post("/encrypt-key")
        .json(&json!({ "key": key }))
        .await;
    resp.assert_status_ok();
    resp.json::<Value>()["encryptedKey"]
        .as_str()
        .unwrap()
        .to_owned()
}

#[tokio::test]
async fn encrypt_then_decrypt_round_trip() {
    let server = server_with(SECRET);
    let token = encrypt_via(&server, "oauth-client-key-123").await;

    let resp = server
        .post("/decrypt-key")
        .json(&json!({ "encryptedKey": token }))
        .await;
    resp.assert_status_ok();
    resp.assert_json(&json!({ "key": "oauth-client-key-123" }));
}

#[tokio::test]
async fn each_encryption_uses_a_fresh_iv() {
    let server = server_with(SECRET);
    let a = encrypt_via(&server, "same").await;
    let b = encrypt_via(&server, "same").await;
    assert_ne!(a, b);
}

#[tokio::test]
async fn tokens_interoperate_with_the_library() {
    let server = server_with(SECRET);
    let token = encrypt_via(&server, "from-the-service").await;
    assert_eq!(envelope::decrypt(&token, SECRET).unwrap(), "from-the-service");

    let token = envelope::encrypt("from-the-library", SECRET).unwrap();
    let resp = server
        .post("/decrypt-key")
        .json(&json!({ "encryptedKey": token }))
        .await;
    resp.assert_json(&json!({ "key": "from-the-library" }));
}

#[tokio::test]
async fn secret_mismatch_between_deployments_is_reported() {
    let producer = server_with(SECRET);
    let consumer = server_with(OTHER_SECRET);
    let token = encrypt_via(&producer, &"a".repeat(64)).await;

    let resp = consumer
        .post("/decrypt-key")
        .json(&json!({ "encryptedKey": token }))
        .await;
    resp.assert_status(StatusCode::BAD_REQUEST);
    let body = resp.json::<Value>();
    assert_eq!(body["error"], "Decryption failed");
    assert_eq!(body["code"], "decryption_failed");
    assert!(body["details"].is_string());
}

#[tokio::test]
async fn missing_key_contract() {
    let server = server_with(SECRET);
    let resp = server.post("/encrypt-key").json(&json!({})).await;
    resp.assert_status(StatusCode::BAD_REQUEST);
    resp.assert_json(&json!({ "error": "Missing key", "code": "invalid_input" }));
}

#[tokio::test]
async fn truncated_token_is_invalid_encoding() {
    let server = server_with(SECRET);
    let token = encrypt_via(&server, "truncate me").await;
    let truncated = &token[..token.len() - 1];

    let resp = server
        .post("/decrypt-key")
        .json(&json!({ "encryptedKey": truncated }))
        .await;
    resp.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(resp.json::<Value>()["code"], "invalid_encoding");
}

#[tokio::test]
async fn health_matches_configured_key() {
    let server = server_with(SECRET);
    let resp = server.get("/health").await;
    resp.assert_status_ok();
    let body = resp.json::<Value>();
    assert_eq!(body["status"], "ok");
    assert_eq!(
        body["keyFingerprint"],
        SecretKey::from_secret(SECRET).unwrap().fingerprint().as_str()
    );
}

#[tokio::test]
async fn unknown_route_is_404() {
    let server = server_with(SECRET);
    let resp = server.get("/nope").await;
    resp.assert_status(StatusCode::NOT_FOUND);
    assert_eq!(resp.json::<Value>()["code"], "not_found");
}
