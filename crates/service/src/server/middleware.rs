//! Axum middleware layers applied to the router.
//!
//! Includes request tracing, timeout enforcement, request ids, CORS, a body
//! size cap, and JSON bodies for framework-generated errors.

use std::time::Duration;

use axum::{
    http::{header, Method, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use common::protocol::ErrorResponse;
use tower_http::cors::{Any, CorsLayer};

/// Default per-request timeout applied to all routes.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Largest accepted request body. Keys and tokens are a few hundred bytes.
pub const MAX_BODY_BYTES: usize = 64 * 1024;

/// CORS policy for browser callers: any origin, JSON bodies, bearer auth.
pub fn cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
}

/// Give the empty 405 and 408 responses produced by axum and the timeout
/// layer the same [`ErrorResponse`] body as every other error.
///
/// Status and remaining headers (such as `Allow`) are kept.
pub async fn json_error_body(resp: Response) -> Response {
    let (error, code) = match resp.status() {
        StatusCode::METHOD_NOT_ALLOWED => ("Method not allowed", "method_not_allowed"),
        StatusCode::REQUEST_TIMEOUT => ("Request timed out", "request_timeout"),
        _ => return resp,
    };
    let (mut parts, _) = resp.into_parts();
    parts.headers.remove(header::CONTENT_LENGTH);
    parts.headers.remove(header::CONTENT_TYPE);
    (parts, Json(ErrorResponse::new(error, code))).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use serde_json::{json, Value};

    async fn body_json(resp: Response) -> Value {
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn timeout_gets_json_body() {
        let resp = Response::builder()
            .status(StatusCode::REQUEST_TIMEOUT)
            .body(Body::empty())
            .unwrap();
        let resp = json_error_body(resp).await;
        assert_eq!(resp.status(), StatusCode::REQUEST_TIMEOUT);
        assert_eq!(resp.headers()[header::CONTENT_TYPE], "application/json");
        assert_eq!(
            body_json(resp).await,
            json!({"error": "Request timed out", "code": "request_timeout"})
        );
    }

    #[tokio::test]
    async fn method_not_allowed_keeps_allow_header() {
        let resp = Response::builder()
            .status(StatusCode::METHOD_NOT_ALLOWED)
            .header(header::ALLOW, "POST")
            .body(Body::empty())
            .unwrap();
        let resp = json_error_body(resp).await;
        assert_eq!(resp.headers()[header::ALLOW], "POST");
        assert_eq!(body_json(resp).await["code"], "method_not_allowed");
    }

    #[tokio::test]
    async fn other_responses_pass_through() {
        let resp = Response::builder()
            .status(StatusCode::OK)
            .body(Body::from("ok"))
            .unwrap();
        let resp = json_error_body(resp).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&bytes[..], b"ok");
    }
}
