//! `envelope-svc` — HTTP wrapper around the key envelope codec.
//!
//! Exposes `POST /encrypt-key`, `POST /decrypt-key`, and `GET /health`. The
//! master key is derived once at startup from the environment and shared by
//! every request.

pub mod config;
pub mod server;
pub mod telemetry;
