//! Structured logging, with optional OpenTelemetry span export.
//!
//! # Telemetry invariants
//!
//! - **No key material, secret bytes, or plaintext** may appear in any span
//!   attribute or log field. Keys are identified by fingerprint only.
//! - Log level is configurable via `LOG_LEVEL` (default: `info`), overridden
//!   by `RUST_LOG`.

pub mod init;

pub use init::{init_telemetry, shutdown_telemetry};
