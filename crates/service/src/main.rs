//! `envelope-svc` — service binary entry point.
//!
//! Startup sequence:
//! 1. Load and validate [`Config`] from environment variables.
//! 2. Initialise the telemetry pipeline (JSON logs, optional OTLP).
//! 3. Derive the master key once; log its fingerprint.
//! 4. Build the Axum router and serve until SIGINT/SIGTERM.

use std::net::SocketAddr;

use anyhow::{Context, Result};
use tracing::info;

use envelope_svc::config::Config;
use envelope_svc::server::{self, state::AppState};
use envelope_svc::telemetry;

#[tokio::main]
async fn main() -> Result<()> {
    // -----------------------------------------------------------------------
    // 1. Configuration
    // -----------------------------------------------------------------------
    let cfg = Config::from_env().map_err(|e| {
        // Telemetry is not yet up; write to stderr directly.
        eprintln!("ERROR: configuration invalid: {e:#}");
        e
    })?;

    // -----------------------------------------------------------------------
    // 2. Telemetry
    // -----------------------------------------------------------------------
    telemetry::init_telemetry(cfg.otel_exporter_otlp_endpoint.as_deref(), &cfg.log_level)?;

    // -----------------------------------------------------------------------
    // 3. Master key
    // -----------------------------------------------------------------------
    let key = cfg.master_key()?;
    info!(
        version = env!("CARGO_PKG_VERSION"),
        listen_port = cfg.listen_port,
        key_fingerprint = %key.fingerprint(),
        "envelope-svc starting"
    );

    // -----------------------------------------------------------------------
    // 4. HTTP server
    // -----------------------------------------------------------------------
    let router = server::router::build(AppState::new(key));

    let addr: SocketAddr = ([0, 0, 0, 0], cfg.listen_port).into();
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!(addr = %addr, "listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(server::shutdown::shutdown_signal())
        .await
        .context("server terminated with an error")?;

    info!("envelope-svc stopped");
    telemetry::shutdown_telemetry();
    Ok(())
}
