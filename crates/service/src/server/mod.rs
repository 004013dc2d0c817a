//! Axum HTTP server, routing, and middleware.
//!
//! # Responsibilities
//! - Define the Axum router with all routes and shared middleware.
//! - Inject shared application state (`AppState`) into handlers.
//! - Drain in-flight requests on SIGINT/SIGTERM.

pub mod handlers;
pub mod middleware;
pub mod router;
pub mod shutdown;
pub mod state;
