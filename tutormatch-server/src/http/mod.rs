//! HTTP server layer
//!
//! Axum server with:
//! - JSON envelopes for success and error responses
//! - Header-based admin allowlist on `/api/admin/*`
//! - Request tracing and timeouts
//! - Graceful shutdown

pub mod admin;
pub mod error;
pub mod extractors;
pub mod response;
pub mod routes;
pub mod server;

pub use admin::{AdminEmail, ADMIN_EMAIL_HEADER};
pub use error::ApiError;
pub use response::ApiResponse;
pub use server::{build_router, run_server, AppState, ServerConfig, ServerError};
