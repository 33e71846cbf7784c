//! tutormatch-server: tutor/client profile service
//!
//! Postgres-backed CRUD for tutors and clients over HTTP, with an
//! admin subset gated by an email allowlist. Can also run without a
//! database in an explicit sample-data mode.

pub mod config;
pub mod db;
pub mod http;
pub mod models;

pub use config::{AdminAllowlist, ConfigError, StorageMode};
pub use db::{ensure_schema, PoolSettings, SchemaError, Storage};
pub use http::{run_server, ServerConfig, ServerError};
