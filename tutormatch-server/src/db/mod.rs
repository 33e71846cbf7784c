//! Database layer - connection pool, schema and repositories
//!
//! # Design Principles
//!
//! - One pool per process, passed in explicitly (no globals)
//! - Schema applied once at startup, idempotent
//! - Single-statement mutations; last writer wins on update
//! - Sample mode is an explicit `Storage` variant, never an implicit fallback

pub mod pool;
pub mod repos;
pub mod sample;
pub mod schema;

pub use pool::{PoolSettings, Storage};
pub use repos::{ClientRepo, DbError, TutorRepo};
pub use schema::{ensure_schema, SchemaError};
