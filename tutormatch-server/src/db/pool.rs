//! Database connection pool management
//!
//! Uses sqlx PgPool with explicit connection limits. The pool is owned
//! by a `Storage` value built once at startup and handed to the router
//! state; there is no process-wide global.

use std::str::FromStr;
use std::time::Duration;

use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::PgPool;

use crate::config::{ConfigError, StorageMode};

/// Default maximum connections for the pool.
const DEFAULT_MAX_CONNECTIONS: u32 = 10;

/// Connections kept warm.
const DEFAULT_MIN_CONNECTIONS: u32 = 2;

/// How long a caller waits in the queue for a free connection.
const DEFAULT_ACQUIRE_TIMEOUT: Duration = Duration::from_secs(30);

/// Pool sizing options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolSettings {
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout: Duration,
}

impl Default for PoolSettings {
    fn default() -> Self {
        Self {
            max_connections: DEFAULT_MAX_CONNECTIONS,
            min_connections: DEFAULT_MIN_CONNECTIONS,
            acquire_timeout: DEFAULT_ACQUIRE_TIMEOUT,
        }
    }
}

/// Storage handle passed to repositories.
///
/// `Sample` is the explicit storage-less mode: reads serve the fixed
/// sample dataset and writes are accepted but not persisted.
#[derive(Debug, Clone)]
pub enum Storage {
    Postgres(PgPool),
    Sample,
}

impl Storage {
    /// Connect with default pool settings.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the URL is blank or malformed, or if the
    /// database does not answer the initial ping.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let storage = Storage::connect("postgres://localhost/tutormatch").await?;
    /// ```
    pub async fn connect(database_url: &str) -> Result<Self, ConfigError> {
        Self::connect_with(database_url, PoolSettings::default()).await
    }

    /// Connect with custom pool settings.
    pub async fn connect_with(
        database_url: &str,
        settings: PoolSettings,
    ) -> Result<Self, ConfigError> {
        let database_url = database_url.trim();
        if database_url.is_empty() {
            return Err(ConfigError::MissingDatabaseUrl);
        }

        let options = PgConnectOptions::from_str(database_url).map_err(ConfigError::InvalidUrl)?;

        let pool = PgPoolOptions::new()
            .max_connections(settings.max_connections)
            .min_connections(settings.min_connections.min(settings.max_connections))
            .acquire_timeout(settings.acquire_timeout)
            .connect_with(options)
            .await
            .map_err(ConfigError::Unreachable)?;

        sqlx::query("SELECT 1")
            .execute(&pool)
            .await
            .map_err(ConfigError::Unreachable)?;

        tracing::info!(
            max_connections = settings.max_connections,
            min_connections = settings.min_connections,
            "Connected to PostgreSQL"
        );

        Ok(Self::Postgres(pool))
    }

    /// Storage-less mode.
    pub fn sample() -> Self {
        Self::Sample
    }

    /// The live pool, or `None` in sample mode.
    pub fn pool(&self) -> Option<&PgPool> {
        match self {
            Self::Postgres(pool) => Some(pool),
            Self::Sample => None,
        }
    }

    pub fn mode(&self) -> StorageMode {
        match self {
            Self::Postgres(_) => StorageMode::Postgres,
            Self::Sample => StorageMode::Sample,
        }
    }

    /// Check the database answers. Always false in sample mode.
    pub async fn ping(&self) -> bool {
        match self {
            Self::Postgres(pool) => sqlx::query("SELECT 1").execute(pool).await.is_ok(),
            Self::Sample => false,
        }
    }

    /// Release all pooled connections. Safe to call more than once.
    pub async fn close(&self) {
        if let Self::Postgres(pool) = self {
            if !pool.is_closed() {
                pool.close().await;
                tracing::info!("Database connection pool closed");
            }
        }
    }
}
