//! CLI subcommands

pub mod migrate;
pub mod serve;

use std::time::Duration;

use anyhow::{Context, Result};
use clap::Args;
use tutormatch_server::{ConfigError, PoolSettings, Storage};

/// Storage selection shared by `serve` and `migrate`
#[derive(Args, Debug, Clone)]
pub struct StorageArgs {
    /// Database URL (falls back to POSTGRES_URL)
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,

    /// Run without a database: fixed sample data, writes are discarded
    #[arg(long, env = "SAMPLE_DATA")]
    pub sample_data: bool,

    /// Maximum pooled connections
    #[arg(long, default_value_t = 10)]
    pub max_connections: u32,

    /// Connections kept warm
    #[arg(long, default_value_t = 2)]
    pub min_connections: u32,

    /// Seconds a request waits for a free connection
    #[arg(long, default_value_t = 30)]
    pub acquire_timeout: u64,
}

impl StorageArgs {
    /// URL from flag/`DATABASE_URL`, else `POSTGRES_URL`. Blank counts as unset.
    pub fn database_url(&self) -> Option<String> {
        self.database_url
            .clone()
            .or_else(|| std::env::var("POSTGRES_URL").ok())
            .filter(|url| !url.trim().is_empty())
    }

    pub fn pool_settings(&self) -> PoolSettings {
        PoolSettings {
            max_connections: self.max_connections,
            min_connections: self.min_connections,
            acquire_timeout: Duration::from_secs(self.acquire_timeout),
        }
    }

    /// Open storage in the selected mode.
    ///
    /// Sample mode must be asked for; a missing URL is an error otherwise.
    pub async fn open(&self) -> Result<Storage> {
        if self.sample_data {
            if self.database_url().is_some() {
                tracing::warn!("--sample-data set: ignoring configured database URL");
            }
            return Ok(Storage::sample());
        }

        let url = self.database_url().ok_or(ConfigError::MissingDatabaseUrl)?;
        let storage = Storage::connect_with(&url, self.pool_settings())
            .await
            .context("Failed to connect to database")?;
        Ok(storage)
    }
}
