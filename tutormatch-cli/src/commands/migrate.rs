//! Schema migration command

use anyhow::{bail, Context, Result};
use clap::Parser;

use tutormatch_server::ensure_schema;

use super::StorageArgs;

/// Arguments for the migrate command
#[derive(Parser, Debug)]
pub struct MigrateArgs {
    #[command(flatten)]
    pub storage: StorageArgs,
}

/// Create missing tables, columns and indexes, then exit
pub async fn run_migrate(args: MigrateArgs) -> Result<()> {
    if args.storage.sample_data {
        bail!("migrate needs a database; --sample-data has nothing to migrate");
    }

    let storage = args.storage.open().await?;
    let result = ensure_schema(&storage).await;
    storage.close().await;
    result.context("Failed to apply database schema")?;

    tracing::info!("Schema is up to date");
    Ok(())
}
