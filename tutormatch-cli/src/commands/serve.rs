//! HTTP server command
//!
//! Opens storage, applies the schema, then serves until Ctrl+C/SIGTERM.

use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;

use tutormatch_server::config::DEFAULT_PORT;
use tutormatch_server::{ensure_schema, run_server, AdminAllowlist, ServerConfig};

use super::StorageArgs;

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    #[command(flatten)]
    pub storage: StorageArgs,

    /// Interface to bind
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: IpAddr,

    /// Port to listen on
    #[arg(long, short = 'p', env = "PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Comma-separated admin emails (default: admin@example.com)
    #[arg(long, env = "ADMIN_EMAILS", value_delimiter = ',')]
    pub admin_emails: Vec<String>,

    /// Comma-separated allowed CORS origins (default: any)
    #[arg(long, env = "CORS_ORIGINS", value_delimiter = ',')]
    pub cors_origins: Vec<String>,

    /// Request timeout in seconds
    #[arg(long = "timeout", env = "REQUEST_TIMEOUT_SECS", default_value_t = 30)]
    pub timeout_secs: u64,
}

impl ServeArgs {
    /// Blank or missing list falls back to the built-in default.
    fn admins(&self) -> AdminAllowlist {
        AdminAllowlist::new(&self.admin_emails)
    }

    fn server_config(&self) -> ServerConfig {
        ServerConfig {
            bind_addr: SocketAddr::new(self.host, self.port),
            cors_origins: self.cors_origins.clone(),
            request_timeout: Duration::from_secs(self.timeout_secs),
        }
    }
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    let storage = args.storage.open().await?;

    // Schema must be in place before the listener accepts requests
    if let Err(e) = ensure_schema(&storage).await {
        storage.close().await;
        return Err(e).context("Failed to apply database schema");
    }

    let config = args.server_config();
    tracing::info!("Starting tutormatch server on {}", config.bind_addr);

    // Run server (blocks until shutdown, closes the pool on the way out)
    run_server(storage, args.admins(), config)
        .await
        .context("Server error")?;

    Ok(())
}
