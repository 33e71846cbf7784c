//! tutormatch - tutor/client directory backend

mod commands;
mod tracing_setup;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::migrate::MigrateArgs;
use commands::serve::ServeArgs;

#[derive(Parser, Debug)]
#[command(name = "tutormatch", version, about = "Tutor and client directory API")]
struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP API (default when no command is given)
    Serve(ServeArgs),
    /// Apply the database schema and exit
    Migrate(MigrateArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    // .env must be loaded before clap reads env-backed defaults
    let dotenv = dotenvy::dotenv();

    let cli = Cli::parse();
    tracing_setup::init(&tracing_setup::TracingConfig { debug: cli.debug })?;

    match dotenv {
        Ok(path) => tracing::debug!("Loaded environment from {}", path.display()),
        Err(e) if e.not_found() => {}
        Err(e) => tracing::warn!("Ignoring unreadable .env file: {e}"),
    }

    match cli.command {
        Some(Commands::Serve(args)) => commands::serve::run_serve(args).await,
        Some(Commands::Migrate(args)) => commands::migrate::run_migrate(args).await,
        None => commands::serve::run_serve(ServeArgs::parse_from(["serve"])).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn debug_flag_is_global() {
        let cli = Cli::parse_from(["tutormatch", "migrate", "--debug"]);
        assert!(cli.debug);
        assert!(matches!(cli.command, Some(Commands::Migrate(_))));
    }
}
