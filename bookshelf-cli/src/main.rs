//! bookshelf CLI - authors and books HTTP API
//!
//! Entry point for:
//! - `serve`: run the HTTP server (PostgreSQL or in-memory)
//! - `migrate`: create the schema and exit
//!
//! A `.env` file in the working directory is loaded first; variables already
//! set in the environment take precedence.

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod tracing_setup;

use tracing_setup::TracingConfig;

#[derive(Parser, Debug)]
#[command(
    name = "bookshelf",
    author,
    version,
    about = "Authors and books CRUD API behind a static API key"
)]
struct Cli {
    /// Enable debug logging (unless RUST_LOG is set)
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP API server
    Serve(commands::serve::ServeArgs),
    /// Create the authors/books tables if they do not exist
    Migrate(commands::migrate::MigrateArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    // dotenvy doesn't overwrite existing vars
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    tracing_setup::init(&TracingConfig { debug: cli.debug }).ok();

    match cli.command {
        Commands::Serve(args) => commands::run_serve(args).await?,
        Commands::Migrate(args) => commands::run_migrate(args).await?,
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn serve_parses_flags() {
        let cli = Cli::try_parse_from([
            "bookshelf",
            "serve",
            "--api-key",
            "k",
            "--in-memory",
            "--bind",
            "0.0.0.0:9000",
        ])
        .unwrap();

        match cli.command {
            Commands::Serve(args) => {
                assert_eq!(args.api_key, "k");
                assert!(args.in_memory);
                assert_eq!(args.bind.port(), 9000);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
