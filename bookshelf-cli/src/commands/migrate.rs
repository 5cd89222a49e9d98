//! Schema command: create the tables if they are missing, then exit

use anyhow::{Context, Result};
use bookshelf_server::connect_store;
use bookshelf_server::db::Store;
use clap::Parser;

use super::DatabaseArgs;

/// Arguments for the migrate command
#[derive(Parser, Debug)]
pub struct MigrateArgs {
    #[command(flatten)]
    pub database: DatabaseArgs,
}

pub async fn run_migrate(args: MigrateArgs) -> Result<()> {
    let store = connect_store(&args.database.into())
        .await
        .context("Failed to prepare database schema")?;
    store.close().await;

    tracing::info!("Schema is up to date");
    Ok(())
}
