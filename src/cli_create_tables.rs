//! Drops and recreates every warehouse table.

use anyhow::{Context, Result};
use clap::Parser;
use songplay_etl::config::DEFAULT_DB_PATH;
use songplay_etl::SqliteWarehouse;
use std::path::PathBuf;
use tracing::{info, level_filters::LevelFilter, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser, Debug)]
#[command(about = "Drop and recreate the songplay warehouse tables")]
struct CliArgs {
    /// Path to the SQLite warehouse database. Created if it does not exist.
    #[clap(long, env = "SONGPLAY_DB", default_value = DEFAULT_DB_PATH)]
    pub db_path: PathBuf,
}

fn main() -> Result<()> {
    let cli_args = CliArgs::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .with_env_var("LOG_LEVEL")
                .from_env_lossy(),
        )
        .try_init()
        .context("Failed to install tracing subscriber")?;

    info!("Warehouse database: {}", cli_args.db_path.display());
    if cli_args.db_path.exists() {
        warn!("Existing tables and their rows will be dropped.");
    }

    let warehouse = SqliteWarehouse::connect(&cli_args.db_path)?;
    warehouse.drop_tables()?;
    warehouse.create_tables()?;
    warehouse.validate_schema()?;

    info!("Tables created.");
    Ok(())
}
