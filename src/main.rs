use anyhow::{Context, Result};
use clap::Parser;
use songplay_etl::{run_pipeline, AppConfig, CliConfig, Dataset, FileConfig, SqliteWarehouse};
use std::path::PathBuf;
use tracing::{info, level_filters::LevelFilter};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser, Debug)]
#[command(about = "Load the song and log datasets into the songplay warehouse")]
struct CliArgs {
    /// Path to the SQLite warehouse database. Tables must already exist (see create-tables).
    #[clap(long, env = "SONGPLAY_DB")]
    pub db_path: Option<PathBuf>,

    /// Root directory of the song dataset.
    #[clap(long, env = "SONG_DATA_DIR")]
    pub song_data: Option<PathBuf>,

    /// Root directory of the log dataset.
    #[clap(long, env = "LOG_DATA_DIR")]
    pub log_data: Option<PathBuf>,

    /// Load only one of the two datasets.
    #[clap(long, value_enum)]
    pub only: Option<Dataset>,

    /// Optional TOML config file. Its values override the arguments above.
    #[clap(long, env = "SONGPLAY_CONFIG")]
    pub config: Option<PathBuf>,
}

impl CliArgs {
    fn to_cli_config(&self) -> CliConfig {
        CliConfig {
            db_path: self.db_path.clone(),
            song_data: self.song_data.clone(),
            log_data: self.log_data.clone(),
            only: self.only,
        }
    }
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

    let file_config = match &cli_args.config {
        Some(path) => {
            info!("Loading config from {:?}", path);
            Some(FileConfig::load(path)?)
        }
        None => None,
    };
    let config = AppConfig::resolve(&cli_args.to_cli_config(), file_config)?;

    info!("Opening warehouse at {:?}...", config.db_path);
    let mut warehouse = SqliteWarehouse::open(&config.db_path)?;

    let reports = run_pipeline(
        &mut warehouse,
        &config.song_data,
        &config.log_data,
        config.only,
    )?;

    info!("");
    info!("Load Summary");
    info!("============");
    for report in &reports {
        info!(
            "{} data: {}/{} files from {}",
            report.dataset,
            report.files_processed,
            report.files_found,
            report.root.display()
        );
        info!(
            "  new rows: {} artists, {} songs, {} users, {} time, {} songplays",
            report.rows.artists,
            report.rows.songs,
            report.rows.users,
            report.rows.time,
            report.rows.songplays
        );
    }

    let counts = warehouse.get_counts()?;
    info!("");
    info!("Warehouse contains:");
    info!("  {} artists", counts.artists);
    info!("  {} songs", counts.songs);
    info!("  {} users", counts.users);
    info!("  {} time rows", counts.time);
    info!("  {} songplays", counts.songplays);

    Ok(())
}
