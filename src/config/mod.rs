mod file_config;

pub use file_config::FileConfig;

use crate::dataset::Dataset;
use anyhow::{bail, Result};
use std::path::{Path, PathBuf};

pub const DEFAULT_DB_PATH: &str = "sparkifydb.sqlite";
pub const DEFAULT_SONG_DATA: &str = "data/song_data";
pub const DEFAULT_LOG_DATA: &str = "data/log_data";

/// CLI arguments that can be used for config resolution.
/// Unset values fall back to the TOML file and then to the defaults.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    pub db_path: Option<PathBuf>,
    pub song_data: Option<PathBuf>,
    pub log_data: Option<PathBuf>,
    pub only: Option<Dataset>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub db_path: PathBuf,
    pub song_data: PathBuf,
    pub log_data: PathBuf,
    /// Restricts the run to one dataset; both are loaded when unset.
    pub only: Option<Dataset>,
}

fn check_data_dir(dataset: Dataset, path: &Path) -> Result<()> {
    if !path.exists() {
        bail!("{} data directory does not exist: {:?}", dataset, path);
    }
    if !path.is_dir() {
        bail!("{} data path is not a directory: {:?}", dataset, path);
    }
    Ok(())
}

impl AppConfig {
    /// Resolve configuration from CLI arguments and optional TOML file config.
    /// TOML values override CLI values where present.
    pub fn resolve(cli: &CliConfig, file_config: Option<FileConfig>) -> Result<Self> {
        let file = file_config.unwrap_or_default();

        let db_path = file
            .db_path
            .map(PathBuf::from)
            .or_else(|| cli.db_path.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DB_PATH));
        let song_data = file
            .song_data
            .map(PathBuf::from)
            .or_else(|| cli.song_data.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SONG_DATA));
        let log_data = file
            .log_data
            .map(PathBuf::from)
            .or_else(|| cli.log_data.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_DATA));

        let config = Self {
            db_path,
            song_data,
            log_data,
            only: cli.only,
        };
        for (dataset, root) in config.roots() {
            check_data_dir(dataset, root)?;
        }
        Ok(config)
    }

    /// Dataset roots this run loads, songs first.
    pub fn roots(&self) -> Vec<(Dataset, &Path)> {
        crate::load::pipeline_roots(&self.song_data, &self.log_data, self.only)
    }
}
