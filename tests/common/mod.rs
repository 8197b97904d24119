//! Common test infrastructure
//!
//! Writes small song and log datasets into a temporary directory and opens a
//! fresh warehouse next to them.
//!
//! # Example
//!
//! ```no_run
//! mod common;
//! use common::TestWorkspace;
//!
//! #[test]
//! fn test_load() {
//!     let mut workspace = TestWorkspace::with_sample_data();
//!     workspace.run().unwrap();
//! }
//! ```

mod fixtures;

pub use fixtures::*;

use songplay_etl::{run_pipeline, LoadError, LoadReport, SqliteWarehouse, TableCounts};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub struct TestWorkspace {
    pub song_data: PathBuf,
    pub log_data: PathBuf,
    pub db_path: PathBuf,
    pub warehouse: SqliteWarehouse,
    // Keeps the directory alive for the lifetime of the workspace
    _temp_dir: TempDir,
}

impl TestWorkspace {
    /// Empty data roots and a warehouse with freshly created tables.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let song_data = temp_dir.path().join("song_data");
        let log_data = temp_dir.path().join("log_data");
        fs::create_dir_all(&song_data).unwrap();
        fs::create_dir_all(&log_data).unwrap();

        let db_path = temp_dir.path().join("sparkifydb.sqlite");
        SqliteWarehouse::connect(&db_path)
            .unwrap()
            .create_tables()
            .unwrap();
        let warehouse = SqliteWarehouse::open(&db_path).unwrap();

        TestWorkspace {
            song_data,
            log_data,
            db_path,
            warehouse,
            _temp_dir: temp_dir,
        }
    }

    pub fn with_sample_data() -> Self {
        let workspace = Self::new();
        write_file(&workspace.song_data, SONG_FILE_1_PATH, SONG_FILE_1);
        write_file(&workspace.song_data, SONG_FILE_2_PATH, SONG_FILE_2);
        write_file(&workspace.log_data, LOG_FILE_PATH, &sample_log_file());
        workspace
    }

    pub fn run(&mut self) -> Result<Vec<LoadReport>, LoadError> {
        run_pipeline(&mut self.warehouse, &self.song_data, &self.log_data, None)
    }

    pub fn counts(&self) -> TableCounts {
        self.warehouse.get_counts().unwrap()
    }
}

pub fn write_file(root: &Path, relative: &str, contents: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}
