//! Walks a dataset root and loads every file into the warehouse, one
//! transaction per file.

use super::error::LoadError;
use super::extract::load_file;
use super::walker::{find_files, DATA_FILE_EXTENSION};
use crate::dataset::Dataset;
use crate::warehouse::{SqliteWarehouse, TableCounts};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Outcome of loading one dataset root.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoadReport {
    pub dataset: Dataset,
    pub root: PathBuf,
    pub files_found: usize,
    pub files_processed: usize,
    /// Rows actually written, so keys that already existed are not counted.
    pub rows: TableCounts,
}

fn store_error(path: &Path) -> impl Fn(rusqlite::Error) -> LoadError + '_ {
    move |source| LoadError::Store {
        path: path.to_path_buf(),
        source,
    }
}

/// Loads every dataset file under `root`.
///
/// Each file is committed on its own, so a failure leaves every earlier file
/// in place and rolls back only the file being loaded.
pub fn process_data(
    warehouse: &mut SqliteWarehouse,
    root: &Path,
    dataset: Dataset,
) -> Result<LoadReport, LoadError> {
    let files = find_files(root, DATA_FILE_EXTENSION)?;
    let num_files = files.len();
    info!("{} files found in {}", num_files, root.display());

    let mut report = LoadReport {
        dataset,
        root: root.to_path_buf(),
        files_found: num_files,
        files_processed: 0,
        rows: TableCounts::default(),
    };

    for (i, path) in files.into_iter().enumerate() {
        let contents = fs::read_to_string(&path).map_err(|source| LoadError::Read {
            path: path.clone(),
            source,
        })?;

        let tx = warehouse.transaction().map_err(store_error(&path))?;
        let rows = match load_file(dataset, &tx, &contents) {
            Ok(rows) => rows,
            Err(err) => return Err(err.at(path)),
        };
        tx.commit().map_err(store_error(&path))?;

        debug!("Loaded {}: {:?}", path.display(), rows);
        report.rows += rows;
        report.files_processed += 1;
        info!("{}/{} files processed.", i + 1, num_files);
    }

    Ok(report)
}

/// Dataset roots of one pipeline run, in load order.
pub fn pipeline_roots<'a>(
    song_data: &'a Path,
    log_data: &'a Path,
    only: Option<Dataset>,
) -> Vec<(Dataset, &'a Path)> {
    [(Dataset::Song, song_data), (Dataset::Log, log_data)]
        .into_iter()
        .filter(|(dataset, _)| only.map_or(true, |only| only == *dataset))
        .collect()
}

/// Loads the song dataset and then the log dataset, so plays can be resolved
/// against the songs of the same run.
pub fn run_pipeline(
    warehouse: &mut SqliteWarehouse,
    song_data: &Path,
    log_data: &Path,
    only: Option<Dataset>,
) -> Result<Vec<LoadReport>, LoadError> {
    let mut reports = Vec::new();
    for (dataset, root) in pipeline_roots(song_data, log_data, only) {
        info!("Loading {} data from {}...", dataset, root.display());
        reports.push(process_data(warehouse, root, dataset)?);
    }
    Ok(reports)
}
