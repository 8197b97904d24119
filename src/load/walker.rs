//! Discovery of dataset files under a root directory.

use std::ffi::OsStr;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::{DirEntry, WalkDir};

/// Extension of every dataset file.
pub const DATA_FILE_EXTENSION: &str = "json";

#[derive(Debug, Error)]
pub enum ScanError {
    #[error("Path not found: {0}")]
    PathNotFound(PathBuf),

    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),

    #[error("Cannot read {path}: {source}")]
    FileAccess {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry
        .file_name()
        .to_str()
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}

fn has_extension(entry: &DirEntry, extension: &str) -> bool {
    entry.path().extension() == Some(OsStr::new(extension))
}

/// Lists every regular file under `root` whose extension is `extension`.
///
/// The extension may be given with or without its leading dot. Paths are
/// absolute and sorted by name within each directory, so the order is stable
/// across runs. Hidden files are skipped and symlinks are not followed.
pub fn find_files(root: &Path, extension: &str) -> Result<Vec<PathBuf>, ScanError> {
    if !root.exists() {
        return Err(ScanError::PathNotFound(root.to_path_buf()));
    }
    if !root.is_dir() {
        return Err(ScanError::NotADirectory(root.to_path_buf()));
    }
    let root = root.canonicalize().map_err(|source| ScanError::FileAccess {
        path: root.to_path_buf(),
        source,
    })?;
    let extension = extension.trim_start_matches('.');

    let mut files = Vec::new();
    for entry in WalkDir::new(&root)
        .follow_links(false)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|err| ScanError::FileAccess {
            path: err.path().map(Path::to_path_buf).unwrap_or_else(|| root.clone()),
            source: err.into(),
        })?;
        if entry.file_type().is_file() && !is_hidden(&entry) && has_extension(&entry, extension) {
            files.push(entry.into_path());
        }
    }

    tracing::debug!("Found {} .{} files under {}", files.len(), extension, root.display());
    Ok(files)
}
