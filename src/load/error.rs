use super::walker::ScanError;
use crate::dataset::ParseError;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Why a load run stopped. Every variant aborts the run; files committed
/// before the failing one stay in the warehouse.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error(transparent)]
    Filesystem(#[from] ScanError),

    #[error("Failed to read {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to parse {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ParseError,
    },

    #[error("Failed to load {path} into the warehouse")]
    Store {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },
}

/// Failure while emitting the rows of one file, before the file path is known.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Store(#[from] rusqlite::Error),
}

impl ExtractError {
    pub fn at(self, path: PathBuf) -> LoadError {
        match self {
            ExtractError::Parse(source) => LoadError::Parse { path, source },
            ExtractError::Store(source) => LoadError::Store { path, source },
        }
    }
}
