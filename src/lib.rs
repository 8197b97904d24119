//! Songplay ETL Library
//!
//! Loads the song and user activity datasets into a SQLite star schema.
//! The binaries are thin wrappers around these modules.

pub mod config;
pub mod dataset;
pub mod load;
pub mod sqlite_persistence;
pub mod warehouse;

// Re-export commonly used types for convenience
pub use config::{AppConfig, CliConfig, FileConfig};
pub use dataset::Dataset;
pub use load::{process_data, run_pipeline, LoadError, LoadReport};
pub use warehouse::{SqliteWarehouse, TableCounts};
