//! Loading of dataset directory trees into the warehouse.

mod driver;
mod error;
mod extract;
mod walker;

pub use driver::{pipeline_roots, process_data, run_pipeline, LoadReport};
pub use error::{ExtractError, LoadError};
pub use extract::{load_file, load_log_file, load_song_file};
pub use walker::{find_files, ScanError, DATA_FILE_EXTENSION};
