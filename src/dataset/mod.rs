//! Input records of the two datasets and their conversion to warehouse rows.

mod error;
mod log_event;
mod song_record;

use clap::ValueEnum;
use std::fmt;

pub use error::ParseError;
pub use log_event::{LogBatch, LogEvent, PlayEvent, RawUserId, NEXT_SONG_PAGE};
pub use song_record::SongRecord;

/// Which dataset a directory tree holds, and therefore how its files are read.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Dataset {
    /// One song with its artist per file.
    Song,
    /// Newline-delimited user activity events.
    Log,
}

impl fmt::Display for Dataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dataset::Song => write!(f, "song"),
            Dataset::Log => write!(f, "log"),
        }
    }
}
