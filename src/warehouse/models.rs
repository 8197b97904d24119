//! Rows written to the warehouse tables.

use chrono::{DateTime, Datelike, Timelike, Utc};
use sha2::{Digest, Sha256};

#[derive(Clone, Debug, PartialEq)]
pub struct Artist {
    pub artist_id: String,
    pub name: String,
    pub location: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Song {
    pub song_id: String,
    pub title: String,
    pub artist_id: String,
    pub year: i32,
    pub duration: f64,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct User {
    pub user_id: i64,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub gender: Option<String>,
    pub level: String,
}

/// Calendar breakdown of a play's start time.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TimeBucket {
    pub start_time: String,
    pub hour: u32,
    pub day: u32,
    pub week: u32,
    pub month: u32,
    pub year: i32,
    /// Days since Monday, so Monday is 0 and Sunday is 6.
    pub weekday: u32,
}

impl TimeBucket {
    pub fn from_timestamp(ts: &DateTime<Utc>) -> TimeBucket {
        TimeBucket {
            start_time: ts.format("%H:%M:%S%.3f").to_string(),
            hour: ts.hour(),
            day: ts.day(),
            week: ts.iso_week().week(),
            month: ts.month(),
            year: ts.year(),
            weekday: ts.weekday().num_days_from_monday(),
        }
    }
}

/// Song and artist ids resolved for a play event. Both are `None` when the
/// catalog has no exact match.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SongMatch {
    pub song_id: Option<String>,
    pub artist_id: Option<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SongPlay {
    pub songplay_id: i64,
    pub start_time: String,
    pub user_id: i64,
    pub level: String,
    pub song_id: Option<String>,
    pub artist_id: Option<String>,
    pub session_id: i64,
    pub location: Option<String>,
    pub user_agent: Option<String>,
}

impl SongPlay {
    /// Derives a stable id from the natural key of a play event.
    ///
    /// The same (user, timestamp, session) always maps to the same id, so
    /// reloading a log file hits the primary key conflict and is skipped.
    /// Duplicate events within one file collapse into a single row as well,
    /// while each of them still adds a `time` row.
    pub fn derive_id(user_id: i64, ts_millis: i64, session_id: i64) -> i64 {
        let digest = Sha256::digest(format!("{}:{}:{}", user_id, ts_millis, session_id));
        let mut head = [0u8; 8];
        head.copy_from_slice(&digest[..8]);
        (u64::from_be_bytes(head) & i64::MAX as u64) as i64
    }
}

/// Formats a play timestamp the way it is stored in `songplays.start_time`.
pub fn format_start_time(ts: &DateTime<Utc>) -> String {
    ts.format("%Y-%m-%d %H:%M:%S%.3f").to_string()
}
