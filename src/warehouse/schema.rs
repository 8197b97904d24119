//! SQLite schema definitions for the songplay warehouse.
//!
//! Five tables: three dimension tables keyed by their natural ids (users,
//! artists, songs), the `time` table with one row per play and no key, and the
//! `songplays` fact table. Every insert except the one into `time` is
//! insert-or-skip on primary key conflict.

use crate::sqlite_column;
use crate::sqlite_persistence::{Column, ForeignKey, SqlType, Table, VersionedSchema};

// =============================================================================
// Dimension Tables
// =============================================================================

const USERS_TABLE: Table = Table {
    name: "users",
    columns: &[
        sqlite_column!("user_id", &SqlType::Integer, is_primary_key = true),
        sqlite_column!("first_name", &SqlType::Text),
        sqlite_column!("last_name", &SqlType::Text),
        sqlite_column!("gender", &SqlType::Text),
        sqlite_column!("level", &SqlType::Text), // 'free' or 'paid'
    ],
};

const ARTISTS_TABLE: Table = Table {
    name: "artists",
    columns: &[
        sqlite_column!(
            "artist_id",
            &SqlType::Text,
            is_primary_key = true,
            non_null = true
        ),
        sqlite_column!("name", &SqlType::Text),
        sqlite_column!("location", &SqlType::Text),
        sqlite_column!("latitude", &SqlType::Real),
        sqlite_column!("longitude", &SqlType::Real),
    ],
};

const ARTIST_FK: ForeignKey = ForeignKey {
    foreign_table: "artists",
    foreign_column: "artist_id",
};

const SONGS_TABLE: Table = Table {
    name: "songs",
    columns: &[
        sqlite_column!(
            "song_id",
            &SqlType::Text,
            is_primary_key = true,
            non_null = true
        ),
        sqlite_column!("title", &SqlType::Text),
        sqlite_column!("artist_id", &SqlType::Text, foreign_key = Some(&ARTIST_FK)),
        sqlite_column!("year", &SqlType::Integer),
        sqlite_column!("duration", &SqlType::Real), // seconds
    ],
};

const TIME_TABLE: Table = Table {
    name: "time",
    columns: &[
        sqlite_column!("start_time", &SqlType::Text), // 'HH:MM:SS.mmm'
        sqlite_column!("hour", &SqlType::Integer),
        sqlite_column!("day", &SqlType::Integer),
        sqlite_column!("week", &SqlType::Integer), // ISO week
        sqlite_column!("month", &SqlType::Integer),
        sqlite_column!("year", &SqlType::Integer),
        sqlite_column!("weekday", &SqlType::Integer), // 0=Monday .. 6=Sunday
    ],
};

// =============================================================================
// Fact Table
// =============================================================================

const USER_FK: ForeignKey = ForeignKey {
    foreign_table: "users",
    foreign_column: "user_id",
};

const SONG_FK: ForeignKey = ForeignKey {
    foreign_table: "songs",
    foreign_column: "song_id",
};

const SONGPLAYS_TABLE: Table = Table {
    name: "songplays",
    columns: &[
        sqlite_column!("songplay_id", &SqlType::Integer, is_primary_key = true),
        sqlite_column!("start_time", &SqlType::Text), // 'YYYY-MM-DD HH:MM:SS.mmm' UTC
        sqlite_column!("user_id", &SqlType::Integer, foreign_key = Some(&USER_FK)),
        sqlite_column!("level", &SqlType::Text),
        sqlite_column!("song_id", &SqlType::Text, foreign_key = Some(&SONG_FK)),
        sqlite_column!("artist_id", &SqlType::Text, foreign_key = Some(&ARTIST_FK)),
        sqlite_column!("session_id", &SqlType::Integer),
        sqlite_column!("location", &SqlType::Text),
        sqlite_column!("user_agent", &SqlType::Text),
    ],
};

// =============================================================================
// Versioned Schema Definition
// =============================================================================

/// Tables are listed in creation order: referenced tables before the tables
/// that reference them.
pub const WAREHOUSE_VERSIONED_SCHEMAS: &[VersionedSchema] = &[VersionedSchema {
    version: 0,
    tables: &[
        USERS_TABLE,
        ARTISTS_TABLE,
        SONGS_TABLE,
        TIME_TABLE,
        SONGPLAYS_TABLE,
    ],
}];

pub fn latest_schema() -> &'static VersionedSchema {
    &WAREHOUSE_VERSIONED_SCHEMAS[WAREHOUSE_VERSIONED_SCHEMAS.len() - 1]
}

// =============================================================================
// Statement Templates
// =============================================================================

pub const ARTIST_TABLE_INSERT: &str = "INSERT INTO artists (artist_id, name, location, latitude, longitude) \
     VALUES (?1, ?2, ?3, ?4, ?5) \
     ON CONFLICT (artist_id) DO NOTHING";

pub const SONG_TABLE_INSERT: &str = "INSERT INTO songs (song_id, title, artist_id, year, duration) \
     VALUES (?1, ?2, ?3, ?4, ?5) \
     ON CONFLICT (song_id) DO NOTHING";

pub const USER_TABLE_INSERT: &str = "INSERT INTO users (user_id, first_name, last_name, gender, level) \
     VALUES (?1, ?2, ?3, ?4, ?5) \
     ON CONFLICT (user_id) DO NOTHING";

pub const TIME_TABLE_INSERT: &str = "INSERT INTO time (start_time, hour, day, week, month, year, weekday) \
     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)";

pub const SONGPLAY_TABLE_INSERT: &str = "INSERT INTO songplays (songplay_id, start_time, user_id, level, song_id, artist_id, session_id, location, user_agent) \
     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9) \
     ON CONFLICT (songplay_id) DO NOTHING";

pub const SONG_SELECT: &str = "SELECT songs.song_id, songs.artist_id \
     FROM songs JOIN artists ON songs.artist_id = artists.artist_id \
     WHERE songs.title = ?1 AND artists.name = ?2 AND songs.duration = ?3";
