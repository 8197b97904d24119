//! SQLite-backed warehouse.
//!
//! `SqliteWarehouse` owns the single connection used for a whole run. Each
//! input file is loaded inside its own `WarehouseTransaction`, which rolls
//! back when dropped without `commit`.

use super::lookup::{lookup_song, SongQuery};
use super::models::{Artist, Song, SongMatch, SongPlay, TimeBucket, User};
use super::schema::{
    latest_schema, ARTIST_TABLE_INSERT, SONGPLAY_TABLE_INSERT, SONG_TABLE_INSERT,
    TIME_TABLE_INSERT, USER_TABLE_INSERT,
};
use super::trait_def::WarehouseWriter;
use anyhow::{Context, Result};
use rusqlite::{params, Connection, Transaction};
use std::ops::AddAssign;
use std::path::Path;
use tracing::{debug, info};

/// Row counts of every warehouse table.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TableCounts {
    pub artists: usize,
    pub songs: usize,
    pub users: usize,
    pub time: usize,
    pub songplays: usize,
}

impl AddAssign for TableCounts {
    fn add_assign(&mut self, other: TableCounts) {
        self.artists += other.artists;
        self.songs += other.songs;
        self.users += other.users;
        self.time += other.time;
        self.songplays += other.songplays;
    }
}

pub struct SqliteWarehouse {
    conn: Connection,
}

impl SqliteWarehouse {
    /// Opens (or creates) the database file without touching the schema.
    pub fn connect<P: AsRef<Path>>(db_path: P) -> Result<Self> {
        let db_path = db_path.as_ref();
        let conn = Connection::open_with_flags(
            db_path,
            rusqlite::OpenFlags::SQLITE_OPEN_READ_WRITE
                | rusqlite::OpenFlags::SQLITE_OPEN_CREATE
                | rusqlite::OpenFlags::SQLITE_OPEN_URI
                | rusqlite::OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .with_context(|| format!("Failed to open warehouse database {}", db_path.display()))?;

        // Foreign keys are enforced per connection, not per database.
        conn.pragma_update(None, "foreign_keys", "ON")?;
        debug!("Connected to warehouse database {}", db_path.display());
        Ok(SqliteWarehouse { conn })
    }

    /// Opens an existing warehouse and checks that its schema is the expected one.
    pub fn open<P: AsRef<Path>>(db_path: P) -> Result<Self> {
        let db_path = db_path.as_ref();
        let warehouse = Self::connect(db_path)?;
        warehouse.validate_schema().with_context(|| {
            format!(
                "Warehouse {} has no valid schema, run create-tables first",
                db_path.display()
            )
        })?;

        let counts = warehouse.get_counts()?;
        info!(
            "Opened warehouse: {} artists, {} songs, {} users, {} time rows, {} songplays",
            counts.artists, counts.songs, counts.users, counts.time, counts.songplays
        );
        Ok(warehouse)
    }

    pub fn create_tables(&self) -> Result<()> {
        latest_schema().create(&self.conn)
    }

    pub fn drop_tables(&self) -> Result<()> {
        latest_schema().drop(&self.conn)
    }

    pub fn validate_schema(&self) -> Result<()> {
        latest_schema().validate(&self.conn)
    }

    /// Starts the unit of work for one input file.
    pub fn transaction(&mut self) -> rusqlite::Result<WarehouseTransaction<'_>> {
        Ok(WarehouseTransaction {
            tx: self.conn.transaction()?,
        })
    }

    pub fn get_counts(&self) -> Result<TableCounts> {
        let count = |table: &str| -> Result<usize> {
            let n: i64 = self
                .conn
                .query_row(&format!("SELECT COUNT(*) FROM {}", table), [], |r| {
                    r.get(0)
                })
                .with_context(|| format!("Failed to count rows of {}", table))?;
            Ok(n as usize)
        };
        Ok(TableCounts {
            artists: count("artists")?,
            songs: count("songs")?,
            users: count("users")?,
            time: count("time")?,
            songplays: count("songplays")?,
        })
    }
}

pub struct WarehouseTransaction<'conn> {
    tx: Transaction<'conn>,
}

impl WarehouseTransaction<'_> {
    pub fn commit(self) -> rusqlite::Result<()> {
        self.tx.commit()
    }
}

impl WarehouseWriter for WarehouseTransaction<'_> {
    fn insert_artist(&self, artist: &Artist) -> rusqlite::Result<usize> {
        self.tx.prepare_cached(ARTIST_TABLE_INSERT)?.execute(params![
            &artist.artist_id,
            &artist.name,
            &artist.location,
            artist.latitude,
            artist.longitude
        ])
    }

    fn insert_song(&self, song: &Song) -> rusqlite::Result<usize> {
        self.tx.prepare_cached(SONG_TABLE_INSERT)?.execute(params![
            &song.song_id,
            &song.title,
            &song.artist_id,
            song.year,
            song.duration
        ])
    }

    fn insert_user(&self, user: &User) -> rusqlite::Result<usize> {
        self.tx.prepare_cached(USER_TABLE_INSERT)?.execute(params![
            user.user_id,
            &user.first_name,
            &user.last_name,
            &user.gender,
            &user.level
        ])
    }

    fn insert_time(&self, bucket: &TimeBucket) -> rusqlite::Result<usize> {
        self.tx.prepare_cached(TIME_TABLE_INSERT)?.execute(params![
            &bucket.start_time,
            bucket.hour,
            bucket.day,
            bucket.week,
            bucket.month,
            bucket.year,
            bucket.weekday
        ])
    }

    fn insert_songplay(&self, songplay: &SongPlay) -> rusqlite::Result<usize> {
        self.tx.prepare_cached(SONGPLAY_TABLE_INSERT)?.execute(params![
            songplay.songplay_id,
            &songplay.start_time,
            songplay.user_id,
            &songplay.level,
            &songplay.song_id,
            &songplay.artist_id,
            songplay.session_id,
            &songplay.location,
            &songplay.user_agent
        ])
    }

    fn find_song(&self, query: &SongQuery) -> rusqlite::Result<SongMatch> {
        lookup_song(&self.tx, query)
    }
}
