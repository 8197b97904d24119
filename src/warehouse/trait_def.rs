//! WarehouseWriter trait definition.
//!
//! Extractors write through this trait, so they neither know nor care whether
//! rows land in a SQLite transaction or somewhere else.

use super::lookup::SongQuery;
use super::models::{Artist, Song, SongMatch, SongPlay, TimeBucket, User};

/// Row sink for one unit of work (one input file).
///
/// Insert methods return the number of rows actually written, which is 0 when
/// an insert-or-skip statement hits an existing primary key.
pub trait WarehouseWriter {
    fn insert_artist(&self, artist: &Artist) -> rusqlite::Result<usize>;

    fn insert_song(&self, song: &Song) -> rusqlite::Result<usize>;

    fn insert_user(&self, user: &User) -> rusqlite::Result<usize>;

    /// Always inserts; the `time` table has no key to conflict on.
    fn insert_time(&self, bucket: &TimeBucket) -> rusqlite::Result<usize>;

    fn insert_songplay(&self, songplay: &SongPlay) -> rusqlite::Result<usize>;

    /// Resolves a play event's song against the catalog. Not finding one is
    /// a normal outcome, reported as an empty [`SongMatch`].
    fn find_song(&self, query: &SongQuery) -> rusqlite::Result<SongMatch>;
}
