//! Turns the contents of one dataset file into warehouse writes.

use super::error::ExtractError;
use crate::dataset::{Dataset, LogBatch, SongRecord};
use crate::warehouse::{TableCounts, WarehouseWriter};
use tracing::debug;

/// Writes the artist and then the song of one song file.
pub fn load_song_file<W: WarehouseWriter + ?Sized>(
    writer: &W,
    contents: &str,
) -> Result<TableCounts, ExtractError> {
    let record = SongRecord::parse(contents)?;
    let mut rows = TableCounts::default();
    rows.artists += writer.insert_artist(&record.artist())?;
    rows.songs += writer.insert_song(&record.song())?;
    Ok(rows)
}

/// Writes the plays of one log file: every time row first, then every user,
/// then every songplay. Users must exist before the songplays referencing them.
pub fn load_log_file<W: WarehouseWriter + ?Sized>(
    writer: &W,
    contents: &str,
) -> Result<TableCounts, ExtractError> {
    let batch = LogBatch::parse(contents)?;
    debug!(
        "{} play events, {} other events skipped",
        batch.plays.len(),
        batch.skipped
    );

    let mut rows = TableCounts::default();
    for play in &batch.plays {
        rows.time += writer.insert_time(&play.time_bucket())?;
    }
    for play in &batch.plays {
        rows.users += writer.insert_user(&play.user())?;
    }
    for play in &batch.plays {
        let song_match = writer.find_song(&play.song_query())?;
        rows.songplays += writer.insert_songplay(&play.songplay(song_match))?;
    }
    Ok(rows)
}

pub fn load_file<W: WarehouseWriter + ?Sized>(
    dataset: Dataset,
    writer: &W,
    contents: &str,
) -> Result<TableCounts, ExtractError> {
    match dataset {
        Dataset::Song => load_song_file(writer, contents),
        Dataset::Log => load_log_file(writer, contents),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::ParseError;
    use crate::warehouse::{Artist, Song, SongMatch, SongPlay, SongQuery, TimeBucket, User};
    use std::cell::RefCell;

    /// Records every call in order and answers lookups for one known song.
    #[derive(Default)]
    struct RecordingWriter {
        calls: RefCell<Vec<String>>,
        songplays: RefCell<Vec<SongPlay>>,
    }

    impl RecordingWriter {
        fn calls(&self) -> Vec<String> {
            self.calls.borrow().clone()
        }
    }

    impl WarehouseWriter for RecordingWriter {
        fn insert_artist(&self, artist: &Artist) -> rusqlite::Result<usize> {
            self.calls.borrow_mut().push(format!("artist {}", artist.artist_id));
            Ok(1)
        }

        fn insert_song(&self, song: &Song) -> rusqlite::Result<usize> {
            self.calls.borrow_mut().push(format!("song {}", song.song_id));
            Ok(1)
        }

        fn insert_user(&self, user: &User) -> rusqlite::Result<usize> {
            self.calls.borrow_mut().push(format!("user {}", user.user_id));
            Ok(1)
        }

        fn insert_time(&self, bucket: &TimeBucket) -> rusqlite::Result<usize> {
            self.calls.borrow_mut().push(format!("time {}", bucket.start_time));
            Ok(1)
        }

        fn insert_songplay(&self, songplay: &SongPlay) -> rusqlite::Result<usize> {
            self.calls
                .borrow_mut()
                .push(format!("songplay {}", songplay.user_id));
            self.songplays.borrow_mut().push(songplay.clone());
            Ok(1)
        }

        fn find_song(&self, query: &SongQuery) -> rusqlite::Result<SongMatch> {
            self.calls.borrow_mut().push("find".to_string());
            if query.title == Some("Setanta matins") {
                Ok(SongMatch {
                    song_id: Some("SOZCTXZ12AB0182364".to_string()),
                    artist_id: Some("AR5KOSW1187FB35FF4".to_string()),
                })
            } else {
                Ok(SongMatch::default())
            }
        }
    }

    const SONG_FILE: &str = r#"{"num_songs": 1, "artist_id": "AR5KOSW1187FB35FF4", "artist_latitude": 49.80388, "artist_longitude": 15.47491, "artist_location": "Dubai UAE", "artist_name": "Elena", "song_id": "SOZCTXZ12AB0182364", "title": "Setanta matins", "duration": 269.58322, "year": 0}"#;

    fn event(page: &str, user_id: &str, ts: i64, song: &str) -> String {
        format!(
            r#"{{"artist":"Elena","auth":"Logged In","firstName":"Lily","gender":"F","lastName":"Koch","length":269.58322,"level":"paid","location":"Chicago-Naperville-Elgin, IL-IN-WI","page":"{}","sessionId":818,"song":"{}","ts":{},"userAgent":"Mozilla","userId":"{}"}}"#,
            page, song, ts, user_id
        )
    }

    #[test]
    fn song_file_writes_artist_before_song() {
        let writer = RecordingWriter::default();
        let rows = load_file(Dataset::Song, &writer, SONG_FILE).unwrap();
        assert_eq!(
            writer.calls(),
            ["artist AR5KOSW1187FB35FF4", "song SOZCTXZ12AB0182364"]
        );
        assert_eq!(rows.artists, 1);
        assert_eq!(rows.songs, 1);
        assert_eq!(rows.songplays, 0);
    }

    #[test]
    fn log_file_writes_time_then_users_then_songplays() {
        let contents = [
            event("NextSong", "15", 1542837407796, "Setanta matins"),
            event("Home", "15", 1542837408796, ""),
            event("NextSong", "15", 1542837409796, "Unknown Song"),
            event("NextSong", "29", 1542837410796, "Setanta matins"),
        ]
        .join("\n");

        let writer = RecordingWriter::default();
        let rows = load_file(Dataset::Log, &writer, &contents).unwrap();
        assert_eq!(
            writer.calls(),
            [
                "time 21:56:47.796",
                "time 21:56:49.796",
                "time 21:56:50.796",
                "user 15",
                "user 15",
                "user 29",
                "find",
                "songplay 15",
                "find",
                "songplay 15",
                "find",
                "songplay 29",
            ]
        );
        assert_eq!(rows.time, 3);
        assert_eq!(rows.songplays, 3);

        let songplays = writer.songplays.borrow();
        assert_eq!(songplays[0].song_id.as_deref(), Some("SOZCTXZ12AB0182364"));
        assert_eq!(songplays[1].song_id, None);
        assert_eq!(songplays[1].artist_id, None);
        assert_eq!(songplays[2].artist_id.as_deref(), Some("AR5KOSW1187FB35FF4"));
    }

    #[test]
    fn log_file_without_plays_writes_nothing() {
        let contents = event("Home", "", 1542837408796, "");
        let writer = RecordingWriter::default();
        assert_eq!(
            load_log_file(&writer, &contents).unwrap(),
            TableCounts::default()
        );
        assert!(writer.calls().is_empty());
    }

    #[test]
    fn parse_error_happens_before_any_write() {
        let contents = format!(
            "{}\nnot json",
            event("NextSong", "15", 1542837407796, "Setanta matins")
        );
        let writer = RecordingWriter::default();
        let err = load_log_file(&writer, &contents).unwrap_err();
        assert!(matches!(
            err,
            ExtractError::Parse(ParseError::Json { line: 2, .. })
        ));
        assert!(writer.calls().is_empty());
    }
}
