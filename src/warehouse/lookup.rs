//! Exact-match resolution of play events against the song catalog.

use super::models::SongMatch;
use super::schema::SONG_SELECT;
use rusqlite::{params, Connection, OptionalExtension};

/// The (title, artist name, duration) triple a play event carries.
#[derive(Clone, Copy, Debug)]
pub struct SongQuery<'a> {
    pub title: Option<&'a str>,
    pub artist_name: Option<&'a str>,
    pub duration: Option<f64>,
}

/// Looks up the song and artist ids for `query`.
///
/// Matching is exact on all three fields, including float equality on the
/// duration. The first row in the engine's default order wins. No match, or
/// a query with any field missing, resolves to an empty [`SongMatch`].
pub fn lookup_song(conn: &Connection, query: &SongQuery) -> rusqlite::Result<SongMatch> {
    let (Some(title), Some(artist_name), Some(duration)) =
        (query.title, query.artist_name, query.duration)
    else {
        return Ok(SongMatch::default());
    };

    let mut stmt = conn.prepare_cached(SONG_SELECT)?;
    let found = stmt
        .query_row(params![title, artist_name, duration], |row| {
            Ok(SongMatch {
                song_id: row.get(0)?,
                artist_id: row.get(1)?,
            })
        })
        .optional()?;
    Ok(found.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::warehouse::schema::{latest_schema, ARTIST_TABLE_INSERT, SONG_TABLE_INSERT};

    fn create_catalog() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        latest_schema().create(&conn).unwrap();
        conn.execute(
            ARTIST_TABLE_INSERT,
            params!["ARD7TVE1187B99BFB1", "Casual", "California - LA", None::<f64>, None::<f64>],
        )
        .unwrap();
        conn.execute(
            SONG_TABLE_INSERT,
            params!["SOMZWCG12A8C13C480", "I Didn't Mean To", "ARD7TVE1187B99BFB1", 0, 218.93179],
        )
        .unwrap();
        conn
    }

    fn query<'a>(title: &'a str, artist_name: &'a str, duration: f64) -> SongQuery<'a> {
        SongQuery {
            title: Some(title),
            artist_name: Some(artist_name),
            duration: Some(duration),
        }
    }

    #[test]
    fn resolves_exact_match() {
        let conn = create_catalog();
        let found = lookup_song(&conn, &query("I Didn't Mean To", "Casual", 218.93179)).unwrap();
        assert_eq!(found.song_id.as_deref(), Some("SOMZWCG12A8C13C480"));
        assert_eq!(found.artist_id.as_deref(), Some("ARD7TVE1187B99BFB1"));
    }

    #[test]
    fn near_misses_do_not_match() {
        let conn = create_catalog();
        for q in [
            query("i didn't mean to", "Casual", 218.93179),
            query("I Didn't Mean To", "casual", 218.93179),
            query("I Didn't Mean To", "Casual", 218.9318),
        ] {
            assert_eq!(lookup_song(&conn, &q).unwrap(), SongMatch::default());
        }
    }

    #[test]
    fn duplicate_matches_resolve_to_one_row() {
        let conn = create_catalog();
        conn.execute(
            ARTIST_TABLE_INSERT,
            params!["AR00000000000000CA", "Casual", None::<String>, None::<f64>, None::<f64>],
        )
        .unwrap();
        conn.execute(
            SONG_TABLE_INSERT,
            params!["SO0000000000000000", "I Didn't Mean To", "AR00000000000000CA", 1994, 218.93179],
        )
        .unwrap();

        let found = lookup_song(&conn, &query("I Didn't Mean To", "Casual", 218.93179)).unwrap();
        let ids = (found.song_id.as_deref(), found.artist_id.as_deref());
        assert!(
            ids == (Some("SOMZWCG12A8C13C480"), Some("ARD7TVE1187B99BFB1"))
                || ids == (Some("SO0000000000000000"), Some("AR00000000000000CA")),
            "Unexpected match {:?}",
            ids
        );
    }

    #[test]
    fn missing_fields_resolve_to_no_match() {
        let conn = create_catalog();
        let q = SongQuery {
            title: Some("I Didn't Mean To"),
            artist_name: Some("Casual"),
            duration: None,
        };
        assert_eq!(lookup_song(&conn, &q).unwrap(), SongMatch::default());
    }
}
