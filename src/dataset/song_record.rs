use super::error::ParseError;
use crate::warehouse::{Artist, Song};
use serde::Deserialize;

/// One record of the song dataset: a song together with its performing artist.
#[derive(Clone, Deserialize, Debug, PartialEq)]
pub struct SongRecord {
    pub artist_id: String,
    pub artist_name: String,
    pub artist_location: Option<String>,
    pub artist_latitude: Option<f64>,
    pub artist_longitude: Option<f64>,
    pub song_id: String,
    pub title: String,
    pub year: i32,
    pub duration: f64,
}

impl SongRecord {
    /// Parses the contents of a song file. Only the first JSON record of the
    /// file is used; anything after it is ignored.
    pub fn parse(contents: &str) -> Result<SongRecord, ParseError> {
        match serde_json::Deserializer::from_str(contents)
            .into_iter::<SongRecord>()
            .next()
        {
            Some(Ok(record)) => Ok(record),
            Some(Err(source)) => Err(ParseError::Json {
                line: source.line(),
                source,
            }),
            None => Err(ParseError::Empty),
        }
    }

    pub fn artist(&self) -> Artist {
        Artist {
            artist_id: self.artist_id.clone(),
            name: self.artist_name.clone(),
            location: self.artist_location.clone(),
            latitude: self.artist_latitude,
            longitude: self.artist_longitude,
        }
    }

    pub fn song(&self) -> Song {
        Song {
            song_id: self.song_id.clone(),
            title: self.title.clone(),
            artist_id: self.artist_id.clone(),
            year: self.year,
            duration: self.duration,
        }
    }
}
