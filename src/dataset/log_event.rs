use super::error::ParseError;
use crate::warehouse::{
    format_start_time, SongMatch, SongPlay, SongQuery, TimeBucket, User,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Page value marking a song play; every other page is a non-play event.
pub const NEXT_SONG_PAGE: &str = "NextSong";

/// `userId` is a numeric string in the activity logs, but accept plain numbers too.
#[derive(Clone, Deserialize, Debug, PartialEq)]
#[serde(untagged)]
pub enum RawUserId {
    Number(i64),
    Text(String),
}

/// One line of the log dataset, as loosely typed as the logs themselves.
///
/// Logged-out page views carry empty or null user fields, so nothing is
/// required at this stage; play events are checked by [`PlayEvent::from_event`].
#[derive(Clone, Deserialize, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LogEvent {
    pub page: Option<String>,
    pub ts: Option<i64>,
    pub user_id: Option<RawUserId>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub gender: Option<String>,
    pub level: Option<String>,
    pub song: Option<String>,
    pub artist: Option<String>,
    pub length: Option<f64>,
    pub session_id: Option<i64>,
    pub location: Option<String>,
    pub user_agent: Option<String>,
}

impl LogEvent {
    pub fn is_play(&self) -> bool {
        self.page.as_deref() == Some(NEXT_SONG_PAGE)
    }
}

/// A `NextSong` event with every field a songplay row needs.
#[derive(Clone, Debug, PartialEq)]
pub struct PlayEvent {
    pub ts_millis: i64,
    pub timestamp: DateTime<Utc>,
    pub user_id: i64,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub gender: Option<String>,
    pub level: String,
    pub song: Option<String>,
    pub artist: Option<String>,
    pub length: Option<f64>,
    pub session_id: i64,
    pub location: Option<String>,
    pub user_agent: Option<String>,
}

fn parse_user_id(raw: Option<RawUserId>, line: usize) -> Result<i64, ParseError> {
    match raw {
        Some(RawUserId::Number(id)) => Ok(id),
        Some(RawUserId::Text(text)) if text.trim().is_empty() => Err(ParseError::MissingField {
            line,
            field: "userId",
        }),
        Some(RawUserId::Text(text)) => {
            text.trim()
                .parse()
                .map_err(|_| ParseError::InvalidField {
                    line,
                    field: "userId",
                    reason: format!("{:?} is not an integer", text),
                })
        }
        None => Err(ParseError::MissingField {
            line,
            field: "userId",
        }),
    }
}

impl PlayEvent {
    pub fn from_event(event: LogEvent, line: usize) -> Result<PlayEvent, ParseError> {
        let ts_millis = event.ts.ok_or(ParseError::MissingField { line, field: "ts" })?;
        let timestamp = DateTime::<Utc>::from_timestamp_millis(ts_millis).ok_or_else(|| {
            ParseError::InvalidField {
                line,
                field: "ts",
                reason: format!("{} is out of range", ts_millis),
            }
        })?;
        let user_id = parse_user_id(event.user_id, line)?;
        let level = event.level.ok_or(ParseError::MissingField {
            line,
            field: "level",
        })?;
        let session_id = event.session_id.ok_or(ParseError::MissingField {
            line,
            field: "sessionId",
        })?;

        Ok(PlayEvent {
            ts_millis,
            timestamp,
            user_id,
            first_name: event.first_name,
            last_name: event.last_name,
            gender: event.gender,
            level,
            song: event.song,
            artist: event.artist,
            length: event.length,
            session_id,
            location: event.location,
            user_agent: event.user_agent,
        })
    }

    pub fn time_bucket(&self) -> TimeBucket {
        TimeBucket::from_timestamp(&self.timestamp)
    }

    pub fn user(&self) -> User {
        User {
            user_id: self.user_id,
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            gender: self.gender.clone(),
            level: self.level.clone(),
        }
    }

    pub fn song_query(&self) -> SongQuery<'_> {
        SongQuery {
            title: self.song.as_deref(),
            artist_name: self.artist.as_deref(),
            duration: self.length,
        }
    }

    pub fn songplay(&self, song_match: SongMatch) -> SongPlay {
        SongPlay {
            songplay_id: SongPlay::derive_id(self.user_id, self.ts_millis, self.session_id),
            start_time: format_start_time(&self.timestamp),
            user_id: self.user_id,
            level: self.level.clone(),
            song_id: song_match.song_id,
            artist_id: song_match.artist_id,
            session_id: self.session_id,
            location: self.location.clone(),
            user_agent: self.user_agent.clone(),
        }
    }
}

/// Play events of one log file, in file order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LogBatch {
    pub plays: Vec<PlayEvent>,
    /// Records discarded because they are not `NextSong` events.
    pub skipped: usize,
}

impl LogBatch {
    /// Parses newline-delimited log events, keeping only song plays.
    pub fn parse(contents: &str) -> Result<LogBatch, ParseError> {
        let mut batch = LogBatch::default();
        for (index, text) in contents.lines().enumerate() {
            if text.trim().is_empty() {
                continue;
            }
            let line = index + 1;
            let event: LogEvent = serde_json::from_str(text)
                .map_err(|source| ParseError::Json { line, source })?;
            if !event.is_play() {
                batch.skipped += 1;
                continue;
            }
            batch.plays.push(PlayEvent::from_event(event, line)?);
        }
        Ok(batch)
    }
}
