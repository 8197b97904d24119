//! Sample dataset files.

pub const SONG_FILE_1_PATH: &str = "A/A/A/TRAAAAK128F9318786.json";
pub const SONG_FILE_1: &str = r#"{"num_songs": 1, "artist_id": "ARJNIUY12298900C91", "artist_latitude": null, "artist_longitude": null, "artist_location": "", "artist_name": "Adelitas Way", "song_id": "SOBLFFE12AF72AA5BA", "title": "Scream", "duration": 213.9424, "year": 2009}"#;

pub const SONG_FILE_2_PATH: &str = "A/B/C/TRABCEI128F424C983.json";
pub const SONG_FILE_2: &str = r#"{"num_songs": 1, "artist_id": "AR5KOSW1187FB35FF4", "artist_latitude": 49.80388, "artist_longitude": 15.47491, "artist_location": "Dubai UAE", "artist_name": "Elena", "song_id": "SOZCTXZ12AB0182364", "title": "Setanta matins", "duration": 269.58322, "year": 0}"#;

pub const LOG_FILE_PATH: &str = "2018/11/2018-11-21-events.json";

pub const MATCHED_SONG_ID: &str = "SOZCTXZ12AB0182364";
pub const MATCHED_ARTIST_ID: &str = "AR5KOSW1187FB35FF4";

pub fn log_event(page: &str, user_id: &str, ts: i64, song: &str, artist: &str, length: f64) -> String {
    format!(
        r#"{{"artist":"{}","auth":"Logged In","firstName":"Lily","gender":"F","itemInSession":1,"lastName":"Koch","length":{},"level":"paid","location":"Chicago-Naperville-Elgin, IL-IN-WI","method":"PUT","page":"{}","registration":1541048010796.0,"sessionId":818,"song":"{}","status":200,"ts":{},"userAgent":"Mozilla\/5.0 (X11; Linux x86_64)","userId":"{}"}}"#,
        artist, length, page, song, ts, user_id
    )
}

pub fn home_event(ts: i64) -> String {
    format!(
        r#"{{"artist":null,"auth":"Logged Out","firstName":null,"gender":null,"itemInSession":0,"lastName":null,"length":null,"level":"free","location":null,"method":"GET","page":"Home","registration":null,"sessionId":112,"song":null,"status":200,"ts":{},"userAgent":null,"userId":""}}"#,
        ts
    )
}

/// Three plays and one logged-out page view. Only the first play matches a
/// song of the sample song dataset.
pub fn sample_log_file() -> String {
    [
        log_event("NextSong", "15", 1542837407796, "Setanta matins", "Elena", 269.58322),
        home_event(1542837408796),
        log_event("NextSong", "15", 1542837676796, "Scream", "Adelitas Way", 213.94),
        log_event("NextSong", "29", 1542838000796, "Unknown Song", "Nobody", 180.0),
    ]
    .join("\n")
}
