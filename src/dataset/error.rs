use thiserror::Error;

/// A dataset file whose content does not have the expected shape.
///
/// Line numbers are 1-based.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Invalid JSON record on line {line}: {source}")]
    Json {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("Missing field `{field}` on line {line}")]
    MissingField { line: usize, field: &'static str },

    #[error("Invalid field `{field}` on line {line}: {reason}")]
    InvalidField {
        line: usize,
        field: &'static str,
        reason: String,
    },

    #[error("File contains no record")]
    Empty,
}
