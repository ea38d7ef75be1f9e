use std::path::PathBuf;

use chrono::NaiveDate;
use thiserror::Error;

#[derive(Debug, Error)]
pub(crate) enum AppError {
    #[error("Invalid date \"{input}\" (expected YYYYMMDD or YYYY-MM-DD)")]
    InvalidDate { input: String },

    #[error("Invalid timezone: {input}")]
    InvalidTimezone { input: String },

    #[error("Invalid project \"{input}\" (expected project or project@branch)")]
    InvalidProject { input: String },

    #[error("Invalid credentials (expected user:password)")]
    InvalidAuth,

    #[error("Missing {name}")]
    MissingArgument { name: &'static str },

    #[error("No changes found for any project")]
    NoRecords,

    #[error("Failed to fetch {project}: {source}")]
    Fetch {
        project: String,
        #[source]
        source: FetchError,
    },

    #[error("{0}")]
    Chart(#[from] ChartError),

    #[error("Failed to write {}: {source}", .path.display())]
    Output {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Error)]
pub(crate) enum FetchError {
    #[error("Request failed: {0}")]
    Transport(#[from] ureq::Error),

    #[error("Unexpected HTTP status {status} from {url}")]
    Status { url: String, status: u16 },

    #[error("Malformed response: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid timestamp \"{input}\"")]
    InvalidTimestamp { input: String },

    #[error("Server requested authentication without a digest challenge")]
    MissingChallenge,

    #[error("Digest authentication failed: {0}")]
    Digest(String),
}

#[derive(Debug, Error)]
pub(crate) enum ChartError {
    #[error("Value {value} is out of the axis range (max 6000 days)")]
    AxisOutOfRange { value: f64 },

    #[error("Empty date range: {first} is after {last}")]
    EmptyRange { first: NaiveDate, last: NaiveDate },

    #[error("Failed to write chart: {0}")]
    Io(#[from] std::io::Error),
}
