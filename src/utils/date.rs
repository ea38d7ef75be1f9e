use chrono::{NaiveDate, NaiveDateTime, Timelike};

use crate::consts::{DATE_FORMAT, SECONDS_PER_DAY, TIMESTAMP_FORMAT};
use crate::error::{AppError, FetchError};

pub(crate) fn parse_date(s: &str) -> Result<NaiveDate, AppError> {
    let s = s.trim();
    // Try YYYYMMDD
    if s.len() == 8
        && let Ok(d) = NaiveDate::parse_from_str(s, "%Y%m%d")
    {
        return Ok(d);
    }
    // Try YYYY-MM-DD
    NaiveDate::parse_from_str(s, DATE_FORMAT).map_err(|_| AppError::InvalidDate {
        input: s.to_string(),
    })
}

/// Parse a Gerrit timestamp such as "2013-05-10 23:00:00.000000000".
///
/// The fractional seconds are dropped, not rounded.
pub(crate) fn parse_timestamp(s: &str) -> Result<NaiveDateTime, FetchError> {
    let whole = s.split_once('.').map_or(s, |(whole, _)| whole);
    NaiveDateTime::parse_from_str(whole.trim(), TIMESTAMP_FORMAT).map_err(|_| {
        FetchError::InvalidTimestamp {
            input: s.to_string(),
        }
    })
}

pub(crate) fn seconds_since_midnight(t: NaiveDateTime) -> i64 {
    i64::from(t.num_seconds_from_midnight())
}

pub(crate) fn seconds_until_midnight(t: NaiveDateTime) -> i64 {
    SECONDS_PER_DAY - seconds_since_midnight(t)
}
