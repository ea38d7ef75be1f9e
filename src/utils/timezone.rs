use chrono::{Local, NaiveDate, NaiveDateTime, TimeZone};
use chrono_tz::Tz;
use std::str::FromStr;

use crate::error::AppError;

/// Wall clock used for day bucketing. Gerrit reports timestamps in UTC.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) enum Timezone {
    #[default]
    Utc,
    Local,
    Named(Tz),
}

impl Timezone {
    pub(crate) fn parse(value: Option<&str>) -> Result<Self, AppError> {
        let Some(raw) = value else {
            return Ok(Timezone::Utc);
        };
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("utc") || trimmed.eq_ignore_ascii_case("z")
        {
            return Ok(Timezone::Utc);
        }
        if trimmed.eq_ignore_ascii_case("local") {
            return Ok(Timezone::Local);
        }
        Tz::from_str(trimmed)
            .map(Timezone::Named)
            .map_err(|_| AppError::InvalidTimezone {
                input: trimmed.to_string(),
            })
    }

    /// Convert a naive UTC timestamp to naive wall-clock time in this zone.
    pub(crate) fn to_wall_clock(self, utc: NaiveDateTime) -> NaiveDateTime {
        let utc = chrono::Utc.from_utc_datetime(&utc);
        match self {
            Timezone::Utc => utc.naive_utc(),
            Timezone::Local => utc.with_timezone(&Local).naive_local(),
            Timezone::Named(tz) => utc.with_timezone(&tz).naive_local(),
        }
    }

    pub(crate) fn now(self) -> NaiveDateTime {
        self.to_wall_clock(chrono::Utc::now().naive_utc())
    }

    pub(crate) fn today(self) -> NaiveDate {
        self.now().date()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utc(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap()
    }

    #[test]
    fn parse_none_returns_utc() {
        assert!(matches!(Timezone::parse(None).unwrap(), Timezone::Utc));
    }

    #[test]
    fn parse_empty_returns_utc() {
        assert!(matches!(Timezone::parse(Some("")).unwrap(), Timezone::Utc));
    }

    #[test]
    fn parse_utc_variants() {
        for raw in ["utc", "UTC", "z", "Z", "  UTC  "] {
            assert!(matches!(Timezone::parse(Some(raw)).unwrap(), Timezone::Utc));
        }
    }

    #[test]
    fn parse_local_string_returns_local() {
        assert!(matches!(
            Timezone::parse(Some("local")).unwrap(),
            Timezone::Local
        ));
        assert!(matches!(
            Timezone::parse(Some("LOCAL")).unwrap(),
            Timezone::Local
        ));
    }

    #[test]
    fn parse_named_timezone() {
        let tz = Timezone::parse(Some("Asia/Seoul")).unwrap();
        assert!(matches!(tz, Timezone::Named(chrono_tz::Asia::Seoul)));
    }

    #[test]
    fn parse_invalid_timezone_returns_error() {
        let err = Timezone::parse(Some("Mars/Olympus")).unwrap_err();
        assert!(err.to_string().contains("Mars/Olympus"));
    }

    #[test]
    fn utc_wall_clock_is_identity() {
        let t = utc("2013-05-10 23:00:00");
        assert_eq!(Timezone::Utc.to_wall_clock(t), t);
    }

    #[test]
    fn named_wall_clock_crosses_midnight() {
        let tz = Timezone::parse(Some("Asia/Seoul")).unwrap();
        // KST is UTC+9 with no DST
        let wall = tz.to_wall_clock(utc("2013-05-10 20:00:00"));
        assert_eq!(wall, utc("2013-05-11 05:00:00"));
    }
}
