/// Date format for `--since` and chart comments: "2013-05-10"
pub(crate) const DATE_FORMAT: &str = "%Y-%m-%d";

/// Gerrit timestamp format without the fractional part: "2013-05-10 23:00:00"
pub(crate) const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub(crate) const SECONDS_PER_DAY: i64 = 86_400;

/// Changes requested per page (`n=` query parameter)
pub(crate) const PAGE_SIZE: usize = 500;

/// Default window length when `--since` is not given
pub(crate) const DEFAULT_LOOKBACK_DAYS: i64 = 366;
