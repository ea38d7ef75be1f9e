//! Day-bucketed duration aggregation
//!
//! Spreads the open span of one change across the calendar days it touches.

use chrono::NaiveDateTime;
use tracing::debug;

use crate::consts::SECONDS_PER_DAY;
use crate::core::types::DailyStats;
use crate::utils::{seconds_since_midnight, seconds_until_midnight};

/// Add the span `begin..end` to `stats` and return the seconds attributed.
///
/// The first day gets the seconds left until its midnight, every whole day in
/// between gets a full day and the last day gets the seconds elapsed since its
/// midnight. A span ending before it begins contributes nothing.
pub(crate) fn add_span(stats: &mut DailyStats, begin: NaiveDateTime, end: NaiveDateTime) -> i64 {
    if end < begin {
        debug!(%begin, %end, "skipping change that ends before it begins");
        return 0;
    }

    let first = begin.date();
    let last = end.date();
    if first == last {
        let delta = (end - begin).num_seconds();
        stats.add(first, delta);
        return delta;
    }

    let head = seconds_until_midnight(begin);
    stats.add(first, head);
    let mut total = head;

    for day in first.iter_days().skip(1).take_while(|day| *day < last) {
        stats.add(day, SECONDS_PER_DAY);
        total += SECONDS_PER_DAY;
    }

    let tail = seconds_since_midnight(end);
    stats.add(last, tail);
    total + tail
}
