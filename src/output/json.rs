use chrono::NaiveDate;

use crate::consts::{DATE_FORMAT, SECONDS_PER_DAY};
use crate::core::DailyStats;

/// Daily series for `first..=last` as pretty JSON, zero-filled like the chart.
pub(crate) fn output_daily_json(stats: &DailyStats, first: NaiveDate, last: NaiveDate) -> String {
    let output: Vec<serde_json::Value> = first
        .iter_days()
        .take_while(|day| *day <= last)
        .map(|day| {
            let seconds = stats.get(day);
            let days = seconds as f64 / SECONDS_PER_DAY as f64;
            serde_json::json!({
                "date": day.format(DATE_FORMAT).to_string(),
                "seconds": seconds,
                "days": days,
            })
        })
        .collect();
    serde_json::to_string_pretty(&output).unwrap_or_else(|_| "[]".to_string())
}
