//! SVG bar chart of open-seconds per day

use std::io::Write;

use chrono::{Datelike, NaiveDate};

use crate::consts::{DATE_FORMAT, SECONDS_PER_DAY};
use crate::core::DailyStats;
use crate::error::ChartError;

use super::axis::select_axis;
use super::color::color_for;

const PLOT_HEIGHT: i64 = 120;
const BAR_WIDTH: i64 = 3;
const MARGIN: i64 = 10;
/// Room on the left for tick labels
const LABEL_WIDTH: i64 = 20;
/// Room below the plot for month labels
const FOOTER_HEIGHT: i64 = 12;
/// Month labels closer than this to the last day are dropped
const MONTH_LABEL_MIN_DAYS: i64 = 5;

/// Write a complete SVG document for the days `first..=last`.
///
/// Days without a bucket in `stats` are drawn as empty bars.
pub(crate) fn render<W: Write>(
    out: &mut W,
    stats: &DailyStats,
    first: NaiveDate,
    last: NaiveDate,
) -> Result<(), ChartError> {
    if first > last {
        return Err(ChartError::EmptyRange { first, last });
    }

    let max_days = stats.max_seconds() as f64 / SECONDS_PER_DAY as f64;
    let axis = select_axis(max_days)?;
    let ceiling = f64::from(axis.ceiling);

    let days = (last - first).num_days() + 1;
    let width = LABEL_WIDTH + MARGIN * 2 + BAR_WIDTH * days - 1;
    let height = MARGIN + FOOTER_HEIGHT + PLOT_HEIGHT;

    writeln!(out, r#"<?xml version="1.0" standalone="no"?>"#)?;
    writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}">"#
    )?;
    writeln!(
        out,
        "<!-- {} ~ {} -->",
        first.format(DATE_FORMAT),
        last.format(DATE_FORMAT)
    )?;
    writeln!(out, "<!-- max: {max_days}, {} -->", axis.ceiling)?;

    // Gridlines from the top down, then the baseline
    let step = PLOT_HEIGHT / i64::from(axis.divisions);
    for i in 0..axis.divisions {
        let y = MARGIN + step * i64::from(i);
        write_gridline(out, y, axis.tick_value(i), width)?;
    }
    write_gridline(out, MARGIN + PLOT_HEIGHT, 0, width)?;

    writeln!(
        out,
        r#"<g transform="translate({}, {})">"#,
        LABEL_WIDTH + MARGIN,
        MARGIN
    )?;
    for (index, day) in (0..days).zip(first.iter_days()) {
        let x = index * BAR_WIDTH;
        let value = stats.get(day) as f64 / SECONDS_PER_DAY as f64;
        let ratio = value / ceiling;
        let bar_height = ratio * PLOT_HEIGHT as f64;
        let y = PLOT_HEIGHT as f64 - bar_height;
        writeln!(
            out,
            r#" <rect width="{}" height="{bar_height:.2}" x="{x}" y="{y:.2}" style="fill: {};"><title>{value}</title></rect>"#,
            BAR_WIDTH - 1,
            color_for(ratio),
        )?;

        if day.day() == 1 && (last - day).num_days() > MONTH_LABEL_MIN_DAYS {
            writeln!(
                out,
                r#"<text dx="{x}" dy="{}" style="font-size: 8px; fill: #333">{}/{}</text>"#,
                PLOT_HEIGHT + 10,
                day.year(),
                day.month()
            )?;
        }
    }
    writeln!(out, "</g></svg>")?;
    Ok(())
}

fn write_gridline<W: Write>(out: &mut W, y: i64, label: u32, width: i64) -> Result<(), ChartError> {
    writeln!(
        out,
        r#"<text dx="10" dy="{}" style="font-size: 9px; fill: #333">{label}</text>"#,
        y + 3
    )?;
    writeln!(
        out,
        r#"<line x1="{}" y1="{y}" x2="{}" y2="{y}" style="stroke-width: 1; stroke: black; stroke-opacity: 0.2;"/>"#,
        MARGIN + LABEL_WIDTH,
        width - MARGIN
    )?;
    Ok(())
}
