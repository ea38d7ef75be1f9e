use std::path::PathBuf;
use std::time::Instant;

use chrono::NaiveDate;
use tracing::info;

use crate::chart::render;
use crate::consts::SECONDS_PER_DAY;
use crate::core::{DailyStats, ProjectSpec};
use crate::error::AppError;
use crate::gerrit::{ChangeSource, Credentials, HttpChangeSource, StatsFetcher};
use crate::output::output_daily_json;
use crate::utils::Timezone;

/// Everything one run needs, resolved from flags and config
#[derive(Debug)]
pub(crate) struct RunConfig {
    pub(crate) host: String,
    pub(crate) projects: Vec<ProjectSpec>,
    pub(crate) since: NaiveDate,
    pub(crate) credentials: Option<Credentials>,
    pub(crate) insecure: bool,
    pub(crate) timezone: Timezone,
    pub(crate) output: PathBuf,
    pub(crate) json: bool,
}

pub(crate) fn run(config: RunConfig) -> Result<(), AppError> {
    let source = HttpChangeSource::new(config.credentials.clone(), config.insecure);
    let mut fetcher = StatsFetcher::new(source, &config.host, config.timezone);

    let stats = collect_stats(&mut fetcher, &config.projects, config.since)?;
    let last_day = stats.last_day().ok_or(AppError::NoRecords)?;

    // Render fully before touching the output file
    let mut svg = Vec::new();
    render(&mut svg, &stats, config.since, last_day)?;
    std::fs::write(&config.output, &svg).map_err(|source| AppError::Output {
        path: config.output.clone(),
        source,
    })?;
    info!(
        "Wrote {} ({} ~ {})",
        config.output.display(),
        config.since,
        last_day
    );

    if config.json {
        println!("{}", output_daily_json(&stats, config.since, last_day));
    }
    Ok(())
}

/// Fetch every project, one after another, into one set of day buckets.
pub(crate) fn collect_stats<S: ChangeSource>(
    fetcher: &mut StatsFetcher<S>,
    projects: &[ProjectSpec],
    since: NaiveDate,
) -> Result<DailyStats, AppError> {
    let mut stats = DailyStats::new();

    for project in projects {
        let start = Instant::now();
        let summary = fetcher
            .fetch(project, since, &mut stats)
            .map_err(|source| AppError::Fetch {
                project: project.to_string(),
                source,
            })?;
        info!(
            "{}: {} merged, {} open changes in {} pages ({:.2}s)",
            project,
            summary.merged.changes,
            summary.open.changes,
            summary.merged.pages + summary.open.pages,
            start.elapsed().as_secs_f64()
        );
    }

    info!(
        "{} days, {:.1} open days in total",
        stats.len(),
        stats.total_seconds() as f64 / SECONDS_PER_DAY as f64
    );
    Ok(stats)
}
