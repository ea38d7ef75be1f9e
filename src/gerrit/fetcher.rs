//! Paginated retrieval of merged and open changes for one project

use chrono::{NaiveDate, NaiveDateTime};
use tracing::{debug, warn};

use crate::consts::PAGE_SIZE;
use crate::core::{DailyStats, ProjectSpec, add_span};
use crate::error::FetchError;
use crate::utils::{Timezone, parse_timestamp};

use super::client::ChangeSource;
use super::query::{changes_url, normalize_host, strip_xssi_guard};
use super::types::{ChangeInfo, ChangeStatus};

/// Where the open span of a change ends
#[derive(Debug, Clone, Copy)]
enum SpanEnd {
    /// The change's `updated` timestamp (merged changes)
    Updated,
    /// A fixed instant shared by the whole pass (open changes)
    At(NaiveDateTime),
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub(crate) struct PassSummary {
    pub(crate) changes: usize,
    pub(crate) pages: usize,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FetchSummary {
    pub(crate) merged: PassSummary,
    pub(crate) open: PassSummary,
}

pub(crate) struct StatsFetcher<S: ChangeSource> {
    source: S,
    host: String,
    timezone: Timezone,
}

impl<S: ChangeSource> StatsFetcher<S> {
    pub(crate) fn new(source: S, host: &str, timezone: Timezone) -> Self {
        Self {
            source,
            host: normalize_host(host).to_string(),
            timezone,
        }
    }

    /// Fetch merged then open changes of `project` into `stats`.
    pub(crate) fn fetch(
        &mut self,
        project: &ProjectSpec,
        since: NaiveDate,
        stats: &mut DailyStats,
    ) -> Result<FetchSummary, FetchError> {
        let merged = self.fetch_pass(project, ChangeStatus::Merged, since, SpanEnd::Updated, stats)?;
        let now = self.timezone.now();
        let open = self.fetch_pass(project, ChangeStatus::Open, since, SpanEnd::At(now), stats)?;
        Ok(FetchSummary { merged, open })
    }

    fn fetch_pass(
        &mut self,
        project: &ProjectSpec,
        status: ChangeStatus,
        since: NaiveDate,
        span_end: SpanEnd,
        stats: &mut DailyStats,
    ) -> Result<PassSummary, FetchError> {
        let mut summary = PassSummary::default();
        let mut resume: Option<String> = None;

        loop {
            let url = changes_url(
                &self.host,
                self.source.authenticated(),
                status,
                project,
                resume.as_deref(),
                PAGE_SIZE,
            );
            debug!(%url, "requesting page");
            let body = self.source.get(&url)?;
            let changes: Vec<ChangeInfo> = serde_json::from_str(strip_xssi_guard(&body))?;
            summary.pages += 1;

            let Some(last) = changes.last() else {
                break;
            };

            for change in &changes {
                let begin = self.wall_clock(&change.created)?;
                let end = match span_end {
                    SpanEnd::Updated => self.wall_clock(&change.updated)?,
                    SpanEnd::At(now) => now,
                };
                add_span(stats, begin, end);
            }
            summary.changes += changes.len();

            if !last.more_changes {
                break;
            }
            let last_updated = self.wall_clock(&last.updated)?;
            if last_updated.date() < since {
                debug!(%last_updated, %since, "page crosses the window start, stopping");
                break;
            }
            match &last.sort_key {
                Some(key) => resume = Some(key.clone()),
                None => {
                    warn!(%url, "more changes reported without a sort key, stopping");
                    break;
                }
            }
        }

        Ok(summary)
    }

    fn wall_clock(&self, timestamp: &str) -> Result<NaiveDateTime, FetchError> {
        Ok(self.timezone.to_wall_clock(parse_timestamp(timestamp)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;

    const EMPTY: &str = ")]}'\n[]\n";

    /// Serves canned bodies in order and records every requested URL
    struct ScriptedSource {
        pages: VecDeque<String>,
        requested: Vec<String>,
        authenticated: bool,
    }

    impl ScriptedSource {
        fn new(pages: &[String]) -> Self {
            Self {
                pages: pages.iter().cloned().collect(),
                requested: Vec::new(),
                authenticated: false,
            }
        }
    }

    impl ChangeSource for ScriptedSource {
        fn authenticated(&self) -> bool {
            self.authenticated
        }

        fn get(&mut self, url: &str) -> Result<String, FetchError> {
            self.requested.push(url.to_string());
            Ok(self.pages.pop_front().unwrap_or_else(|| EMPTY.to_string()))
        }
    }

    fn change(created: &str, updated: &str, sort_key: &str, more: bool) -> String {
        format!(
            r#"{{"created":"{created}.000000000","updated":"{updated}.000000000","_sortkey":"{sort_key}"{}}}"#,
            if more { r#","_more_changes":true"# } else { "" }
        )
    }

    fn page(changes: &[String]) -> String {
        format!(")]}}'\n[{}]\n", changes.join(","))
    }

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn ts(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap()
    }

    fn project() -> ProjectSpec {
        ProjectSpec::parse("platform/sdk").unwrap()
    }

    #[test]
    fn consumes_every_page_once() {
        let pages = vec![
            page(&[
                change("2013-05-20 10:00:00", "2013-05-20 11:00:00", "k0", false),
                change("2013-05-19 10:00:00", "2013-05-19 11:00:00", "k1", true),
            ]),
            page(&[change("2013-05-18 10:00:00", "2013-05-18 11:00:00", "k2", true)]),
            page(&[change("2013-05-17 10:00:00", "2013-05-17 11:00:00", "k3", false)]),
            EMPTY.to_string(),
        ];
        let mut fetcher = StatsFetcher::new(
            ScriptedSource::new(&pages),
            "https://review.example.com/",
            Timezone::Utc,
        );
        let mut stats = DailyStats::new();
        let summary = fetcher.fetch(&project(), date("2013-01-01"), &mut stats).unwrap();

        let base = "https://review.example.com/changes/?q=";
        assert_eq!(
            fetcher.source.requested,
            vec![
                format!("{base}is:merged+project:platform/sdk&n=500"),
                format!("{base}is:merged+project:platform/sdk+resume_sortkey:k1&n=500"),
                format!("{base}is:merged+project:platform/sdk+resume_sortkey:k2&n=500"),
                format!("{base}is:open+project:platform/sdk&n=500"),
            ]
        );
        assert_eq!(summary.merged, PassSummary { changes: 4, pages: 3 });
        assert_eq!(summary.open, PassSummary { changes: 0, pages: 1 });
        assert_eq!(stats.len(), 4);
        assert_eq!(stats.total_seconds(), 4 * 3600);
    }

    #[test]
    fn stops_after_page_crossing_window_start() {
        let pages = vec![page(&[
            change("2013-05-20 10:00:00", "2013-05-20 11:00:00", "k0", false),
            change("2013-04-01 10:00:00", "2013-04-01 12:00:00", "k1", true),
        ])];
        let mut fetcher =
            StatsFetcher::new(ScriptedSource::new(&pages), "https://review.example.com", Timezone::Utc);
        let mut stats = DailyStats::new();
        let summary = fetcher.fetch(&project(), date("2013-05-01"), &mut stats).unwrap();

        // One merged page, then straight to the open pass
        assert_eq!(fetcher.source.requested.len(), 2);
        assert!(fetcher.source.requested[1].contains("is:open"));
        assert_eq!(summary.merged.changes, 2);
        // The straddling page is still counted, including the older change
        assert_eq!(stats.get(date("2013-04-01")), 7200);
        assert_eq!(stats.get(date("2013-05-20")), 3600);
    }

    #[test]
    fn same_day_as_window_start_keeps_paging() {
        let pages = vec![
            page(&[change("2013-05-01 08:00:00", "2013-05-01 09:00:00", "k1", true)]),
            page(&[change("2013-04-30 08:00:00", "2013-04-30 09:00:00", "k2", true)]),
        ];
        let mut fetcher =
            StatsFetcher::new(ScriptedSource::new(&pages), "https://review.example.com", Timezone::Utc);
        let mut stats = DailyStats::new();
        fetcher.fetch(&project(), date("2013-05-01"), &mut stats).unwrap();

        let merged: Vec<&String> = fetcher
            .source
            .requested
            .iter()
            .filter(|url| url.contains("is:merged"))
            .collect();
        assert_eq!(merged.len(), 2);
        assert!(merged[1].contains("resume_sortkey:k1"));
    }

    #[test]
    fn open_pass_ends_spans_at_fixed_now() {
        let pages = vec![page(&[
            change("2013-05-10 23:00:00", "2013-05-10 23:10:00", "k0", false),
            change("2013-05-11 00:30:00", "2013-05-11 00:40:00", "k1", false),
        ])];
        let mut fetcher =
            StatsFetcher::new(ScriptedSource::new(&pages), "https://review.example.com", Timezone::Utc);
        let mut stats = DailyStats::new();
        let now = ts("2013-05-11 01:00:00");
        let summary = fetcher
            .fetch_pass(&project(), ChangeStatus::Open, date("2013-01-01"), SpanEnd::At(now), &mut stats)
            .unwrap();

        assert_eq!(summary.changes, 2);
        assert_eq!(stats.get(date("2013-05-10")), 3600);
        assert_eq!(stats.get(date("2013-05-11")), 3600 + 1800);
        assert!(fetcher.source.requested[0].contains("is:open"));
    }

    #[test]
    fn empty_first_page_adds_nothing() {
        let mut fetcher =
            StatsFetcher::new(ScriptedSource::new(&[]), "https://review.example.com", Timezone::Utc);
        let mut stats = DailyStats::new();
        let summary = fetcher.fetch(&project(), date("2013-01-01"), &mut stats).unwrap();
        assert!(stats.is_empty());
        assert_eq!(summary.merged.pages, 1);
        assert_eq!(summary.open.pages, 1);
    }

    #[test]
    fn authenticated_source_uses_a_prefix() {
        let mut source = ScriptedSource::new(&[]);
        source.authenticated = true;
        let mut fetcher = StatsFetcher::new(source, "https://review.example.com", Timezone::Utc);
        let mut stats = DailyStats::new();
        fetcher.fetch(&project(), date("2013-01-01"), &mut stats).unwrap();
        assert!(
            fetcher
                .source
                .requested
                .iter()
                .all(|url| url.starts_with("https://review.example.com/a/changes/"))
        );
    }

    #[test]
    fn malformed_body_is_an_error() {
        let pages = vec![")]}'\n{\"not\": \"a list\"}".to_string()];
        let mut fetcher =
            StatsFetcher::new(ScriptedSource::new(&pages), "https://review.example.com", Timezone::Utc);
        let mut stats = DailyStats::new();
        let err = fetcher.fetch(&project(), date("2013-01-01"), &mut stats).unwrap_err();
        assert!(matches!(err, FetchError::Json(_)));
    }

    #[test]
    fn bad_timestamp_is_an_error() {
        let pages = vec![")]}'\n[{\"created\":\"yesterday\",\"updated\":\"today\"}]".to_string()];
        let mut fetcher =
            StatsFetcher::new(ScriptedSource::new(&pages), "https://review.example.com", Timezone::Utc);
        let mut stats = DailyStats::new();
        let err = fetcher.fetch(&project(), date("2013-01-01"), &mut stats).unwrap_err();
        assert!(matches!(err, FetchError::InvalidTimestamp { .. }));
    }

    #[test]
    fn more_changes_without_sort_key_stops() {
        let pages = vec![")]}'\n[{\"created\":\"2013-05-10 10:00:00.000000000\",\"updated\":\"2013-05-10 11:00:00.000000000\",\"_more_changes\":true}]".to_string()];
        let mut fetcher =
            StatsFetcher::new(ScriptedSource::new(&pages), "https://review.example.com", Timezone::Utc);
        let mut stats = DailyStats::new();
        let summary = fetcher.fetch(&project(), date("2013-01-01"), &mut stats).unwrap();
        assert_eq!(summary.merged.pages, 1);
        assert_eq!(fetcher.source.requested.len(), 2);
    }

    #[test]
    fn timezone_shifts_day_buckets() {
        let pages = vec![page(&[change("2013-05-10 20:00:00", "2013-05-10 22:00:00", "k0", false)])];
        let tz = Timezone::parse(Some("Asia/Seoul")).unwrap();
        let mut fetcher = StatsFetcher::new(ScriptedSource::new(&pages), "https://review.example.com", tz);
        let mut stats = DailyStats::new();
        fetcher.fetch(&project(), date("2013-01-01"), &mut stats).unwrap();
        // 05:00-07:00 KST on the next day
        assert_eq!(stats.get(date("2013-05-11")), 7200);
        assert_eq!(stats.get(date("2013-05-10")), 0);
    }
}
