//! Core data types shared by the fetcher, the aggregator and the chart

use chrono::NaiveDate;
use std::collections::BTreeMap;
use std::fmt;

use crate::error::AppError;

/// Accumulated open-seconds per calendar day
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub(crate) struct DailyStats {
    days: BTreeMap<NaiveDate, i64>,
}

impl DailyStats {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Add seconds to a day; an existing bucket is increased, never replaced.
    pub(crate) fn add(&mut self, date: NaiveDate, seconds: i64) {
        *self.days.entry(date).or_insert(0) += seconds;
    }

    /// Seconds recorded for a day, zero when the day has no bucket
    pub(crate) fn get(&self, date: NaiveDate) -> i64 {
        self.days.get(&date).copied().unwrap_or(0)
    }

    pub(crate) fn max_seconds(&self) -> i64 {
        self.days.values().copied().max().unwrap_or(0)
    }

    pub(crate) fn last_day(&self) -> Option<NaiveDate> {
        self.days.keys().next_back().copied()
    }

    pub(crate) fn total_seconds(&self) -> i64 {
        self.days.values().sum()
    }

    pub(crate) fn len(&self) -> usize {
        self.days.len()
    }

    #[cfg(test)]
    pub(crate) fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Days in ascending order
    #[cfg(test)]
    pub(crate) fn iter(&self) -> impl Iterator<Item = (NaiveDate, i64)> + '_ {
        self.days.iter().map(|(date, seconds)| (*date, *seconds))
    }
}

/// A tracked project, optionally scoped to one branch (`name@branch`)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) struct ProjectSpec {
    pub(crate) name: String,
    pub(crate) branch: Option<String>,
}

impl ProjectSpec {
    pub(crate) fn parse(input: &str) -> Result<Self, AppError> {
        let trimmed = input.trim();
        let invalid = || AppError::InvalidProject {
            input: input.to_string(),
        };
        let (name, branch) = match trimmed.split_once('@') {
            Some((name, branch)) => {
                if branch.is_empty() || branch.contains('@') {
                    return Err(invalid());
                }
                (name, Some(branch.to_string()))
            }
            None => (trimmed, None),
        };
        if name.is_empty() {
            return Err(invalid());
        }
        Ok(ProjectSpec {
            name: name.to_string(),
            branch,
        })
    }

    /// Search operator fragment, e.g. `project:platform/sdk+branch:master`
    pub(crate) fn query_term(&self) -> String {
        match &self.branch {
            Some(branch) => format!("project:{}+branch:{}", self.name, branch),
            None => format!("project:{}", self.name),
        }
    }
}

impl fmt::Display for ProjectSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.branch {
            Some(branch) => write!(f, "{}@{}", self.name, branch),
            None => f.write_str(&self.name),
        }
    }
}
