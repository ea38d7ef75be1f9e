//! Core module - day buckets, project specs and span aggregation

mod aggregator;
mod types;

pub(crate) use aggregator::add_span;
pub(crate) use types::{DailyStats, ProjectSpec};
