//! Gerrit REST access
//!
//! Pages through `/changes/` for one project and feeds every change into the
//! day buckets.

mod client;
mod fetcher;
mod query;
mod types;

pub(crate) use client::{ChangeSource, Credentials, HttpChangeSource};
pub(crate) use fetcher::StatsFetcher;
