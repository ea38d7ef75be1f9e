//! CLI argument definitions
//!
//! Command-line options, configuration merging and validation into a `RunConfig`.

use std::path::PathBuf;

use chrono::Duration;
use clap::Parser;

use crate::app::RunConfig;
use crate::config::Config;
use crate::consts::DEFAULT_LOOKBACK_DAYS;
use crate::core::ProjectSpec;
use crate::error::AppError;
use crate::gerrit::Credentials;
use crate::utils::{Timezone, parse_date};

#[derive(Parser)]
#[command(name = "gerrit-graph")]
#[command(about = "Chart how long Gerrit changes stay open, day by day", version)]
pub(crate) struct Cli {
    /// Projects to track (e.g. platform/sdk or platform/sdk@master)
    #[arg(value_name = "PROJECT")]
    pub(crate) projects: Vec<String>,

    /// Gerrit server URL
    #[arg(long, value_name = "URL")]
    pub(crate) host: Option<String>,

    /// Generate stats from this day (YYYYMMDD or YYYY-MM-DD, default: 366 days ago)
    #[arg(short, long)]
    pub(crate) since: Option<String>,

    /// Output file for the SVG graph
    #[arg(short, long, value_name = "FILE")]
    pub(crate) out: Option<PathBuf>,

    /// Credentials for HTTP digest authentication
    #[arg(long, value_name = "USER:PASSWORD")]
    pub(crate) auth: Option<String>,

    /// Skip TLS certificate verification
    #[arg(long)]
    pub(crate) insecure: bool,

    /// Timezone for day boundaries (e.g. "UTC", "local", "Asia/Seoul"; default: UTC)
    #[arg(long, value_name = "TZ")]
    pub(crate) timezone: Option<String>,

    /// Also print the daily series as JSON
    #[arg(short, long)]
    pub(crate) json: bool,

    /// Enable debug output (per-page requests)
    #[arg(short, long)]
    pub(crate) verbose: bool,
}

impl Cli {
    /// Merge config file values into CLI (CLI args take precedence)
    pub(crate) fn with_config(mut self, config: &Config) -> Self {
        if !self.insecure && config.insecure {
            self.insecure = true;
        }
        if self.host.is_none() {
            self.host = config.host.clone();
        }
        if self.auth.is_none() {
            self.auth = config.auth.clone();
        }
        if self.timezone.is_none() {
            self.timezone = config.timezone.clone();
        }
        if self.out.is_none() {
            self.out = config.out.clone();
        }
        if self.projects.is_empty() {
            self.projects = config.projects.clone();
        }
        self
    }

    pub(crate) fn into_run_config(self) -> Result<RunConfig, AppError> {
        let host = self
            .host
            .filter(|h| !h.trim().is_empty())
            .ok_or(AppError::MissingArgument { name: "--host" })?;
        let output = self.out.ok_or(AppError::MissingArgument { name: "--out" })?;

        let mut projects: Vec<ProjectSpec> = Vec::new();
        for raw in &self.projects {
            let project = ProjectSpec::parse(raw)?;
            if !projects.contains(&project) {
                projects.push(project);
            }
        }
        if projects.is_empty() {
            return Err(AppError::MissingArgument {
                name: "projects (e.g. platform/sdk, platform/sdk@master)",
            });
        }

        let timezone = Timezone::parse(self.timezone.as_deref())?;
        let since = match self.since.as_deref() {
            Some(s) => parse_date(s)?,
            None => timezone.today() - Duration::days(DEFAULT_LOOKBACK_DAYS),
        };
        let credentials = self.auth.as_deref().map(Credentials::parse).transpose()?;

        Ok(RunConfig {
            host: host.trim().to_string(),
            projects,
            since,
            credentials,
            insecure: self.insecure,
            timezone,
            output,
            json: self.json,
        })
    }
}
