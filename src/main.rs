mod app;
mod chart;
mod cli;
mod config;
mod consts;
mod core;
mod error;
mod gerrit;
mod output;
mod utils;

use std::io;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::Cli;
use config::Config;

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let cli = cli.with_config(&Config::load());
    if let Err(e) = cli.into_run_config().and_then(app::run) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
