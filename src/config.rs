use serde::Deserialize;
use std::fs;
use std::path::PathBuf;
use tracing::{debug, warn};

/// Optional defaults read from `config.toml`; command-line flags win.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct Config {
    #[serde(default)]
    pub(crate) host: Option<String>,
    #[serde(default)]
    pub(crate) auth: Option<String>,
    #[serde(default)]
    pub(crate) insecure: bool,
    #[serde(default)]
    pub(crate) timezone: Option<String>,
    #[serde(default)]
    pub(crate) out: Option<PathBuf>,
    #[serde(default)]
    pub(crate) projects: Vec<String>,
}

impl Config {
    pub(crate) fn load() -> Self {
        // Try config locations in order of priority
        for path in Self::get_config_paths() {
            if path.exists()
                && let Ok(content) = fs::read_to_string(&path)
            {
                match toml::from_str::<Config>(&content) {
                    Ok(config) => {
                        debug!("Loaded config from {}", path.display());
                        return config;
                    }
                    Err(e) => {
                        warn!("Failed to parse {}: {}", path.display(), e);
                    }
                }
            }
        }

        Self::default()
    }

    fn get_config_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();

        // 1. XDG config: ~/.config/gerrit-graph/config.toml
        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".config").join("gerrit-graph").join("config.toml"));
        }

        // 2. Platform config dir, e.g. ~/Library/Application Support on macOS
        if let Some(config_dir) = dirs::config_dir() {
            let platform_path = config_dir.join("gerrit-graph").join("config.toml");
            if !paths.contains(&platform_path) {
                paths.push(platform_path);
            }
        }

        // 3. Home directory: ~/.gerrit-graph.toml
        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".gerrit-graph.toml"));
        }

        paths
    }
}
