//! Configuration file management.

use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::warn;

/// Configuration file structure, loaded from `<config dir>/sonda/config.toml`.
///
/// Poll intervals are configuration, not contract. The defaults match the
/// original deployment's cadence per view.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Backend base URL including the API prefix
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Disable colored output
    #[serde(default)]
    pub no_color: bool,

    /// Dashboard view refresh interval in seconds
    #[serde(default = "default_dashboard_interval")]
    pub dashboard_interval: u64,

    /// Control view refresh interval in seconds
    #[serde(default = "default_control_interval")]
    pub control_interval: u64,

    /// Indicator board refresh interval in seconds
    #[serde(default = "default_board_interval")]
    pub board_interval: u64,

    /// Directory report artifacts are written to. Empty means use the
    /// Downloads (or Documents) directory.
    #[serde(default)]
    pub export_directory: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            no_color: false,
            dashboard_interval: default_dashboard_interval(),
            control_interval: default_control_interval(),
            board_interval: default_board_interval(),
            export_directory: String::new(),
        }
    }
}

fn default_api_url() -> String {
    "http://localhost:5000/api".to_string()
}

fn default_dashboard_interval() -> u64 {
    3
}

fn default_control_interval() -> u64 {
    2
}

fn default_board_interval() -> u64 {
    5
}

/// Path of the configuration file.
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("sonda").join("config.toml"))
}

impl Config {
    /// Load the configuration, falling back to defaults when the file is
    /// missing or unreadable. A malformed file is logged, not fatal.
    pub fn load() -> Self {
        let Some(path) = config_path() else {
            return Self::default();
        };
        match fs::read_to_string(&path) {
            Ok(raw) => match toml::from_str(&raw) {
                Ok(config) => config,
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Ignoring malformed config file");
                    Self::default()
                }
            },
            Err(_) => Self::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = Config::default();
        assert_eq!(config.api_url, "http://localhost:5000/api");
        assert_eq!(config.dashboard_interval, 3);
        assert_eq!(config.control_interval, 2);
        assert_eq!(config.board_interval, 5);
    }

    #[test]
    fn partial_file_fills_defaults() {
        let config: Config = toml::from_str("api_url = \"http://pi:5000/api\"").unwrap();
        assert_eq!(config.api_url, "http://pi:5000/api");
        assert_eq!(config.board_interval, 5);
    }
}
